use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use bearvision::artifact;
use bearvision::classifier;
use bearvision::config::Settings;
use bearvision::server::ApiServer;

#[derive(Parser)]
#[command(name = "bearvision")]
#[command(about = "HTTP inference server for the bear classifier")]
#[command(version)]
struct Cli {
    /// Configuration directory (defaults to ./config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the inference server
    Serve,
}

/// Main entry point for the bearvision server
///
/// Settings are loaded first, then logging is initialized, then the model
/// artifact is provisioned and deserialized. The HTTP listener only binds
/// once the predictor is ready; a missing or unloadable artifact aborts
/// startup.
///
/// # Errors
/// Returns an error if provisioning, loading, or server startup fails
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    // Load settings first
    let settings = match &cli.config {
        Some(dir) => Settings::from_dir(dir)?,
        None => Settings::new()?,
    };

    // Initialize the subscriber first, before any file operations
    let file_appender = tracing_appender::rolling::RollingFileAppender::new(
        tracing_appender::rolling::Rotation::DAILY,
        // Use log file path from settings, or default to "logs"
        settings.logging.file.as_deref().unwrap_or_else(|| Path::new("logs")),
        "bearvision",
    );

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let max_level: tracing::Level = settings
        .logging
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        // Disable ANSI colors for cleaner log files
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(false)
        .with_max_level(max_level)
        .init();

    info!("bearvision starting up...");
    info!("Settings loaded");

    // The only command is `serve`, which is also the default
    match cli.command {
        None | Some(Command::Serve) => serve(settings).await,
    }
}

/// Provisions the artifact, loads the predictor, and runs the server.
async fn serve(settings: Settings) -> Result<(), Box<dyn Error + Send + Sync>> {
    let artifact_path = settings.model.artifact_path();
    info!("Artifact path: {}", artifact_path.display());

    // Make sure the serialized model is present locally
    artifact::ensure(&settings.model.url, &artifact_path).await?;

    // Deserialize it into the predictor shared by all requests
    let predictor = classifier::load(&artifact_path)?;
    if predictor.labels().iter().map(String::as_str).ne(classifier::CLASSES) {
        warn!(
            "Artifact labels {:?} differ from the expected class list {:?}",
            predictor.labels(),
            classifier::CLASSES
        );
    }

    let server = ApiServer::new(
        Arc::new(predictor),
        settings.server.host.clone(),
        settings.server.port,
    );
    server.start().await
}
