use std::fs;
use std::path::Path;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{debug, info};

use super::types::ProvisionError;

/// Ensures the model artifact exists at the destination path.
///
/// If a file is already present the call is a no-op and performs zero network
/// requests; the existing content is trusted as-is. Otherwise the artifact is
/// fetched from the URL, buffered fully in memory, and written to the
/// destination in a single pass. A failed download leaves no file behind, but
/// a write interrupted midway is not cleaned up.
///
/// # Arguments
///
/// * `url` - Remote URL serving the artifact bytes over plain GET
/// * `destination` - Local path the artifact is written to
pub async fn ensure(url: &str, destination: &Path) -> Result<(), ProvisionError> {
    if destination.exists() {
        debug!("Artifact already present at {}, skipping download", destination.display());
        return Ok(());
    }

    info!("Downloading model artifact from {}", url);
    let response = Client::new().get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProvisionError::Status(status));
    }

    // Stream the body into memory, reporting progress as chunks arrive
    let pb = match response.content_length() {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{prefix:.bold.dim} {bar:40} {bytes}/{total_bytes} {wide_msg}")
                    .unwrap()
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    pb.set_message("Downloading artifact...");

    let mut buffer: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        pb.inc(chunk.len() as u64);
        buffer.extend_from_slice(&chunk);
    }
    pb.finish_with_message(format!("Downloaded {} bytes", buffer.len()));

    fs::write(destination, &buffer)?;
    info!("Artifact written to {}", destination.display());

    Ok(())
}
