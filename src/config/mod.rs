// Required external crates for configuration management and serialization
use serde::Deserialize;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File};

/// Configuration for the model artifact
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Remote URL the artifact is downloaded from on first run
    pub url: String,
    /// Directory where the artifact file is stored
    pub directory: PathBuf,
    /// Filename of the artifact inside the directory
    pub filename: String,
}

impl ModelConfig {
    /// Full local path of the artifact file.
    pub fn artifact_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Optional log file directory
    pub file: Option<PathBuf>,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Model artifact settings
    pub model: ModelConfig,
    /// Server-related settings
    pub server: ServerConfig,
    /// Logging-related settings
    pub logging: LoggingConfig,
}

/// Implementation for loading and parsing configuration
impl Settings {
    /// Creates a new Settings instance by loading config from multiple sources
    /// in the following order of precedence (highest to lowest):
    /// 1. Environment variables prefixed with BEARVISION_
    /// 2. Local config file (local.toml) if present
    /// 3. Default config file (default.toml)
    pub fn new() -> Result<Self, ConfigError> {
        // Check if current directory exists
        let config_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(
                format!("Failed to get current directory: {}", e)
            ))?
            .join("config");

        Self::from_dir(&config_dir)
    }

    /// Loads settings from the given configuration directory.
    pub fn from_dir(config_dir: &Path) -> Result<Self, ConfigError> {
        // Check if config directory exists
        if !config_dir.exists() {
            return Err(ConfigError::Message(
                format!("Config directory not found at: {}", config_dir.display())
            ));
        }

        // Check if default.toml exists
        let default_config = config_dir.join("default.toml");
        if !default_config.exists() {
            return Err(ConfigError::Message(
                format!("Default configuration file not found at: {}", default_config.display())
            ));
        }

        // Create the local config path
        let local_config = config_dir.join("local.toml");

        // Convert paths to strings and keep them alive
        let default_config_path = default_config.to_string_lossy();
        let local_config_path = local_config.to_string_lossy();

        // Load and validate configuration
        let settings = Config::builder()
            .add_source(File::with_name(&default_config_path))
            .add_source(File::with_name(&local_config_path).required(false))
            .add_source(Environment::with_prefix("BEARVISION").separator("_"))
            .build()?
            .try_deserialize::<Settings>()?;

        // Validate settings after loading
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        // Create the model directory if it doesn't exist
        if !self.model.directory.exists() {
            std::fs::create_dir_all(&self.model.directory).map_err(|e| {
                ConfigError::Message(format!(
                    "Failed to create model directory at {}: {}",
                    self.model.directory.display(), e
                ))
            })?;
        }

        // Validate artifact URL
        if !self.model.url.starts_with("http://") && !self.model.url.starts_with("https://") {
            return Err(ConfigError::Message(
                format!("Model URL must be an http(s) URL, got: {}", self.model.url)
            ));
        }

        // Validate artifact filename
        if self.model.filename.is_empty() {
            return Err(ConfigError::Message(
                "Model filename must not be empty".to_string()
            ));
        }

        // Validate server port range
        if self.server.port == 0 {
            return Err(ConfigError::Message(
                "Port must be between 1 and 65535, got: 0".to_string()
            ));
        }

        // Validate logging level
        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        // Create log file directory if configured and doesn't exist
        if let Some(log_dir) = &self.logging.file {
            if !log_dir.exists() {
                std::fs::create_dir_all(log_dir).map_err(|e| {
                    ConfigError::Message(format!(
                        "Failed to create log directory at {}: {}",
                        log_dir.display(), e
                    ))
                })?;
            }
        }

        Ok(())
    }
}
