use std::error::Error;
use std::fmt;

/// Errors raised while parsing the artifact container
#[derive(Debug)]
pub enum ArtifactError {
    /// Wraps std::io::Error for file operations
    Io(std::io::Error),
    /// Invalid format errors with a message
    InvalidFormat(String),
}

/// Implements Display trait for ArtifactError for error reporting
impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArtifactError::Io(e) => write!(f, "I/O error: {}", e),
            ArtifactError::InvalidFormat(msg) => write!(f, "Invalid artifact format: {}", msg),
        }
    }
}

/// Implements Error trait to allow ArtifactError to be used as a standard error type
impl Error for ArtifactError {}

/// Allows automatic conversion from std::io::Error to ArtifactError
impl From<std::io::Error> for ArtifactError {
    fn from(err: std::io::Error) -> Self {
        ArtifactError::Io(err)
    }
}

/// Errors raised while provisioning the artifact file
#[derive(Debug)]
pub enum ProvisionError {
    /// Network-level failure while fetching the artifact
    Request(reqwest::Error),
    /// The artifact host answered with a non-success status
    Status(reqwest::StatusCode),
    /// Wraps std::io::Error for the local write
    Io(std::io::Error),
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProvisionError::Request(e) => write!(f, "Failed to fetch artifact: {}", e),
            ProvisionError::Status(status) => {
                write!(f, "Artifact host returned status {}", status)
            }
            ProvisionError::Io(e) => write!(f, "Failed to write artifact: {}", e),
        }
    }
}

impl Error for ProvisionError {}

impl From<reqwest::Error> for ProvisionError {
    fn from(err: reqwest::Error) -> Self {
        ProvisionError::Request(err)
    }
}

impl From<std::io::Error> for ProvisionError {
    fn from(err: std::io::Error) -> Self {
        ProvisionError::Io(err)
    }
}
