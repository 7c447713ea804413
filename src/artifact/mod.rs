mod download;
mod format;
mod types;

// Re-export from types
pub use types::{ArtifactError, ProvisionError};
// Re-export from format
pub use format::{ArtifactReader, is_artifact_file, ARTIFACT_MAGIC, ARTIFACT_VERSION};
// Re-export from download
pub use download::ensure;
