use std::error::Error;
use std::fmt;
use std::path::Path;
use ndarray::{Array1, Array2};
use tracing::info;

use crate::artifact::{ArtifactError, ArtifactReader};
use super::model::LinearClassifier;

/// Backend tag artifacts must carry to run in this process
const CPU_BACKEND: &str = "cpu";

/// Errors raised while deserializing the artifact into a predictor
#[derive(Debug)]
pub enum LoadError {
    /// The artifact was exported for an accelerator backend that is not
    /// available here, detected from the container's backend tag.
    IncompatibleBackend {
        /// Backend tag found in the artifact header
        backend: String,
    },
    /// Any other deserialization failure, preserving the original detail
    Format(ArtifactError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::IncompatibleBackend { backend } => write!(
                f,
                "This model was exported for the '{}' backend and will not work in a \
                 CPU-only environment.\n\nRe-export the model for CPU inference in your \
                 training environment, publish the new artifact, and restart the server.",
                backend
            ),
            LoadError::Format(e) => write!(f, "Failed to load model artifact: {}", e),
        }
    }
}

impl Error for LoadError {}

impl From<ArtifactError> for LoadError {
    fn from(err: ArtifactError) -> Self {
        LoadError::Format(err)
    }
}

/// Deserializes the artifact at the given path into a classifier.
///
/// Invoked exactly once at startup, after provisioning completes. A failed
/// load is fatal: the caller aborts before the listener binds.
pub fn load(path: &Path) -> Result<LinearClassifier, LoadError> {
    info!("Loading model artifact from {}", path.display());
    let reader = ArtifactReader::new(path)?;

    if reader.backend != CPU_BACKEND {
        return Err(LoadError::IncompatibleBackend {
            backend: reader.backend,
        });
    }

    // Split each row into its weight vector and trailing bias term
    let row_len = 3 * (reader.edge as usize) * (reader.edge as usize) + 1;
    let n_labels = reader.labels.len();
    let mut weights = Vec::with_capacity(n_labels * (row_len - 1));
    let mut bias = Vec::with_capacity(n_labels);
    for row in reader.weights.chunks_exact(row_len) {
        weights.extend_from_slice(&row[..row_len - 1]);
        bias.push(row[row_len - 1]);
    }

    let weights = Array2::from_shape_vec((n_labels, row_len - 1), weights)
        .map_err(|e| LoadError::Format(ArtifactError::InvalidFormat(e.to_string())))?;

    info!("Classifier loaded with labels {:?}", reader.labels);
    Ok(LinearClassifier::new(
        reader.labels,
        reader.edge,
        weights,
        Array1::from(bias),
    ))
}
