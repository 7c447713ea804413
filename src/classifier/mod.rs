//! # Classifier Module
//!
//! The classifier module turns the downloaded model artifact into an
//! in-memory predictor and runs the forward pass for incoming images.
//!
//! ## Key Components
//!
//! - `Predictor`: the capability the HTTP layer depends on - map an image to
//!   a class label
//! - `LinearClassifier`: the concrete predictor deserialized from the
//!   artifact, a linear model over flattened normalized RGB pixels
//! - `load`: one-shot deserialization of the artifact at startup
//!
//! The predictor is constructed once and is read-only afterwards, so it can
//! be shared across in-flight requests behind an `Arc` without locking.

use image::DynamicImage;

mod loader;
mod model;

// Re-export from loader
pub use loader::{load, LoadError};
// Re-export from model
pub use model::LinearClassifier;

/// Class labels the deployed artifact is expected to carry.
///
/// Informational only: startup logs a warning when the artifact disagrees,
/// requests are never validated against this list.
pub const CLASSES: [&str; 3] = ["black", "grizzly", "teddys"];

/// Capability of mapping a decoded image to a class label.
///
/// Implementations must be immutable after construction; the server shares a
/// single instance across all in-flight requests.
pub trait Predictor: Send + Sync {
    /// Runs the forward pass and returns the predicted class label.
    fn predict(&self, image: &DynamicImage) -> String;

    /// Class labels this predictor can produce, in score order.
    fn labels(&self) -> &[String];
}
