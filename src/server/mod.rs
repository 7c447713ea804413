use std::sync::Arc;

use crate::classifier::Predictor;

mod routes;
mod server;
mod types;

/// Predictor handle shared read-only across all in-flight requests
pub type SharedPredictor = Arc<dyn Predictor>;

// Re-export from server
pub use server::ApiServer;
// Re-export from types
pub use types::AnalyzeResponse;
