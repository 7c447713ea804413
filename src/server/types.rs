use serde::{Deserialize, Serialize};

/// Response body for a successful prediction
#[derive(Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Predicted class label as text
    pub result: String,
}
