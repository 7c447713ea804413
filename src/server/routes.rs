use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, info};

use super::types::AnalyzeResponse;
use super::SharedPredictor;

/// Landing page served at the root route
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Per-request failures, surfaced as a generic server error.
///
/// Failures here are isolated to the failing request; they never take the
/// server down or affect other in-flight requests.
pub(super) enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        error!("Request failed: {}", message);

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Internal(format!("Failed to read upload: {}", err))
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Internal(format!("Failed to decode image: {}", err))
    }
}

/// Returns the static landing page.
pub async fn homepage() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Decodes the uploaded image, runs the predictor, and returns the label.
///
/// Accepts a multipart form submission with a single `file` field holding the
/// image bytes. Decode and predict run inline in the handler; the predictor
/// is read-only shared state so no locking is involved.
pub async fn analyze(
    State(predictor): State<SharedPredictor>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    info!("Analyze endpoint called");

    // Take the first field named "file"
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            upload = Some(field.bytes().await?);
            break;
        }
    }
    let bytes = upload
        .ok_or_else(|| AppError::Internal("Missing 'file' form field".to_string()))?;

    let img = image::load_from_memory(&bytes)?;
    let result = predictor.predict(&img);
    info!("Predicted label: {}", result);

    Ok(Json(AnalyzeResponse { result }))
}
