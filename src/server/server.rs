use std::error::Error;
use std::sync::Arc;
use axum::http::{header, HeaderName};
use axum::{Router, routing::{get, post}};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::routes;
use super::SharedPredictor;

/// API server exposing the classifier over HTTP
pub struct ApiServer {
    predictor: SharedPredictor,
    host: String,
    port: u16,
}

impl ApiServer {
    pub fn new(predictor: SharedPredictor, host: String, port: u16) -> Self {
        info!("Creating new API server on {}:{}", host, port);
        Self {
            predictor,
            host,
            port,
        }
    }

    /// Builds the application router around a shared predictor.
    pub fn router(predictor: SharedPredictor) -> Router {
        // Browser clients upload cross-origin from the landing page
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_headers([
                header::CONTENT_TYPE,
                HeaderName::from_static("x-requested-with"),
            ]);

        Router::new()
            .route("/", get(routes::homepage))
            .route("/analyze", post(routes::analyze))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(predictor)
    }

    pub async fn start(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = Self::router(Arc::clone(&self.predictor));

        info!("Starting server on {}:{}", self.host, self.port);
        let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;

        info!("Server started successfully\n");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
