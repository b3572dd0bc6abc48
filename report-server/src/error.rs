use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Render failed: {0}")]
    Render(#[from] report_core::RenderError),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        // The client never sees engine details or a partial document.
        tracing::error!("{}", self);
        let body = Json(json!({ "error": "Internal Server Error" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Failure to obtain the logo. Never fatal to a render.
#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("logo request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("logo request returned {0}")]
    Status(reqwest::StatusCode),

    #[error("logo request timed out after {0} ms")]
    Timeout(u64),

    #[error("logo is not a usable image: {0}")]
    Decode(#[from] report_core::RenderError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
