//! Error types and error handling

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Site-wide error type
#[derive(Debug, Error)]
pub enum SiteError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content loading or parsing error
    #[error("Content error: {0}")]
    Content(String),

    /// Not Found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream service failure (GitHub, helpdesk)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// I/O error while reading static content
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template rendering error
    #[error("Template render error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(what) => {
                tracing::debug!(what = %what, "Returning 404");
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
