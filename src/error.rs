use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    Handler {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Top-level handler failure with an endpoint-specific client message.
    pub fn handler(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Error::Handler {
            message,
            source: source.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            Error::Handler { message, source } => {
                tracing::error!(error = ?source, "{}", message);
                // Only the top-level error text goes to the client; the full
                // chain stays in the log.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": message,
                        "error": source.to_string(),
                    })),
                )
                    .into_response()
            }
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "An unexpected error occurred",
                    "error": other.to_string(),
                })),
            )
                .into_response(),
        }
    }
}
