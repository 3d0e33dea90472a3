use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bills::SourceError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("billIds parameter is required")]
    MissingBillIds,

    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: SourceError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn upstream(context: &'static str) -> impl FnOnce(SourceError) -> Self {
        move |source| AppError::Upstream { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MalformedRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Malformed request", "message": message }),
            ),
            AppError::MissingBillIds => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            AppError::Upstream { context, source } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": context, "message": source.to_string() }),
            ),
            AppError::Config(_) | AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal error", "message": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
