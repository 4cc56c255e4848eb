//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use perf_core::FormulaError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Formula(e) => (StatusCode::BAD_REQUEST, e.code()),
            Self::BadRequest { .. } => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            Self::Encode(_) | Self::Io(_) | Self::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("rejected request: {}", self);
        }
        (status, Json(json!({ "code": code, "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_errors_are_bad_requests() {
        let err = ServerError::from(FormulaError::DivisionByZero);
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "DIVISION_BY_ZERO")
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_io_errors_are_internal() {
        let err = ServerError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
