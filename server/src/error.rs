//! HTTP error mapping.
//!
//! # Design
//! `NotFound` gets a dedicated variant because handlers frequently
//! distinguish "the resource does not exist" from everything else. Engine
//! errors keep their own taxonomy: caller-correctable validation failures
//! map to 400, while a `Calculation` failure is an internal invariant
//! violation and maps to 500. Every response body is the FastAPI-style
//! `{"detail": "..."}` shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use convert_core::ConvertError;
use serde_json::json;

/// Errors surfaced by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The addressed resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A request field failed validation outside the conversion engine.
    #[error("{0}")]
    BadRequest(String),

    /// The conversion engine rejected the request or failed internally.
    #[error("{0}")]
    Convert(#[from] ConvertError),

    /// A query against the SQLite store failed.
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// The connection mutex was poisoned by a panicking handler.
    #[error("database connection unavailable")]
    LockPoisoned,

    /// The export workbook could not be built.
    #[error("error creating Excel file: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Convert(e) if e.is_caller_error() => StatusCode::BAD_REQUEST,
            ApiError::Convert(_) | ApiError::Db(_) | ApiError::LockPoisoned | ApiError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(
            ApiError::Convert(ConvertError::InvalidValue).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Convert(ConvertError::ValueTooLarge(1e16)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadRequest("title must not be empty".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn calculation_errors_map_to_500() {
        assert_eq!(
            ApiError::Convert(ConvertError::Calculation).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(ApiError::NotFound("Todo").to_string(), "Todo not found");
        assert_eq!(ApiError::NotFound("Todo").status(), StatusCode::NOT_FOUND);
    }
}
