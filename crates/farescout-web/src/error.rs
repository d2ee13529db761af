//! Outward error mapping for the API surface.
//!
//! Each engine failure maps to a distinct status so callers can tell user
//! mistakes from empty results from infrastructure trouble. Provider
//! details are logged here and never leak into response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use farescout_core::SuggestError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("missing or invalid credentials")]
    Unauthorized,
    #[error("upstream travel data provider is unavailable")]
    BadGateway,
}

impl From<SuggestError> for ApiError {
    fn from(error: SuggestError) -> Self {
        match &error {
            SuggestError::LocationNotFound(_) => Self::BadRequest(format!(
                "{error}. Enter a valid UK postcode or city name."
            )),
            SuggestError::NoAirportsNearby { .. } => Self::NotFound(error.to_string()),
            SuggestError::Auth(inner) => {
                tracing::error!(
                    status = ?inner.status(),
                    "provider authentication failed: {}",
                    inner.message()
                );
                Self::BadGateway
            }
            SuggestError::Upstream(inner) => {
                tracing::error!(
                    status = ?inner.status(),
                    "provider failure before fan-out: {}",
                    inner.message()
                );
                Self::BadGateway
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadGateway => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
