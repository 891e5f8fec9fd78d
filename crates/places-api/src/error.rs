use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use places_db::StoreError;
use places_geo::GeocodeError;
use places_types::ValidationError;
use places_types::api::MessageResponse;

const ADDRESS_NOT_FOUND: &str = "Unable to locate address name";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested id has no matching row.
    #[error("{0}")]
    NotFound(String),

    /// The geocoder could not resolve a place name.
    #[error("{0}")]
    AddressNotFound(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request body could not be read as the expected JSON.
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    /// The query string could not be read as the expected parameters.
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Every geocoder failure, including timeouts and bad upstream payloads, is
/// reported to the client as an unresolvable address.
impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound(place) => {
                warn!(place = %place, "Geocoder found no match");
            }
            other => {
                warn!(error = %other, "Geocoder call failed");
            }
        }
        Self::AddressNotFound(ADDRESS_NOT_FOUND.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) | Self::AddressNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Json(rejection) => rejection.status(),
            Self::Query(rejection) => rejection.status(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(detail) => {
                error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
