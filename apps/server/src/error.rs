//! Error types for the booking API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Hotel not found: {0}")]
    HotelNotFound(uuid::Uuid),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Image upload error: {0}")]
    ImageUpload(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Single-message validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(vec![msg.into()])
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Field-level validation errors keep the original wire shape:
        // a 400 whose "message" is the list of messages.
        if let Error::Validation(messages) = &self {
            let body = Json(json!({ "message": messages }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, message) = match &self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::HotelNotFound(_) => (StatusCode::NOT_FOUND, "Hotel not found".to_string()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            Error::Database(_) | Error::ImageUpload(_) | Error::Internal(_) | Error::Other(_) => {
                // Never leak storage or upstream detail to the client.
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            Error::Validation(_) => unreachable!("handled above"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotel_not_found_maps_to_404() {
        let response = Error::HotelNotFound(uuid::Uuid::new_v4()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = Error::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn storage_failures_map_to_generic_500() {
        let response = Error::Internal("pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_map_to_400() {
        let response = Error::Validation(vec!["Name is required".to_string()]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
