use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;

use leaderboard_types::errors::{ApplicationError, ValidationError};

pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// 400 body naming each offending field.
#[derive(Debug, Serialize)]
pub struct ValidationProblem {
    pub title: &'static str,
    pub status: u16,
    pub errors: BTreeMap<&'static str, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Maps application errors to HTTP responses. Storage and internal
/// failures are logged and answered with a generic message only.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedRequest(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::MalformedRequest(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(field) = self.0.rejected_field() {
            tracing::debug!("Rejected request: {}", self.0);
            let problem = ValidationProblem {
                title: VALIDATION_TITLE,
                status: StatusCode::BAD_REQUEST.as_u16(),
                errors: BTreeMap::from([(field, vec![self.0.to_string()])]),
            };
            return (StatusCode::BAD_REQUEST, Json(problem)).into_response();
        }

        let (status, message) = match self.0 {
            ApplicationError::Cancelled => {
                tracing::warn!("Request cancelled before completion");
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable.")
            }
            ref e => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        };
        (
            status,
            Json(MessageResponse {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}
