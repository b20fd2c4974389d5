use crate::api::v1::handler::ApiResponse;
use crate::application_port::{FieldErrors, ServiceError};
use serde::Serialize;
use std::convert::Infallible;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(err) = err.find::<ApiError>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(err.clone()));
        Ok(warp::reply::with_status(json, StatusCode::OK))
    } else {
        let json = warp::reply::json(&ApiResponse::<()>::err(ApiError {
            code: ApiErrorCode::InternalError,
            message: format!("Unhandled error: {:?}", err),
            details: None,
        }));
        Ok(warp::reply::with_status(
            json,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    Unauthenticated,
    BadUserInput,
    ValidationFailed,
    NotFound,
    Forbidden,
    InternalError,
}

/// Uniform error body: message + machine-readable code, plus the field map
/// for validation failures. Internal detail never crosses this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl reject::Reject for ApiError {}

impl ApiError {
    fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Unauthenticated => {
                ApiError::new(ApiErrorCode::Unauthenticated, "Unauthenticated")
            }
            ServiceError::Token(message) => ApiError::new(ApiErrorCode::BadUserInput, message),
            ServiceError::BadUserInput(message) => {
                ApiError::new(ApiErrorCode::BadUserInput, message)
            }
            ServiceError::Validation(fields) => ApiError {
                code: ApiErrorCode::ValidationFailed,
                message: "Invalid arguments".to_string(),
                details: Some(fields),
            },
            ServiceError::NotFound(message) => ApiError::new(ApiErrorCode::NotFound, message),
            ServiceError::Forbidden => ApiError::new(ApiErrorCode::Forbidden, "Forbidden"),
            ServiceError::Store(detail) | ServiceError::Internal(detail) => {
                warn!("Internal error: {}", detail);
                ApiError::new(ApiErrorCode::InternalError, "Internal error")
            }
        }
    }
}

pub fn reject_service(error: ServiceError) -> Rejection {
    reject::custom(ApiError::from(error))
}
