use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{RaceError, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Race(RaceError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    Forbidden,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Race(e) => write!(f, "{}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Forbidden => write!(f, "Forbidden"),
        }
    }
}

fn storage_status(error: &StorageError) -> StatusCode {
    match error {
        StorageError::NotFound => StatusCode::NOT_FOUND,
        StorageError::ConstraintViolation(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn storage_body(error: &StorageError) -> serde_json::Value {
    match error {
        StorageError::NotFound => json!({
            "error": "Resource not found",
            "code": "not_found"
        }),
        StorageError::ConstraintViolation(msg) => json!({
            "error": msg,
            "code": "constraint_violation"
        }),
        e => {
            tracing::error!("Storage error: {:?}", e);
            json!({
                "error": "An internal error occurred",
                "code": "storage_failure"
            })
        }
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(e) | Self::Race(RaceError::Storage(e)) => storage_status(e),
            Self::Race(RaceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Race(RaceError::EligibilityMismatch) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Race(RaceError::InvalidRank) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Race(RaceError::CapacityExceeded)
            | Self::Race(RaceError::DuplicateRegistration)
            | Self::Race(RaceError::RegistrationClosed) => StatusCode::CONFLICT,
            Self::Race(RaceError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(e) | Self::Race(RaceError::Storage(e)) => storage_body(e),
            Self::Race(RaceError::Validation(details)) => {
                json!({
                    "error": "Validation failed",
                    "code": "validation_error",
                    "details": details
                })
            }
            Self::Race(e) => {
                json!({
                    "error": e.to_string(),
                    "code": e.code()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "code": "validation_error",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg,
                    "code": "bad_request"
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized",
                    "code": "unauthorized"
                })
            }
            Self::Forbidden => {
                json!({
                    "error": "This API key may not perform this action",
                    "code": "forbidden"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<RaceError> for WebError {
    fn from(error: RaceError) -> Self {
        Self::Race(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
