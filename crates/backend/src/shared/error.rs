use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::error::{MessageErrorResponse, ValidationErrorResponse};
use contracts::shared::validation::FieldError;
use thiserror::Error;

/// Ошибки API
///
/// Каждый вариант однозначно отображается на HTTP-статус и тело ответа.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Нарушены ограничения полей тела запроса
    #[error("Validation failed: {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Нарушены ограничения query-параметров
    #[error("Constraint violation: {} error(s)", .0.len())]
    ConstraintViolation(Vec<FieldError>),

    /// Нарушено бизнес-правило (например, min > max)
    #[error("Invalid request: {0}")]
    InvalidArgument(String),

    /// Конфликт с существующими данными (дубликат имени коллекции)
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found")]
    NotFound,

    /// Ошибка хранилища или иная непредвиденная ошибка
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::ConstraintViolation(_)
            | ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => (
                status,
                Json(ValidationErrorResponse {
                    status: status.as_u16(),
                    error: "Validation failed".into(),
                    errors,
                }),
            )
                .into_response(),
            ApiError::ConstraintViolation(errors) => (
                status,
                Json(ValidationErrorResponse {
                    status: status.as_u16(),
                    error: "Constraint violation".into(),
                    errors: errors.into_iter().map(FieldError::into_path).collect(),
                }),
            )
                .into_response(),
            ApiError::InvalidArgument(message) => (
                status,
                Json(MessageErrorResponse {
                    status: status.as_u16(),
                    error: "Invalid request".into(),
                    message,
                }),
            )
                .into_response(),
            ApiError::Conflict(message) => (
                status,
                Json(MessageErrorResponse {
                    status: status.as_u16(),
                    error: "Conflict".into(),
                    message,
                }),
            )
                .into_response(),
            ApiError::NotFound => status.into_response(),
            ApiError::Internal(e) => {
                tracing::error!("Unhandled error: {:#}", e);
                status.into_response()
            }
        }
    }
}
