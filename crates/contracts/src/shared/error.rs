//! Тела ответов об ошибках (HTTP 400/409)

use serde::{Deserialize, Serialize};

use super::validation::FieldError;

/// Ошибка валидации: список нарушений по полям
///
/// `{"status":400,"error":"Validation failed","errors":[{"field":"name","message":"..."}]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub status: u16,
    pub error: String,
    pub errors: Vec<FieldError>,
}

/// Ошибка с одним сообщением (недопустимый аргумент, конфликт)
///
/// `{"status":400,"error":"Invalid request","message":"..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}
