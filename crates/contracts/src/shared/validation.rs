//! Validation rules for aggregate fields and query parameters

use serde::{Deserialize, Serialize};

/// Нарушение ограничения для одного поля
///
/// Ошибки тела запроса адресуются через `field`, ошибки параметров
/// запроса через `path`. В JSON попадает только заполненный ключ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl FieldError {
    /// Ошибка поля тела запроса
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(name.to_string()),
            path: None,
            message: message.into(),
        }
    }

    /// Ошибка параметра запроса
    pub fn path(name: &str, message: impl Into<String>) -> Self {
        Self {
            field: None,
            path: Some(name.to_string()),
            message: message.into(),
        }
    }

    /// Перенести ошибку поля в параметр запроса
    pub fn into_path(self) -> Self {
        Self {
            path: self.field.or(self.path),
            field: None,
            message: self.message,
        }
    }
}

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    /// Нижняя граница (включительно)
    pub min: Option<f64>,
    /// Нижняя граница (строго больше)
    pub exclusive_min: Option<f64>,
    /// Верхняя граница (включительно)
    pub max: Option<f64>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            exclusive_min: None,
            max: None,
            max_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn with_exclusive_min(mut self, min: f64) -> Self {
        self.exclusive_min = Some(min);
        self
    }

    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Validate a string value against the rules
    ///
    /// `None` допустим только для необязательного поля. Длина считается
    /// в символах, а не в байтах.
    pub fn validate_string(&self, value: Option<&str>, field: &str) -> Result<(), FieldError> {
        let value = match value {
            Some(v) => v,
            None if self.required => {
                return Err(FieldError::field(field, format!("{} must not be blank", field)))
            }
            None => return Ok(()),
        };

        if self.required && value.trim().is_empty() {
            return Err(FieldError::field(field, format!("{} must not be blank", field)));
        }

        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Err(FieldError::field(
                    field,
                    format!("{} must not exceed {} characters", field, max),
                ));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field: &str) -> Result<(), FieldError> {
        if value.is_nan() {
            return Err(FieldError::field(field, format!("{} must be a number", field)));
        }

        if let Some(min) = self.exclusive_min {
            if value <= min {
                return Err(FieldError::field(
                    field,
                    format!("{} must be greater than {}", field, min),
                ));
            }
        }

        if let Some(min) = self.min {
            if value < min {
                return Err(FieldError::field(
                    field,
                    format!("{} must be greater than or equal to {}", field, min),
                ));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(FieldError::field(
                    field,
                    format!("{} must be less than or equal to {}", field, max),
                ));
            }
        }

        Ok(())
    }

    /// Validate a required value that has no "blank" state (enums)
    pub fn validate_present<T>(&self, value: Option<&T>, field: &str) -> Result<(), FieldError> {
        if self.required && value.is_none() {
            return Err(FieldError::field(field, format!("{} must not be null", field)));
        }
        Ok(())
    }
}

/// Накопитель ошибок: проверки не прерываются на первой ошибке
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, result: Result<(), FieldError>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn into_result(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
