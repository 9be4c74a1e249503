//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose `details` name the
//! offending field, carry a machine-readable reason, and echo the value when
//! that helps the client.

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, MealValidationError, RegistrationValidationError,
};

/// Validation reason codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReasonCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidTime,
    InvalidValue,
}

impl ReasonCode {
    fn as_str(self) -> &'static str {
        match self {
            ReasonCode::MissingField => "missing_field",
            ReasonCode::InvalidUuid => "invalid_uuid",
            ReasonCode::InvalidDate => "invalid_date",
            ReasonCode::InvalidTime => "invalid_time",
            ReasonCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct FieldError {
    field: &'static str,
    message: String,
}

impl FieldError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ReasonCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ReasonCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    FieldError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(ReasonCode::MissingField)
}

/// Unwrap a required request field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Map a meal validation failure onto the request field it concerns.
///
/// Fields are reported under their wire names, so `time` stays `time` even
/// when the client used the `hour` alias.
pub(crate) fn meal_validation_error(err: MealValidationError) -> Error {
    let field = FieldName::new(err.field());
    let code = match &err {
        MealValidationError::MalformedDate { .. } => ReasonCode::InvalidDate,
        MealValidationError::MalformedTime { .. } => ReasonCode::InvalidTime,
        MealValidationError::InvalidId { .. } => ReasonCode::InvalidUuid,
        MealValidationError::EmptyName | MealValidationError::NameTooLong { .. } => {
            ReasonCode::InvalidValue
        }
    };
    let builder = FieldError::new(field, err.to_string());
    match err.value() {
        Some(value) => builder.with_value(code, value),
        None => builder.with_code(code),
    }
}

pub(crate) fn registration_validation_error(err: RegistrationValidationError) -> Error {
    let field = match &err {
        RegistrationValidationError::InvalidName(_) => FieldName::new("name"),
        RegistrationValidationError::InvalidEmail(_) => FieldName::new("email"),
        RegistrationValidationError::EmptyPassword => FieldName::new("password"),
    };
    FieldError::new(field, err.to_string()).with_code(ReasonCode::InvalidValue)
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    let field = match &err {
        LoginValidationError::InvalidEmail(_) => FieldName::new("email"),
        LoginValidationError::EmptyPassword => FieldName::new("password"),
    };
    FieldError::new(field, err.to_string()).with_code(ReasonCode::InvalidValue)
}
