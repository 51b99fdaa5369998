//! Error types for the type validators
//!
//! Error codes:
//! - INVALID_VALUE (400)
//! - UNKNOWN_TYPE (400)
//! - DUPLICATE_SCHEMA (500)
//! - MALFORMED_SCHEMA (500)
//! - CONFIG_ERROR (500)

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Longest rendering of a rejected value kept in error messages.
const MAX_RENDERED_VALUE: usize = 64;

/// Result type for validation operations
pub type TypeResult<T> = Result<T, TypeError>;

/// The single failure raised by a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue {
    /// Rendering of the rejected input (truncated)
    pub value: String,
    /// Name of the type that rejected it (e.g. "Integer", "List(Text)")
    pub type_name: String,
    /// Field path for nested values (e.g. "restart_policy.name", "[1]")
    pub field: Option<String>,
    /// Why the value was rejected
    pub reason: String,
}

impl InvalidValue {
    pub fn new(
        value: impl Into<String>,
        type_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            value: truncate(value.into()),
            type_name: type_name.into(),
            field: None,
            reason: reason.into(),
        }
    }

    /// Prefixes the field path with an enclosing segment.
    ///
    /// Index segments (`[3]`) attach without a separating dot.
    pub fn within(mut self, segment: &str) -> Self {
        self.field = Some(match self.field.take() {
            None => segment.to_string(),
            Some(inner) if inner.starts_with('[') => format!("{}{}", segment, inner),
            Some(inner) => format!("{}.{}", segment, inner),
        });
        self
    }
}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value {} for type {}", self.value, self.type_name)?;
        if let Some(ref field) = self.field {
            write!(f, " at field '{}'", field)?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl std::error::Error for InvalidValue {}

fn truncate(mut value: String) -> String {
    if value.chars().count() > MAX_RENDERED_VALUE {
        value = value.chars().take(MAX_RENDERED_VALUE).collect();
        value.push_str("...");
    }
    value
}

/// Errors raised by validators, the registry, and the schema loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Input rejected by a validator
    #[error("{0}")]
    InvalidValue(#[from] InvalidValue),

    /// No validator registered under the requested name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A schema with the same name is already registered or saved
    #[error("Schema '{0}' already exists")]
    DuplicateSchema(String),

    /// Schema definition could not be read, parsed, or resolved
    #[error("Malformed schema '{path}': {reason}")]
    MalformedSchema { path: String, reason: String },

    /// Invalid validator configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TypeError {
    /// Shorthand for an `InvalidValue` error.
    pub fn invalid(
        value: impl Into<String>,
        type_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TypeError::InvalidValue(InvalidValue::new(value, type_name, reason))
    }

    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        TypeError::MalformedSchema {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TypeError::InvalidValue(_) => "INVALID_VALUE",
            TypeError::UnknownType(_) => "UNKNOWN_TYPE",
            TypeError::DuplicateSchema(_) => "DUPLICATE_SCHEMA",
            TypeError::MalformedSchema { .. } => "MALFORMED_SCHEMA",
            TypeError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status an API layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            TypeError::InvalidValue(_) | TypeError::UnknownType(_) => 400,
            TypeError::DuplicateSchema(_)
            | TypeError::MalformedSchema { .. }
            | TypeError::Config(_) => 500,
        }
    }

    /// Returns the validation details if this is an `InvalidValue`.
    pub fn details(&self) -> Option<&InvalidValue> {
        match self {
            TypeError::InvalidValue(details) => Some(details),
            _ => None,
        }
    }

    /// Adds an enclosing field segment to an `InvalidValue`; other errors pass through.
    pub fn within(self, segment: &str) -> Self {
        match self {
            TypeError::InvalidValue(details) => TypeError::InvalidValue(details.within(segment)),
            other => other,
        }
    }
}

/// Client-facing error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl From<&TypeError> for ErrorResponse {
    fn from(err: &TypeError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
            status: err.status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TypeError::invalid("1", "Text", "not text").code(), "INVALID_VALUE");
        assert_eq!(TypeError::UnknownType("X".into()).code(), "UNKNOWN_TYPE");
        assert_eq!(TypeError::DuplicateSchema("X".into()).code(), "DUPLICATE_SCHEMA");
        assert_eq!(TypeError::malformed_schema("a.json", "bad").code(), "MALFORMED_SCHEMA");
        assert_eq!(TypeError::Config("bad".into()).code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(TypeError::invalid("1", "Text", "not text").status_code(), 400);
        assert_eq!(TypeError::UnknownType("X".into()).status_code(), 400);
        assert_eq!(TypeError::Config("bad".into()).status_code(), 500);
    }

    #[test]
    fn test_nested_field_path() {
        let err = InvalidValue::new("\"***\"", "ContainerName", "bad pattern")
            .within("name")
            .within("[2]")
            .within("containers");
        assert_eq!(err.field.as_deref(), Some("containers[2].name"));

        let display = err.to_string();
        assert!(display.contains("ContainerName"));
        assert!(display.contains("containers[2].name"));
    }

    #[test]
    fn test_long_values_truncated() {
        let err = InvalidValue::new("a".repeat(300), "String", "too long");
        assert!(err.value.len() < 100);
        assert!(err.value.ends_with("..."));
    }

    #[test]
    fn test_within_ignores_non_validation_errors() {
        let err = TypeError::UnknownType("Foo".into()).within("field");
        assert_eq!(err, TypeError::UnknownType("Foo".into()));
    }

    #[test]
    fn test_error_response() {
        let err = TypeError::invalid("2", "Bool", "not a boolean");
        let body = ErrorResponse::from(&err);
        assert_eq!(body.status, 400);
        assert_eq!(body.code, "INVALID_VALUE");
        assert!(body.error.contains("Bool"));
    }
}
