//! Error types for the field schema model

use thiserror::Error;

/// Result type for field schema operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur when validating schemas or coercing values
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Malformed field definition; fails fast, never persisted
    #[error("invalid field definition: {message}")]
    Schema { message: String },

    /// Submitted value is structurally incompatible with the field kind
    #[error("value of type {found} is not valid for a {kind} field")]
    ValueType { kind: String, found: String },
}

impl FieldsError {
    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a value-type error
    pub fn value_type(kind: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ValueType {
            kind: kind.into(),
            found: found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = FieldsError::schema("name cannot be empty");
        assert_eq!(
            err.to_string(),
            "invalid field definition: name cannot be empty"
        );
    }

    #[test]
    fn test_value_type_error_display() {
        let err = FieldsError::value_type("text", "object");
        assert!(err.to_string().contains("text"));
        assert!(err.to_string().contains("object"));
    }
}
