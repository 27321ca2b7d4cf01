//! Error types for the section engine

use thiserror::Error;
use vitae_fields::FieldsError;

/// Result type for section operations
pub type Result<T> = std::result::Result<T, SectionError>;

/// Errors that can occur in section operations
#[derive(Debug, Error)]
pub enum SectionError {
    /// Section not found
    #[error("section not found: {id}")]
    SectionNotFound { id: String },

    /// Entry not found within the addressed section
    #[error("entry not found: {id}")]
    EntryNotFound { id: String },

    /// Section allows a single entry and already has one
    #[error("section '{section}' allows only one entry")]
    Capacity { section: String },

    /// Custom section has no fields and cannot be persisted
    #[error("section '{section}' has an empty field schema")]
    EmptySchema { section: String },

    /// Two order assignments collided, or a permutation does not match
    /// the current entry set
    #[error("order conflict in section '{section}': {message}")]
    OrderConflict { section: String, message: String },

    /// A reorder commit is already in flight for this section
    #[error("reorder busy - a commit is in flight for section '{section}'")]
    ReorderBusy { section: String },

    /// Gesture API called out of sequence (e.g. drop without a drag)
    #[error("invalid reorder gesture for section '{section}': {message}")]
    InvalidGesture { section: String, message: String },

    /// The persistence collaborator failed or timed out
    #[error("persistence failure: {message}")]
    Persistence { message: String },

    /// Field schema or value error
    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// IO error (file-backed persistence)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SectionError {
    /// Create a section-not-found error
    pub fn section_not_found(id: impl ToString) -> Self {
        Self::SectionNotFound { id: id.to_string() }
    }

    /// Create an entry-not-found error
    pub fn entry_not_found(id: impl ToString) -> Self {
        Self::EntryNotFound { id: id.to_string() }
    }

    /// Create an order conflict error
    pub fn order_conflict(section: impl ToString, message: impl Into<String>) -> Self {
        Self::OrderConflict {
            section: section.to_string(),
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Check if this is a retryable error. Capacity and schema errors
    /// never clear on retry; a failed persistence call or a busy
    /// reorder might.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::ReorderBusy { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SectionError::entry_not_found("01ARZ");
        assert_eq!(err.to_string(), "entry not found: 01ARZ");
    }

    #[test]
    fn test_capacity_display() {
        let err = SectionError::Capacity {
            section: "Languages".into(),
        };
        assert!(err.to_string().contains("Languages"));
    }

    #[test]
    fn test_retryable() {
        assert!(SectionError::persistence("timeout").is_retryable());
        assert!(SectionError::ReorderBusy {
            section: "work".into()
        }
        .is_retryable());
        assert!(!SectionError::entry_not_found("x").is_retryable());
        assert!(!SectionError::Capacity {
            section: "x".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_fields_error_converts() {
        let err: SectionError = FieldsError::schema("field name cannot be empty").into();
        assert!(matches!(err, SectionError::Fields(_)));
    }
}
