//! # Error Sink
//!
//! The accumulating structure of field-scoped and global validation errors.
//! Translation only appends; callers compare [`ErrorSink::error_count`]
//! before and after a validation pass to learn whether anything was added.

use serde::{Deserialize, Serialize};

/// Destination for translated validation errors.
pub trait ErrorSink {
    /// Record an error scoped to the named field.
    fn add_field_error(&mut self, field: &str, code: &str, message: &str);

    /// Record an error that is not tied to a single field.
    fn add_global_error(&mut self, code: &str, message: &str);

    /// Total number of errors recorded so far.
    fn error_count(&self) -> usize;
}

/// An error attached to a named field of the bound payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as recovered from the violation.
    pub field: String,
    /// Machine-readable error code, e.g. `required-field`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// An error about the payload as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalError {
    /// Machine-readable error code, e.g. `reject`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Binding errors collected for one bound request payload.
///
/// Field and global errors are kept in separate lists, each in insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingErrors {
    object_name: String,
    field_errors: Vec<FieldError>,
    global_errors: Vec<GlobalError>,
}

impl BindingErrors {
    /// Create an empty error collection for the named payload object.
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            field_errors: Vec::new(),
            global_errors: Vec::new(),
        }
    }

    /// Name of the payload object these errors belong to.
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Field errors in insertion order.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Global errors in insertion order.
    pub fn global_errors(&self) -> &[GlobalError] {
        &self.global_errors
    }

    /// First error recorded for `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.field == field)
    }

    /// Whether any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

impl ErrorSink for BindingErrors {
    fn add_field_error(&mut self, field: &str, code: &str, message: &str) {
        self.field_errors.push(FieldError {
            field: field.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    fn add_global_error(&mut self, code: &str, message: &str) {
        self.global_errors.push(GlobalError {
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    fn error_count(&self) -> usize {
        self.field_errors.len() + self.global_errors.len()
    }
}
