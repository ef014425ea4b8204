//! # Validation Errors
//!
//! The two exceptional outcomes of request validation. Everything else,
//! including a lax endpoint that collected errors, is a normal return.

use reqschema_core::{BindingErrors, ErrorSink, SchemaDescriptor};
use thiserror::Error;

/// Errors returned by [`RequestValidator::validate`](crate::RequestValidator::validate).
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema document could not be fetched, parsed, or compiled.
    #[error("unable to load JSON schema from {descriptor}: {reason}")]
    SchemaUnavailable {
        /// The descriptor that failed to load.
        descriptor: SchemaDescriptor,
        /// Loader-level reason. Not meant for API consumers.
        reason: String,
    },

    /// A strict endpoint gained errors during validation.
    #[error("request failed schema validation with {} error(s)", .0.error_count())]
    StrictValidation(BindingErrors),
}

impl SchemaValidationError {
    pub(crate) fn unavailable(descriptor: &SchemaDescriptor, reason: impl ToString) -> Self {
        Self::SchemaUnavailable {
            descriptor: descriptor.clone(),
            reason: reason.to_string(),
        }
    }
}
