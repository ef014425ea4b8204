//! # Request Validator
//!
//! The per-request pipeline: resolve the endpoint's schema, load it, check
//! the payload, translate failures into the caller's [`BindingErrors`], and
//! apply the endpoint's strict/lax policy.
//!
//! The caller binds the payload first, so any binding errors already in the
//! sink form the baseline. Only errors added by this pass count towards the
//! strict decision.

use std::sync::Arc;

use reqschema_core::{
    translate, BindingErrors, ConventionResolver, EndpointSchema, ErrorSink, SchemaResolver,
};
use serde_json::Value;

use crate::engine;
use crate::error::SchemaValidationError;
use crate::loader::SchemaLoader;

/// Result of a validation pass that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No errors were added.
    Clean,
    /// A lax endpoint gained errors; the handler decides what to do with them.
    Rejected {
        /// Number of errors this pass added to the sink.
        added: usize,
    },
}

impl ValidationOutcome {
    /// Whether the pass added no errors.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

/// Validates request payloads against per-endpoint JSON schemas.
#[derive(Clone)]
pub struct RequestValidator {
    resolver: Arc<dyn SchemaResolver>,
    loader: SchemaLoader,
}

impl std::fmt::Debug for RequestValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestValidator")
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

impl RequestValidator {
    /// A validator using the naming-convention resolver.
    pub fn new(loader: SchemaLoader) -> Self {
        Self {
            resolver: Arc::new(ConventionResolver),
            loader,
        }
    }

    /// Replace the schema resolver.
    pub fn with_resolver(mut self, resolver: impl SchemaResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Validate `document` for `endpoint`, appending errors to `errors`.
    ///
    /// # Errors
    ///
    /// - [`SchemaValidationError::SchemaUnavailable`] if the schema cannot be
    ///   loaded. `errors` is left untouched.
    /// - [`SchemaValidationError::StrictValidation`] if the endpoint is strict
    ///   and this pass added at least one error. The variant carries a copy of
    ///   the full sink, pre-existing errors included.
    pub fn validate(
        &self,
        endpoint: &EndpointSchema,
        document: &Value,
        errors: &mut BindingErrors,
    ) -> Result<ValidationOutcome, SchemaValidationError> {
        let baseline = errors.error_count();
        let descriptor = self.resolver.resolve(endpoint);
        tracing::debug!(
            descriptor = %descriptor,
            handler = %format!("{}::{}", endpoint.declaring_type, endpoint.method),
            "validating request payload"
        );

        let schema = self.loader.load(&descriptor)?;
        if let Err(violation) = engine::check(&schema, document) {
            tracing::debug!(
                descriptor = %descriptor,
                violations = violation.violation_count(),
                "request payload violates schema"
            );
            translate(&violation, errors);
        }

        let added = errors.error_count() - baseline;
        if added == 0 {
            return Ok(ValidationOutcome::Clean);
        }
        if endpoint.strict {
            tracing::info!(descriptor = %descriptor, added, "rejecting request on strict endpoint");
            return Err(SchemaValidationError::StrictValidation(errors.clone()));
        }
        Ok(ValidationOutcome::Rejected { added })
    }
}
