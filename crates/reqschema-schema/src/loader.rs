//! # Schema Loader
//!
//! Fetches a schema document through a [`SchemaSource`] and compiles it into
//! a `jsonschema` [`Validator`]. Documents are compiled as Draft 6 unless a
//! different draft is configured.
//!
//! Loading happens on every request. Nothing is cached, so edits to a
//! [`DirectorySource`](crate::DirectorySource) are picked up immediately.

use std::sync::Arc;

use jsonschema::{Draft, Validator};
use reqschema_core::SchemaDescriptor;
use serde_json::Value;

use crate::error::SchemaValidationError;
use crate::source::SchemaSource;

/// Turns descriptors into compiled validators.
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    source: Arc<dyn SchemaSource>,
    draft: Draft,
}

impl SchemaLoader {
    /// Load documents from `source`, compiling them as Draft 6.
    pub fn new(source: impl SchemaSource + 'static) -> Self {
        Self::shared(Arc::new(source))
    }

    /// Load documents from an already shared source.
    pub fn shared(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            draft: Draft::Draft6,
        }
    }

    /// Compile documents against `draft` instead of Draft 6.
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = draft;
        self
    }

    /// The draft documents are compiled against.
    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// Fetch, parse, and compile the document named by `descriptor`.
    ///
    /// Every failure maps to [`SchemaValidationError::SchemaUnavailable`].
    pub fn load(&self, descriptor: &SchemaDescriptor) -> Result<Validator, SchemaValidationError> {
        let bytes = self.source.fetch(descriptor).map_err(|e| {
            tracing::warn!(descriptor = %descriptor, error = %e, "schema document unavailable");
            SchemaValidationError::unavailable(descriptor, e)
        })?;

        let raw: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(descriptor = %descriptor, error = %e, "schema document is not valid JSON");
            SchemaValidationError::unavailable(descriptor, format!("malformed JSON: {e}"))
        })?;

        jsonschema::options()
            .with_draft(self.draft)
            .build(&raw)
            .map_err(|e| {
                tracing::warn!(descriptor = %descriptor, error = %e, "schema document failed to compile");
                SchemaValidationError::unavailable(descriptor, format!("compile error: {e}"))
            })
    }
}
