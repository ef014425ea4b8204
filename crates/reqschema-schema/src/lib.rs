//! # reqschema-schema — Schema Loading & Request Validation
//!
//! Loads JSON Schema documents from a pluggable [`SchemaSource`], runs the
//! `jsonschema` engine against request payloads, and feeds failures through
//! the translator in `reqschema-core`.
//!
//! ## Pipeline
//!
//! ```text
//! EndpointSchema ─resolve→ SchemaDescriptor ─fetch→ bytes ─compile→ Validator
//!                                                                     │
//! payload ───────────────────────────────────────────────── check ────┘
//!                                                                     │
//!                                       Violation tree ─translate→ BindingErrors
//! ```
//!
//! [`RequestValidator::validate`] drives the whole pipeline and applies the
//! endpoint's strict/lax policy.
//!
//! ## Failure modes
//!
//! - A schema document that cannot be fetched, parsed, or compiled is
//!   [`SchemaValidationError::SchemaUnavailable`]. It is never treated as
//!   "validation passed".
//! - A strict endpoint whose error count grew yields
//!   [`SchemaValidationError::StrictValidation`] carrying every error.

pub mod engine;
pub mod error;
pub mod loader;
pub mod source;
pub mod validator;

pub use engine::check;
pub use error::SchemaValidationError;
pub use loader::SchemaLoader;
pub use source::{DirectorySource, SchemaSource, SourceError, StaticSource};
pub use validator::{RequestValidator, ValidationOutcome};

/// Box payload schema shared by the tests in this crate.
#[cfg(test)]
pub(crate) const BOX_SCHEMA: &str = r##"{
    "$schema": "http://json-schema.org/draft-06/schema#",
    "type": "object",
    "properties": {
        "id": { "type": "integer" },
        "name": { "type": "string", "maxLength": 40 },
        "count": { "type": "integer", "exclusiveMinimum": 0 },
        "inner": {
            "type": "object",
            "properties": {
                "innerId": { "type": "string" },
                "innerName": { "type": "string" }
            },
            "required": ["innerId", "innerName"]
        }
    },
    "required": ["count"]
}"##;
