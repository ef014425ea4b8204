#![deny(missing_docs)]

//! # reqschema-core — Schema-Driven Request Validation Core
//!
//! The pure half of request validation: everything here is a function of its
//! inputs, performs no I/O, and holds no shared state. Loading schema
//! documents and running the JSON Schema engine live in `reqschema-schema`;
//! the HTTP surface lives in `reqschema-api`.
//!
//! ## Pieces
//!
//! 1. **Schema Locator** ([`locator`]). Maps a handler's declaring type and
//!    method name (or an explicit override) to a [`SchemaDescriptor`] such as
//!    `/boxcontroller#register.json`.
//!
//! 2. **Violation Translator** ([`translate`]). Walks a [`Violation`] tree
//!    produced by the schema engine and contributes field-level and global
//!    entries to an [`ErrorSink`], recovering field names with
//!    keyword-specific heuristics.
//!
//! 3. **Error Sink** ([`sink`]). The accumulating [`BindingErrors`] structure
//!    that request handlers and error renderers read back.

pub mod locator;
pub mod sink;
pub mod translate;
pub mod violation;

// Re-export primary types at crate root for ergonomic imports.
pub use locator::{locate, ConventionResolver, EndpointSchema, SchemaDescriptor, SchemaResolver};
pub use sink::{BindingErrors, ErrorSink, FieldError, GlobalError};
pub use translate::{translate, EXCLUSIVE_MINIMUM, FIELD_IS_REQUIRED, REJECT, REQUIRED_FIELD};
pub use violation::{Violation, ROOT_POINTER};
