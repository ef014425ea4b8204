//! # Violation Translator
//!
//! Best-effort conversion of a schema [`Violation`] tree into entries of an
//! [`ErrorSink`]. Translation never fails: unrecognised shapes degrade to a
//! generic rejection or, for a lone leaf with an unmapped keyword, to no
//! entry at all.
//!
//! ## Rules
//!
//! 1. Root keyword `exclusiveMinimum` → field error `exclusive-minimum`,
//!    field = last segment of the schema location.
//! 2. Root keyword `required` → field error `required-field`, field = text
//!    between the first `[` and the first `]` of the message.
//! 3. Each direct child (one level only): a message starting with
//!    `required key` is handled as in rule 2; anything else adds a global
//!    `reject` error carrying the **root's** message.
//!
//! A root whose keyword is neither of the above and which has no children
//! contributes nothing. Callers that need to notice this compare the sink's
//! error count against a baseline.

use crate::sink::ErrorSink;
use crate::violation::Violation;

/// Code for a missing required property.
pub const REQUIRED_FIELD: &str = "required-field";

/// Code for a value at or below an exclusive minimum.
pub const EXCLUSIVE_MINIMUM: &str = "exclusive-minimum";

/// Code for any failure without a dedicated mapping.
pub const REJECT: &str = "reject";

/// Message attached to every `required-field` error.
pub const FIELD_IS_REQUIRED: &str = "Field is required";

const REQUIRED_KEYWORD: &str = "required";
const EXCLUSIVE_MINIMUM_KEYWORD: &str = "exclusiveMinimum";
const REQUIRED_MESSAGE_PREFIX: &str = "required key";

/// Contribute the errors described by `root` to `sink`.
///
/// Calling this twice with the same violation on two fresh sinks yields
/// identical sink contents.
pub fn translate<S: ErrorSink + ?Sized>(root: &Violation, sink: &mut S) {
    if root.has_keyword(EXCLUSIVE_MINIMUM_KEYWORD) {
        match last_segment(&root.schema_location) {
            Some(field) => sink.add_field_error(field, EXCLUSIVE_MINIMUM, &root.message),
            None => sink.add_global_error(EXCLUSIVE_MINIMUM, &root.message),
        }
    }
    if root.has_keyword(REQUIRED_KEYWORD) {
        reject_required(root, sink);
    }
    for cause in &root.causes {
        if cause.message.starts_with(REQUIRED_MESSAGE_PREFIX) {
            reject_required(cause, sink);
            continue;
        }
        sink.add_global_error(REJECT, &root.message);
    }
}

/// Record a `required-field` error for the property named in brackets.
///
/// Messages without a usable bracket pair fall back to a global rejection
/// with the violation's own message.
fn reject_required<S: ErrorSink + ?Sized>(violation: &Violation, sink: &mut S) {
    match bracketed(&violation.message) {
        Some(field) => sink.add_field_error(field, REQUIRED_FIELD, FIELD_IS_REQUIRED),
        None => sink.add_global_error(REJECT, &violation.message),
    }
}

/// Text strictly between the first `[` and the first `]`.
fn bracketed(message: &str) -> Option<&str> {
    let open = message.find('[')?;
    let close = message.find(']')?;
    if close < open {
        return None;
    }
    Some(&message[open + 1..close])
}

/// `#/properties/count` → `count`; `#` → `#`; empty → `None`.
fn last_segment(location: &str) -> Option<&str> {
    location.split('/').filter(|s| !s.is_empty()).last()
}
