//! # Engine Adapter
//!
//! Runs a compiled `jsonschema` validator and reshapes its flat error stream
//! into the [`Violation`] tree the translator consumes.
//!
//! ## Tree shape
//!
//! - No errors: `Ok(())`.
//! - One error: a leaf root.
//! - Several errors: a composite root at `#` whose children are the leaves,
//!   stably ordered by instance pointer. Failures on the document root
//!   therefore come before failures inside nested objects.
//!
//! ## Leaf fields
//!
//! | Field             | Source                                                  |
//! |-------------------|---------------------------------------------------------|
//! | `keyword`         | last non-index segment of the engine's schema path      |
//! | `schema_location` | `#` + schema path up to (excluding) the keyword         |
//! | `pointer`         | `#` + instance path                                     |
//! | `message`         | `required key [name] not found` for `required`, else the engine's text |

use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use reqschema_core::{Violation, ROOT_POINTER};
use serde_json::Value;

/// Validate `document`, returning the violation tree on failure.
pub fn check(validator: &Validator, document: &Value) -> Result<(), Violation> {
    let mut leaves: Vec<Violation> = validator.iter_errors(document).map(|e| leaf(&e)).collect();
    match leaves.len() {
        0 => Ok(()),
        1 => Err(leaves.remove(0)),
        _ => {
            leaves.sort_by(|a, b| a.pointer.cmp(&b.pointer));
            Err(Violation::composite(ROOT_POINTER, leaves))
        }
    }
}

fn leaf(error: &ValidationError<'_>) -> Violation {
    let schema_path = error.schema_path.to_string();
    let (schema_location, keyword) = split_keyword(&schema_path);
    let message = match &error.kind {
        ValidationErrorKind::Required { property } => {
            format!("required key [{}] not found", property_name(property))
        }
        _ => error.to_string(),
    };
    Violation {
        keyword,
        schema_location,
        pointer: format!("{ROOT_POINTER}{}", error.instance_path),
        message,
        causes: Vec::new(),
    }
}

/// `/properties/count/exclusiveMinimum` → (`#/properties/count`, `exclusiveMinimum`).
///
/// Trailing array indices (`/allOf/0`) are skipped when picking the keyword.
fn split_keyword(schema_path: &str) -> (String, Option<String>) {
    let segments: Vec<&str> = schema_path.split('/').filter(|s| !s.is_empty()).collect();
    let keyword_at = segments
        .iter()
        .rposition(|s| !s.chars().all(|c| c.is_ascii_digit()));
    match keyword_at {
        Some(i) => {
            let location: String = segments[..i].iter().map(|s| format!("/{s}")).collect();
            (format!("{ROOT_POINTER}{location}"), Some(segments[i].to_string()))
        }
        None => (ROOT_POINTER.to_string(), None),
    }
}

fn property_name(property: &Value) -> String {
    match property.as_str() {
        Some(name) => name.to_string(),
        None => property.to_string(),
    }
}
