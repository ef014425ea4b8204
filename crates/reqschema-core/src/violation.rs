//! # Violation Tree
//!
//! A [`Violation`] is one node of the failure tree a schema engine reports
//! for a single validation call. Leaf nodes describe one failing keyword;
//! a composite root exists only to aggregate its direct children and
//! carries no keyword of its own.

use serde::{Deserialize, Serialize};

/// Instance pointer of the document root.
pub const ROOT_POINTER: &str = "#";

/// A single schema-validation failure, possibly aggregating nested failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The failing JSON Schema keyword (`required`, `exclusiveMinimum`, ...).
    /// Absent on composite roots.
    pub keyword: Option<String>,
    /// Slash-delimited location of the schema subtree that failed,
    /// e.g. `#/properties/count`.
    pub schema_location: String,
    /// Location of the offending value in the validated document, e.g. `#/inner`.
    pub pointer: String,
    /// Human-readable description without the pointer prefix.
    pub message: String,
    /// Child failures, in the order the engine reported them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<Violation>,
}

impl Violation {
    /// Create a leaf violation anchored at the document root.
    pub fn leaf(
        keyword: impl Into<String>,
        schema_location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            keyword: Some(keyword.into()),
            schema_location: schema_location.into(),
            pointer: ROOT_POINTER.to_string(),
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// Create a composite violation whose direct children are `causes`.
    ///
    /// The message follows the `"{n} schema violations found"` convention,
    /// where `n` counts leaves across all children.
    pub fn composite(pointer: impl Into<String>, causes: Vec<Violation>) -> Self {
        let count: usize = causes.iter().map(Violation::violation_count).sum();
        Self {
            keyword: None,
            schema_location: ROOT_POINTER.to_string(),
            pointer: pointer.into(),
            message: format!("{count} schema violations found"),
            causes,
        }
    }

    /// Set the instance pointer this violation refers to.
    pub fn at(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = pointer.into();
        self
    }

    /// Whether this node's keyword equals `keyword`.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword.as_deref() == Some(keyword)
    }

    /// The message prefixed with the instance pointer, e.g.
    /// `#/inner: required key [innerId] not found`.
    pub fn full_message(&self) -> String {
        format!("{}: {}", self.pointer, self.message)
    }

    /// Number of leaf failures under this node (a leaf counts itself).
    pub fn violation_count(&self) -> usize {
        if self.causes.is_empty() {
            1
        } else {
            self.causes.iter().map(Violation::violation_count).sum()
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_message())
    }
}
