//! # Schema Locator
//!
//! Derives the identity of the JSON Schema document that guards a handler.
//!
//! ## Convention
//!
//! ```text
//! explicit override "p"      → /p.json
//! type BoxController, method → /boxcontroller#register.json
//! ```
//!
//! The declaring type name is lowercased; the method name is kept verbatim.
//! Overloads are not distinguished: two handlers with the same name on the
//! same type share one schema document.
//!
//! Location never fails and never touches storage. Whether the document
//! exists is discovered when it is loaded.

use serde::{Deserialize, Serialize};

/// The resolved location of a JSON Schema document, e.g.
/// `/boxcontroller#register.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaDescriptor(String);

impl SchemaDescriptor {
    /// Access the full descriptor string, including the leading `/`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The descriptor relative to the resource namespace root
    /// (no leading `/`), suitable for joining onto a directory.
    pub fn resource_name(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl std::fmt::Display for SchemaDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve the schema descriptor for a handler.
///
/// A non-empty `explicit_override` wins; an empty override is treated as
/// absent.
pub fn locate(
    declaring_type: &str,
    method: &str,
    explicit_override: Option<&str>,
) -> SchemaDescriptor {
    match explicit_override.filter(|p| !p.is_empty()) {
        Some(path) => SchemaDescriptor(format!("/{path}.json")),
        None => SchemaDescriptor(format!(
            "/{}#{}.json",
            declaring_type.to_lowercase(),
            method
        )),
    }
}

/// Per-endpoint validation settings supplied by the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSchema {
    /// Simple name of the type that declares the handler.
    pub declaring_type: String,
    /// Handler method name.
    pub method: String,
    /// Explicit schema path, overriding the naming convention.
    pub schema_path: Option<String>,
    /// Escalate new errors to a failure instead of handing them to the handler.
    pub strict: bool,
    /// Name under which binding errors are reported.
    pub object_name: String,
}

impl EndpointSchema {
    /// Settings for `declaring_type::method`: strict, convention-located,
    /// errors reported under `request`.
    pub fn new(declaring_type: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            method: method.into(),
            schema_path: None,
            strict: true,
            object_name: "request".to_string(),
        }
    }

    /// Settings for a handler declared on `T`, using the simple name of `T`.
    pub fn of<T: ?Sized>(method: impl Into<String>) -> Self {
        Self::new(simple_type_name::<T>(), method)
    }

    /// Override the conventional schema location.
    pub fn with_schema_path(mut self, path: impl Into<String>) -> Self {
        self.schema_path = Some(path.into());
        self
    }

    /// Choose between strict and lax handling of validation errors.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Report binding errors under a different object name.
    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = name.into();
        self
    }

    /// The descriptor this endpoint resolves to under the naming convention.
    pub fn descriptor(&self) -> SchemaDescriptor {
        locate(&self.declaring_type, &self.method, self.schema_path.as_deref())
    }
}

/// Maps an endpoint to the schema document that guards it.
pub trait SchemaResolver: Send + Sync {
    /// Resolve the schema descriptor for `endpoint`.
    fn resolve(&self, endpoint: &EndpointSchema) -> SchemaDescriptor;
}

/// The default resolver: explicit path if set, otherwise
/// `/{type lowercased}#{method}.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionResolver;

impl SchemaResolver for ConventionResolver {
    fn resolve(&self, endpoint: &EndpointSchema) -> SchemaDescriptor {
        endpoint.descriptor()
    }
}

/// `a::b::Name<c::D>` → `Name`.
fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Without an override the descriptor is exactly `/lower(type)#method.json`.
        #[test]
        fn convention_shape(ty in "[A-Za-z][A-Za-z0-9_]{0,24}", method in "[a-z][A-Za-z0-9_]{0,24}") {
            let d = locate(&ty, &method, None);
            prop_assert_eq!(d.as_str(), format!("/{}#{}.json", ty.to_lowercase(), method));
        }

        /// A non-empty override ignores type and method entirely.
        #[test]
        fn override_shape(
            ty in "[A-Za-z]{1,12}",
            method in "[a-z]{1,12}",
            path in "[a-z0-9/_#-]{1,32}",
        ) {
            let d = locate(&ty, &method, Some(&path));
            prop_assert_eq!(d.as_str(), format!("/{path}.json"));
        }

        /// Location is a pure function of its inputs.
        #[test]
        fn deterministic(ty in "[A-Za-z]{1,12}", method in "[a-z]{1,12}") {
            prop_assert_eq!(locate(&ty, &method, None), locate(&ty, &method, None));
        }
    }
}
