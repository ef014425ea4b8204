//! # Application State
//!
//! Shared state for the Axum application. Handlers reach the
//! [`RequestValidator`] through [`SchemaJson`](crate::extractors::SchemaJson),
//! which pulls it out of the state with `FromRef`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;
use reqschema_schema::{DirectorySource, RequestValidator, SchemaLoader};

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Directory holding the schema documents, relative to the working
    /// directory unless absolute.
    pub schema_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            schema_root: PathBuf::from("schemas"),
        }
    }
}

impl AppConfig {
    /// Read `PORT` and `SCHEMA_ROOT` from the environment, falling back to
    /// the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring invalid PORT");
                defaults.port
            }),
            None => defaults.port,
        };
        let schema_root = lookup("SCHEMA_ROOT")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.schema_root);
        Self { port, schema_root }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub validator: Arc<RequestValidator>,
    pub config: AppConfig,
}

impl AppState {
    /// State serving schemas from `config.schema_root`.
    pub fn new(config: AppConfig) -> Self {
        let loader = SchemaLoader::new(DirectorySource::new(&config.schema_root));
        Self::with_validator(config, RequestValidator::new(loader))
    }

    /// State with a caller-supplied validator.
    pub fn with_validator(config: AppConfig, validator: RequestValidator) -> Self {
        Self {
            validator: Arc::new(validator),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<RequestValidator> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.schema_root, PathBuf::from("schemas"));
        assert!(config.schema_root.is_relative());
    }

    #[test]
    fn reads_port_and_schema_root() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", "9090"), ("SCHEMA_ROOT", "/srv/schemas")]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.schema_root, PathBuf::from("/srv/schemas"));
    }

    #[test]
    fn invalid_or_missing_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", "eighty"), ("SCHEMA_ROOT", "")]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn validator_is_shared() {
        let state = AppState::new(AppConfig::default());
        let a = Arc::<RequestValidator>::from_ref(&state);
        let b = Arc::<RequestValidator>::from_ref(&state.clone());
        assert!(Arc::ptr_eq(&a, &b));
    }
}
