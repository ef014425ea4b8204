//! # API Error Types
//!
//! [`AppError`] implements `axum::response::IntoResponse`, rendering every
//! failure as the structured [`ApiError`] body:
//!
//! ```json
//! { "meta":  { "code": 422 },
//!   "error": { "message": null, "code": null,
//!              "validation": { "global": [{ "code": "...", "message": "..." }],
//!                              "field":  [{ "name": "...", "code": "...", "message": "..." }] } } }
//! ```
//!
//! Empty `global`/`field` arrays are omitted. Loader details behind an
//! unavailable schema are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqschema_core::{BindingErrors, ErrorSink};
use reqschema_schema::SchemaValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Global error code for payload-level failures.
pub const PAYLOAD: &str = "payload";

/// Field error code for a property whose value does not fit the bound type.
pub const INVALID_PROPERTY: &str = "invalid-property";

/// Message returned in place of loader details when a schema is unavailable.
pub const INTERNAL_VALIDATION_ERROR: &str = "Internal validation error";

// ── Response body ───────────────────────────────────────────────────────────

/// Structured JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Response metadata.
    pub meta: Meta,
    /// Error detail.
    pub error: ErrorDetail,
}

/// `meta` block of an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// HTTP status the error describes.
    pub code: u16,
}

/// `error` block of an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable summary, if any.
    pub message: Option<String>,
    /// Machine-readable error code, if any.
    pub code: Option<String>,
    /// Validation errors.
    pub validation: ValidationDetail,
}

/// Global and field-level validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Errors about the payload as a whole.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global: Vec<GlobalEntry>,
    /// Errors about named properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field: Vec<FieldEntry>,
}

/// One global validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalEntry {
    pub code: String,
    pub message: String,
}

/// One field validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// An empty body describing `status`.
    pub fn new(status: StatusCode) -> Self {
        Self {
            meta: Meta {
                code: status.as_u16(),
            },
            error: ErrorDetail {
                message: None,
                code: None,
                validation: ValidationDetail::default(),
            },
        }
    }

    /// A 422 body listing every error in `errors`, globals first.
    pub fn of(errors: &BindingErrors) -> Self {
        let mut body = Self::new(StatusCode::UNPROCESSABLE_ENTITY);
        for e in errors.global_errors() {
            body.add_global_error(&e.code, &e.message);
        }
        for e in errors.field_errors() {
            body.add_field_error(&e.field, &e.code, &e.message);
        }
        body
    }

    /// Set the machine-readable error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error.code = Some(code.into());
        self
    }

    /// Set the human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error.message = Some(message.into());
        self
    }

    /// The status recorded in `meta.code`.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.meta.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl ErrorSink for ApiError {
    fn add_field_error(&mut self, field: &str, code: &str, message: &str) {
        self.error.validation.field.push(FieldEntry {
            name: field.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    fn add_global_error(&mut self, code: &str, message: &str) {
        self.error.validation.global.push(GlobalEntry {
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    fn error_count(&self) -> usize {
        self.error.validation.global.len() + self.error.validation.field.len()
    }
}

// ── AppError ────────────────────────────────────────────────────────────────

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// A strict endpoint's payload violated its schema (422).
    #[error("request failed schema validation with {} error(s)", .0.error_count())]
    SchemaValidation(BindingErrors),

    /// The endpoint's schema could not be loaded (422). Detail is logged only.
    #[error("schema unavailable: {0}")]
    SchemaUnavailable(String),

    /// The body is not JSON, or does not bind to the request type at a
    /// point no property can be named for (422).
    #[error("unreadable payload: {0}")]
    UnreadablePayload(String),

    /// A property's value does not fit the request type (422).
    #[error("invalid property {field}: {message}")]
    InvalidProperty {
        /// Innermost property name on the failing path.
        field: String,
        /// Deserializer message.
        message: String,
    },

    /// No route matches (404).
    #[error("not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::SchemaValidation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::SchemaUnavailable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "SCHEMA_UNAVAILABLE"),
            Self::UnreadablePayload(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNREADABLE_PAYLOAD"),
            Self::InvalidProperty { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PROPERTY"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        }
    }

    /// Build the response body for this error.
    pub fn body(&self) -> ApiError {
        let (status, code) = self.status_and_code();
        match self {
            Self::SchemaValidation(errors) => ApiError::of(errors),
            Self::SchemaUnavailable(_) => {
                let mut body = ApiError::new(status);
                body.add_global_error(PAYLOAD, INTERNAL_VALIDATION_ERROR);
                body
            }
            Self::UnreadablePayload(message) => {
                let mut body = ApiError::new(status);
                body.add_global_error(PAYLOAD, message);
                body
            }
            Self::InvalidProperty { field, message } => {
                let mut body = ApiError::new(status);
                body.add_field_error(field, INVALID_PROPERTY, message);
                body
            }
            Self::NotFound(_) => ApiError::new(status)
                .with_code(code)
                .with_message(self.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::SchemaUnavailable(detail) => {
                tracing::warn!(code, detail = %detail, "request schema unavailable");
            }
            Self::SchemaValidation(_)
            | Self::UnreadablePayload(_)
            | Self::InvalidProperty { .. } => {
                tracing::debug!(code, error = %self, "request rejected");
            }
            Self::NotFound(_) => {}
        }

        (status, Json(self.body())).into_response()
    }
}

/// Map validator failures onto API errors.
impl From<SchemaValidationError> for AppError {
    fn from(err: SchemaValidationError) -> Self {
        match err {
            SchemaValidationError::StrictValidation(errors) => Self::SchemaValidation(errors),
            unavailable @ SchemaValidationError::SchemaUnavailable { .. } => {
                Self::SchemaUnavailable(unavailable.to_string())
            }
        }
    }
}
