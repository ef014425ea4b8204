//! # Schema-Validated JSON Extraction
//!
//! Binds a JSON request body to a Rust type and validates the raw document
//! against the endpoint's JSON Schema.
//!
//! Binding runs first and rejects before any schema is loaded. A body that
//! is not JSON is a payload error; a property whose value does not fit the
//! target type is an `invalid-property` error naming that property.
//!
//! ```ignore
//! struct Register;
//! impl SchemaEndpoint for Register {
//!     const DECLARING_TYPE: &'static str = "BoxController";
//!     const METHOD: &'static str = "register";
//! }
//!
//! async fn register(request: SchemaJson<BoxRequest, Register>) -> StatusCode { .. }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use reqschema_core::{BindingErrors, EndpointSchema};
use reqschema_schema::RequestValidator;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;

use crate::error::AppError;

/// Static validation settings for one handler.
pub trait SchemaEndpoint: Send + Sync + 'static {
    /// Simple name of the type the handler belongs to.
    const DECLARING_TYPE: &'static str;
    /// Handler name.
    const METHOD: &'static str;
    /// Explicit schema path, bypassing the naming convention.
    const SCHEMA_PATH: Option<&'static str> = None;
    /// Fail the request when validation adds errors.
    const STRICT: bool = true;

    /// The runtime form of these settings.
    fn endpoint() -> EndpointSchema {
        let endpoint = EndpointSchema::new(Self::DECLARING_TYPE, Self::METHOD).with_strict(Self::STRICT);
        match Self::SCHEMA_PATH {
            Some(path) => endpoint.with_schema_path(path),
            None => endpoint,
        }
    }
}

/// A bound request value plus the errors collected while validating it.
#[derive(Debug, Clone)]
pub struct Bound<T> {
    pub value: T,
    /// Empty unless the endpoint is lax.
    pub errors: BindingErrors,
}

/// Parse `body`, bind it to `T`, then validate it for `endpoint`.
pub fn bind_json<T: DeserializeOwned>(
    validator: &RequestValidator,
    endpoint: &EndpointSchema,
    body: &[u8],
) -> Result<Bound<T>, AppError> {
    let document: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::UnreadablePayload(format!("malformed JSON: {e}")))?;
    let value = bind(&document)?;

    let mut errors = BindingErrors::new(endpoint.object_name.clone());
    validator.validate(endpoint, &document, &mut errors)?;
    Ok(Bound { value, errors })
}

/// Deserialize `document` into `T`, tracking the path of a failing property.
///
/// The innermost object key on the path names the property. Failures with
/// no key on the path (a top-level array, a missing required field of the
/// root type) stay payload-level.
fn bind<T: DeserializeOwned>(document: &Value) -> Result<T, AppError> {
    serde_path_to_error::deserialize(document).map_err(|err| {
        let field = err
            .path()
            .iter()
            .filter_map(|segment| match segment {
                Segment::Map { key } => Some(key.clone()),
                _ => None,
            })
            .last();
        let message = err.inner().to_string();
        match field {
            Some(field) => AppError::InvalidProperty { field, message },
            None => AppError::UnreadablePayload(message),
        }
    })
}

/// JSON body extractor validated against the schema of endpoint `E`.
///
/// Strict endpoints reject with [`AppError::SchemaValidation`]; lax ones
/// hand the collected errors to the handler.
#[derive(Debug)]
pub struct SchemaJson<T, E> {
    pub value: T,
    pub errors: BindingErrors,
    endpoint: PhantomData<fn() -> E>,
}

impl<T, E> SchemaJson<T, E> {
    /// Split into the bound value and its errors.
    pub fn into_parts(self) -> (T, BindingErrors) {
        (self.value, self.errors)
    }
}

#[axum::async_trait]
impl<S, T, E> FromRequest<S> for SchemaJson<T, E>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
    E: SchemaEndpoint,
    Arc<RequestValidator>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Err(AppError::UnreadablePayload(
                "expected request with `Content-Type: application/json`".into(),
            ));
        }
        let validator = Arc::<RequestValidator>::from_ref(state);
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::UnreadablePayload(e.body_text()))?;

        let Bound { value, errors } = bind_json(&validator, &E::endpoint(), &body)?;
        Ok(Self {
            value,
            errors,
            endpoint: PhantomData,
        })
    }
}

/// `application/json` or any `+json` suffix, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
