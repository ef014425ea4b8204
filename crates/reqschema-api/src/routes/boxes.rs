//! # Box Registration API
//!
//! Sample endpoints exercising schema-validated request bodies. All of them
//! validate against `boxcontroller#register.json`, except
//! `/unavailable-schema`, whose schema document does not exist.
//!
//! | Route                      | Mode   | Response                         |
//! |----------------------------|--------|----------------------------------|
//! | `POST /boxes`              | strict | 200 empty                        |
//! | `POST /boxes/lax`          | lax    | 200 empty                        |
//! | `POST /boxes/checked`      | strict | 200 with [`ApiError`] body       |
//! | `POST /boxes/lax/checked`  | lax    | 200 with [`ApiError`] body       |
//! | `POST /unavailable-schema` | strict | always 422                       |

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use reqschema_core::ErrorSink;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extractors::{SchemaEndpoint, SchemaJson};
use crate::state::AppState;

/// Field error code raised by the handler-level content check.
pub const NASTY_BOX: &str = "nasty-box";

const REGISTER_SCHEMA: Option<&str> = Some("boxcontroller#register");

/// Box registration payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub count: Option<i64>,
    pub inner: Option<InnerBox>,
}

/// Nested part of a [`BoxRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerBox {
    pub inner_id: Option<String>,
    pub inner_name: Option<String>,
}

// ── Endpoint settings ───────────────────────────────────────────────────────

/// `BoxController::register`, located by convention.
pub struct Register;

impl SchemaEndpoint for Register {
    const DECLARING_TYPE: &'static str = "BoxController";
    const METHOD: &'static str = "register";
}

/// `BoxController::registerLaxly`.
pub struct RegisterLaxly;

impl SchemaEndpoint for RegisterLaxly {
    const DECLARING_TYPE: &'static str = "BoxController";
    const METHOD: &'static str = "registerLaxly";
    const SCHEMA_PATH: Option<&'static str> = REGISTER_SCHEMA;
    const STRICT: bool = false;
}

/// `BoxController::registerWithBodyAndErrors`.
pub struct RegisterChecked;

impl SchemaEndpoint for RegisterChecked {
    const DECLARING_TYPE: &'static str = "BoxController";
    const METHOD: &'static str = "registerWithBodyAndErrors";
    const SCHEMA_PATH: Option<&'static str> = REGISTER_SCHEMA;
}

/// `BoxController::registerLaxlyWithBodyAndErrors`.
pub struct RegisterLaxlyChecked;

impl SchemaEndpoint for RegisterLaxlyChecked {
    const DECLARING_TYPE: &'static str = "BoxController";
    const METHOD: &'static str = "registerLaxlyWithBodyAndErrors";
    const SCHEMA_PATH: Option<&'static str> = REGISTER_SCHEMA;
    const STRICT: bool = false;
}

/// An endpoint with no schema document behind it.
pub struct UnavailableSchema;

impl SchemaEndpoint for UnavailableSchema {
    const DECLARING_TYPE: &'static str = "UnavailableSchemaController";
    const METHOD: &'static str = "register";
}

// ── Handlers ────────────────────────────────────────────────────────────────

/// Build the boxes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boxes", post(register))
        .route("/boxes/lax", post(register_laxly))
        .route("/boxes/checked", post(register_checked))
        .route("/boxes/lax/checked", post(register_laxly_checked))
        .route("/unavailable-schema", post(register_unavailable))
}

/// POST /boxes
async fn register(request: SchemaJson<BoxRequest, Register>) -> StatusCode {
    tracing::info!(request = ?request.value, "registered box");
    StatusCode::OK
}

/// POST /boxes/lax
async fn register_laxly(request: SchemaJson<BoxRequest, RegisterLaxly>) -> StatusCode {
    tracing::info!(
        request = ?request.value,
        errors = request.errors.error_count(),
        "registered box laxly"
    );
    StatusCode::OK
}

/// POST /boxes/checked
async fn register_checked(request: SchemaJson<BoxRequest, RegisterChecked>) -> Json<ApiError> {
    let (value, mut errors) = request.into_parts();
    reject_nasty_box(&value, &mut errors);
    Json(ApiError::of(&errors))
}

/// POST /boxes/lax/checked
async fn register_laxly_checked(
    request: SchemaJson<BoxRequest, RegisterLaxlyChecked>,
) -> Json<ApiError> {
    let (value, mut errors) = request.into_parts();
    reject_nasty_box(&value, &mut errors);
    Json(ApiError::of(&errors))
}

/// POST /unavailable-schema
async fn register_unavailable(_request: SchemaJson<BoxRequest, UnavailableSchema>) -> StatusCode {
    StatusCode::OK
}

/// Boxes named `smelly…` are refused.
fn reject_nasty_box(request: &BoxRequest, errors: &mut impl ErrorSink) {
    if request
        .name
        .as_deref()
        .is_some_and(|name| name.starts_with("smelly"))
    {
        errors.add_field_error("name", NASTY_BOX, "This is not a pretty content");
    }
}
