//! # reqschema-api — Schema-Validated JSON Endpoints for Axum
//!
//! Wires the request validator into Axum: the
//! [`SchemaJson`](extractors::SchemaJson) extractor binds and validates
//! request bodies, and [`AppError`](error::AppError) renders failures as the
//! structured [`ApiError`](error::ApiError) body.
//!
//! ## API Surface
//!
//! | Prefix                | Module             | Purpose                    |
//! |-----------------------|--------------------|----------------------------|
//! | `/boxes*`             | [`routes::boxes`]  | Sample validated endpoints |
//! | `/unavailable-schema` | [`routes::boxes`]  | Missing-schema endpoint    |
//! | `/health/*`           | this module        | Liveness and readiness     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → SchemaJson extractor → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes are mounted outside the trace layer. Unknown paths get a
/// structured 404.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::boxes::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api).fallback(not_found)
}

/// `GET /health/liveness`: 200 while the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// `GET /health/readiness`: 200 once the router is serving.
async fn readiness() -> &'static str {
    "ready"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
