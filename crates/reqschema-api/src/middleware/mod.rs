//! # Middleware
//!
//! Tower layers applied to the API router.

pub mod tracing_layer;
