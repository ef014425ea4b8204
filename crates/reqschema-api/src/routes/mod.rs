//! # API Route Modules
//!
//! - `boxes`: sample box registration endpoints, each guarded by a JSON
//!   Schema, covering strict and lax validation with and without
//!   handler-level checks.

pub mod boxes;
