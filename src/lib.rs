//! A greeting web service with axum.
//!
//! Greets the world or someone by name with a greeting that anyone can change.

pub mod api;
pub mod app;
pub mod core;
pub mod infra;
