//! The core module.
//!
//! Business logic that does not know about HTTP.

pub mod greeting;
