//! Greeting business logic.

pub mod greeting_service;
