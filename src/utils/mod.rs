//! Shared utilities: configuration validation.

pub mod validation;

pub use validation::{validate_config, ValidationError};
