//! Domain layer for the stagelog logger
//!
//! This module contains the record model, output modes, errors and the
//! writer port implemented by the infrastructure layer.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{LogError, LogResult};
