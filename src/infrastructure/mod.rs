//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports:
//! - Logging infrastructure (writers, logger facade, sinks)
//! - Configuration management
//! - Environment variable helpers

pub mod config;
pub mod env;
pub mod logging;
