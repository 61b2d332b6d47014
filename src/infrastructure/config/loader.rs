use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Level;
use crate::infrastructure::logging::LoggerConfig;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid max_size_mb: {0}. Must be at least 1")]
    InvalidMaxSize(u64),

    #[error("Invalid max_backups: {0}. Must be at least 1")]
    InvalidMaxBackups(usize),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .stagelog/config.yaml (project config)
    /// 3. .stagelog/local.yaml (project local overrides, optional)
    /// 4. Environment variables (STAGELOG_* prefix, highest priority)
    pub fn load() -> Result<LoggerConfig> {
        let config: LoggerConfig = Self::figment()
            .merge(Yaml::file(".stagelog/config.yaml"))
            .merge(Yaml::file(".stagelog/local.yaml"))
            .merge(Env::prefixed("STAGELOG_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<LoggerConfig> {
        let config: LoggerConfig = Self::figment()
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new().merge(Serialized::defaults(LoggerConfig::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &LoggerConfig) -> Result<(), ConfigError> {
        if config.level.parse::<Level>().is_err() {
            return Err(ConfigError::InvalidLogLevel(config.level.clone()));
        }

        if config.rotation.max_size_mb == 0 {
            return Err(ConfigError::InvalidMaxSize(config.rotation.max_size_mb));
        }

        if config.rotation.max_backups == 0 {
            return Err(ConfigError::InvalidMaxBackups(config.rotation.max_backups));
        }

        Ok(())
    }
}
