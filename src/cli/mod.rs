//! Command-line interface
//!
//! Resolves configuration from files, environment and flags, builds the
//! shared [`Logger`] and dispatches to the commands.

pub mod commands;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::models::OutputMode;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{Logger, LoggerConfig};

/// Merge file/env configuration with command-line flags (flags win)
pub fn resolve_config(cli: &Cli) -> Result<LoggerConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    if let Some(level) = &cli.log_level {
        config.level.clone_from(level);
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }
    config.output = cli.output.unwrap_or_else(detect_output_mode);

    Ok(config)
}

/// Interactive when stdout is a terminal someone is watching
fn detect_output_mode() -> OutputMode {
    if console::user_attended() {
        OutputMode::Tty
    } else {
        OutputMode::Plain
    }
}

/// Run the parsed command line to completion
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let logger = Arc::new(Logger::new(&config).context("Failed to initialize logger")?);
    for word in &cli.masks {
        logger.add_masked_word(word.as_str());
    }
    if !cli.masks.is_empty() {
        logger.enable_masking();
    }

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args, Arc::clone(&logger)).await,
        Commands::Redact => commands::redact::execute(std::io::stdin().lock(), &logger),
    };

    if let Err(err) = result {
        logger.fatalf(format_args!("{err:#}"));
    }

    if cli.json {
        print!("{}", logger.output_buffer());
    }
    Ok(())
}

/// Report an error that happened before a logger existed
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let error = serde_json::json!({ "success": false, "error": format!("{err:#}") });
        println!("{error}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
