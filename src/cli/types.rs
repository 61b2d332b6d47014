//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::demo::DemoArgs;
use crate::domain::models::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "stagelog")]
#[command(about = "Stagelog - staged terminal logging with structured capture", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Terminal log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "STAGELOG_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Output mode; detected from the terminal when omitted
    #[arg(short, long, global = true, value_parser = parse_output_mode)]
    pub output: Option<OutputMode>,

    /// Also write every log call to this rotating file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Load configuration from this YAML file instead of .stagelog/
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Secret to mask in all output (repeatable)
    #[arg(long = "mask", global = true)]
    pub masks: Vec<String>,

    /// Print the structured capture as JSON lines when done
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run concurrent build and sync reporters against one logger
    Demo(DemoArgs),

    /// Print stdin line by line with masking enabled
    Redact,
}

fn parse_output_mode(value: &str) -> Result<OutputMode, String> {
    value.parse().map_err(|e: crate::domain::errors::LogError| e.to_string())
}
