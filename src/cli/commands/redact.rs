//! Implementation of the `stagelog redact` command.

use anyhow::{Context, Result};
use std::io::BufRead;

use crate::infrastructure::logging::Logger;

/// Echo every line of `input` through the logger with masking on
pub fn execute(input: impl BufRead, logger: &Logger) -> Result<()> {
    logger.set_stage("redact");
    logger.enable_masking();
    for line in input.lines() {
        let line = line.context("Failed to read input line")?;
        logger.println(line);
    }
    Ok(())
}
