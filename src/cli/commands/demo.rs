//! Implementation of the `stagelog demo` command.

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::logging::Logger;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Steps each reporter runs
    #[arg(long, default_value_t = 5)]
    pub steps: u32,

    /// Delay between steps, in milliseconds
    #[arg(long, default_value_t = 200)]
    pub delay_ms: u64,
}

pub async fn execute(args: DemoArgs, logger: Arc<Logger>) -> Result<()> {
    logger.set_stage("demo");
    logger.information("Starting build and sync");
    logger.spinner("Working...");

    let delay = Duration::from_millis(args.delay_ms);
    let build = tokio::spawn(report("build", args.steps, delay, Arc::clone(&logger)));
    let sync = tokio::spawn(report("sync", args.steps, delay, Arc::clone(&logger)));

    let (build, sync) = tokio::join!(build, sync);
    build.context("build reporter panicked")?;
    sync.context("sync reporter panicked")?;

    logger.stop_spinner();
    logger.success("Build and sync complete");
    Ok(())
}

/// One progress reporter; every step is a separate log call
async fn report(name: &'static str, steps: u32, delay: Duration, logger: Arc<Logger>) {
    logger.debugf(format_args!("{name} reporter started"));
    for step in 1..=steps {
        tokio::time::sleep(delay).await;
        logger.println(format!("[{name}] step {step}/{steps}"));
        if step == steps / 2 {
            logger.hint(format!("[{name}] halfway there"));
        }
    }
    logger.success(format!("{name} finished"));
}
