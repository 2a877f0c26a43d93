//! Implementation of the `minerboot run` command.
//!
//! Launches `cargo run` in the project directory without touching the
//! environment first. The child's exit code becomes the process exit code.

use std::path::Path;

use anyhow::{Context, Result};

use minerboot_lib::run;

pub fn cmd_run(dir: &Path) -> Result<i32> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let code = rt
    .block_on(run::build_and_run(dir, None))
    .context("Failed to start the build/run command")?;

  Ok(code)
}
