//! Implementation of the `minerboot setup` command.
//!
//! Prepares the environment (toolchain and system packages) without
//! launching the game.

use anyhow::{Context, Result};

use minerboot_lib::bootstrap;
use minerboot_lib::types::BootstrapOptions;

use super::up::{final_code, print_plan, print_report};

pub fn cmd_setup(dry_run: bool) -> Result<i32> {
  if dry_run {
    print_plan(false);
    return Ok(0);
  }

  let options = BootstrapOptions {
    skip_run: true,
    ..Default::default()
  };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(bootstrap::up(&options));

  println!();
  print_report(&report);

  Ok(final_code(&report))
}
