//! Implementation of the `minerboot up` command.
//!
//! Runs the full bootstrap: toolchain check/install, Linux system
//! packages, then `cargo run` in the project directory. The process exit
//! code is the game's exit code whenever the launch phase is reached.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use minerboot_lib::bootstrap;
use minerboot_lib::platform::os::Os;
use minerboot_lib::toolchain::ToolchainStatus;
use minerboot_lib::types::{BootstrapOptions, BootstrapReport, PhaseOutcome};

use crate::output::{
  format_duration, print_error, print_info, print_stat, print_success, print_warning, symbols,
};

pub fn cmd_up(dir: &Path, dry_run: bool) -> Result<i32> {
  if dry_run {
    print_plan(true);
    return Ok(0);
  }

  let start = Instant::now();
  let options = BootstrapOptions {
    project_dir: dir.to_path_buf(),
    skip_run: false,
  };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(bootstrap::up(&options));

  println!();
  print_report(&report);
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(final_code(&report))
}

/// Print the steps a run would take from the current machine state.
pub(crate) fn print_plan(launch: bool) {
  let os = Os::current();
  let installed = ToolchainStatus::detect().is_installed();
  let steps = bootstrap::plan(os, installed, launch);

  println!(
    "{}",
    "Dry run - nothing executed".if_supports_color(Stream::Stdout, |s| s.yellow())
  );
  if steps.is_empty() {
    print_info("Nothing to do");
    return;
  }
  for step in &steps {
    println!("  {} {}", symbols::ARROW, step);
  }
}

pub(crate) fn print_report(report: &BootstrapReport) {
  outcome_line("Toolchain", &report.toolchain);
  outcome_line("Packages", &report.packages);
  outcome_line("Launch", &report.launch);

  if report.phases_ok() {
    print_success("Bootstrap finished");
  } else {
    print_error("Bootstrap finished with failures");
  }
}

fn outcome_line(label: &str, outcome: &PhaseOutcome) {
  match outcome {
    PhaseOutcome::Ran => print_stat(label, "done"),
    PhaseOutcome::Skipped(reason) => print_stat(label, &format!("skipped ({})", reason)),
    PhaseOutcome::Failed(err) => print_warning(&format!("{} failed: {}", label, err)),
  }
}

/// Exit code for the whole run.
///
/// The build/run child's code when the launch executed; 127 when the
/// launch command itself could not be spawned (the shell convention for a
/// missing command).
pub(crate) fn final_code(report: &BootstrapReport) -> i32 {
  if let Some(code) = report.exit_code {
    return code;
  }
  if report.launch.is_failed() {
    return 127;
  }
  if report.phases_ok() { 0 } else { 1 }
}

#[cfg(test)]
mod tests {
  use super::*;
  use minerboot_lib::types::BootstrapError;

  fn report(launch: PhaseOutcome, exit_code: Option<i32>) -> BootstrapReport {
    BootstrapReport {
      toolchain: PhaseOutcome::Skipped("toolchain already installed"),
      packages: PhaseOutcome::Skipped("not linux"),
      launch,
      exit_code,
    }
  }

  #[test]
  fn final_code_is_the_child_exit_code() {
    assert_eq!(final_code(&report(PhaseOutcome::Ran, Some(0))), 0);
    assert_eq!(final_code(&report(PhaseOutcome::Ran, Some(101))), 101);
  }

  #[test]
  fn final_code_is_127_when_launch_never_started() {
    let launch = PhaseOutcome::Failed(BootstrapError::Spawn {
      program: "cargo".to_string(),
      source: std::io::Error::from(std::io::ErrorKind::NotFound),
    });
    assert_eq!(final_code(&report(launch, None)), 127);
  }

  #[test]
  fn final_code_for_prepare_only_follows_the_phases() {
    assert_eq!(final_code(&report(PhaseOutcome::Skipped("prepare only"), None)), 0);

    let failing = BootstrapReport {
      toolchain: PhaseOutcome::Failed(BootstrapError::InstallerFailed { code: Some(1) }),
      packages: PhaseOutcome::Skipped("not linux"),
      launch: PhaseOutcome::Skipped("prepare only"),
      exit_code: None,
    };
    assert_eq!(final_code(&failing), 1);
  }
}
