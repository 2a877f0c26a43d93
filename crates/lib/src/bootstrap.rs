//! Sequential bootstrap orchestration.
//!
//! Three phases, in order: toolchain, system packages, build & run. There
//! is no strict-error mode: each phase is attempted regardless of earlier
//! failures, and failures are recorded in the report instead of aborting
//! the run.

use tracing::warn;

use crate::consts::{INSTALLER_FILENAME, INSTALLER_URL};
use crate::platform::os::Os;
use crate::types::{BootstrapOptions, BootstrapReport, PhaseOutcome};
use crate::{pkgs, run, toolchain};

/// Human-readable step list for a given starting state, used for dry runs.
///
/// `launch` is false for prepare-only runs.
pub fn plan(os: Option<Os>, toolchain_installed: bool, launch: bool) -> Vec<String> {
  let mut steps = Vec::new();

  if !toolchain_installed {
    steps.push(format!("fetch {}", INSTALLER_URL));
    steps.push(format!("sh {} -y", INSTALLER_FILENAME));
    steps.push("load $CARGO_HOME/bin into PATH".to_string());
  }

  for cmd in pkgs::plan(os) {
    steps.push(cmd.to_string());
  }

  if launch {
    steps.push("cargo run".to_string());
  }

  steps
}

/// Run the bootstrap sequence.
///
/// Phase outcomes land in the returned report; the caller decides the
/// process exit code from `report.exit_code`.
pub async fn up(options: &BootstrapOptions) -> BootstrapReport {
  let mut env = None;

  let toolchain = match toolchain::ensure().await {
    Ok(Some(cargo_env)) => {
      env = Some(cargo_env);
      PhaseOutcome::Ran
    }
    Ok(None) => PhaseOutcome::Skipped("toolchain already installed"),
    Err(e) => {
      warn!(error = %e, "toolchain phase failed");
      PhaseOutcome::Failed(e)
    }
  };

  let os = Os::current();
  let packages = if os == Some(Os::Linux) {
    match pkgs::install(os).await {
      Ok(()) => PhaseOutcome::Ran,
      Err(e) => {
        warn!(error = %e, "package phase failed");
        PhaseOutcome::Failed(e)
      }
    }
  } else {
    PhaseOutcome::Skipped("not linux")
  };

  let mut exit_code = None;
  let launch = if options.skip_run {
    PhaseOutcome::Skipped("prepare only")
  } else {
    match run::build_and_run(&options.project_dir, env.as_ref()).await {
      Ok(code) => {
        exit_code = Some(code);
        PhaseOutcome::Ran
      }
      Err(e) => {
        warn!(error = %e, "build/run command could not be started");
        PhaseOutcome::Failed(e)
      }
    }
  };

  BootstrapReport {
    toolchain,
    packages,
    launch,
    exit_code,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plan_toolchain_present_on_darwin_is_run_only() {
    // Skip installer, skip package step, run the build/run command directly
    let steps = plan(Some(Os::MacOs), true, true);
    assert_eq!(steps, vec!["cargo run"]);
  }

  #[test]
  fn plan_toolchain_absent_on_linux_is_the_full_sequence() {
    let steps = plan(Some(Os::Linux), false, true);
    assert_eq!(
      steps,
      vec![
        "fetch https://sh.rustup.rs",
        "sh rustup-init.sh -y",
        "load $CARGO_HOME/bin into PATH",
        "sudo apt-get update",
        "sudo apt-get install -y libasound2-dev libudev-dev pkg-config",
        "cargo run",
      ]
    );
  }

  #[test]
  fn plan_without_launch_drops_the_run_step() {
    let steps = plan(Some(Os::Linux), true, false);
    assert_eq!(
      steps,
      vec!["sudo apt-get update", "sudo apt-get install -y libasound2-dev libudev-dev pkg-config"]
    );
  }

  #[test]
  fn plan_everything_ready_off_linux_is_empty_without_launch() {
    assert!(plan(Some(Os::MacOs), true, false).is_empty());
  }
}
