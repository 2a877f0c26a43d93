//! Error, option, and report types for the bootstrap phases.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing the environment.
#[derive(Debug, Error)]
pub enum BootstrapError {
  /// HTTP request for the installer failed.
  #[error("fetch failed for {url}: {message}")]
  FetchFailed { url: String, message: String },

  /// The installer script exited with a failure status.
  #[error("installer exited with status {code:?}")]
  InstallerFailed { code: Option<i32> },

  /// A package-manager command exited with a failure status.
  #[error("package command failed with exit code {code:?}: {cmd}")]
  PkgFailed { cmd: String, code: Option<i32> },

  /// A child process could not be spawned.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// I/O error while writing the installer to disk.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Outcome of a single bootstrap phase.
///
/// A failed phase does not stop the run; later phases are still attempted
/// and the failure is carried in the report.
#[derive(Debug)]
pub enum PhaseOutcome {
  /// The phase ran to completion.
  Ran,
  /// The phase's predicate said there was nothing to do.
  Skipped(&'static str),
  /// The phase ran and failed.
  Failed(BootstrapError),
}

impl PhaseOutcome {
  pub fn is_failed(&self) -> bool {
    matches!(self, PhaseOutcome::Failed(_))
  }
}

/// Summary of a full bootstrap run.
#[derive(Debug)]
pub struct BootstrapReport {
  /// Toolchain check/install phase.
  pub toolchain: PhaseOutcome,

  /// System package phase (Linux only).
  pub packages: PhaseOutcome,

  /// Build-and-run phase. `Skipped` when the run was prepare-only.
  pub launch: PhaseOutcome,

  /// Exit code of the build/run child, when the launch reached it.
  /// The bootstrapper's own exit code is this value.
  pub exit_code: Option<i32>,
}

impl BootstrapReport {
  /// True when neither preparation phase recorded a failure.
  pub fn phases_ok(&self) -> bool {
    !self.toolchain.is_failed() && !self.packages.is_failed()
  }
}

/// Configuration for a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
  /// Directory containing the game project's Cargo.toml.
  pub project_dir: PathBuf,

  /// Prepare the environment but skip the build/run phase.
  pub skip_run: bool,
}

impl Default for BootstrapOptions {
  fn default() -> Self {
    Self {
      project_dir: PathBuf::from("."),
      skip_run: false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn phase_outcome_failed_detection() {
    assert!(!PhaseOutcome::Ran.is_failed());
    assert!(!PhaseOutcome::Skipped("not linux").is_failed());

    let failed = PhaseOutcome::Failed(BootstrapError::InstallerFailed { code: Some(1) });
    assert!(failed.is_failed());
  }

  #[test]
  fn report_phases_ok_when_skipped() {
    let report = BootstrapReport {
      toolchain: PhaseOutcome::Skipped("toolchain already installed"),
      packages: PhaseOutcome::Skipped("not linux"),
      launch: PhaseOutcome::Ran,
      exit_code: Some(0),
    };
    assert!(report.phases_ok());
  }

  #[test]
  fn report_phases_not_ok_on_package_failure() {
    let report = BootstrapReport {
      toolchain: PhaseOutcome::Ran,
      packages: PhaseOutcome::Failed(BootstrapError::PkgFailed {
        cmd: "sudo apt-get update".to_string(),
        code: Some(100),
      }),
      launch: PhaseOutcome::Ran,
      exit_code: Some(0),
    };
    assert!(!report.phases_ok());
  }

  #[test]
  fn default_options_use_current_dir() {
    let options = BootstrapOptions::default();
    assert_eq!(options.project_dir, PathBuf::from("."));
    assert!(!options.skip_run);
  }

  #[test]
  fn error_messages_name_the_failing_command() {
    let err = BootstrapError::PkgFailed {
      cmd: "sudo apt-get update".to_string(),
      code: Some(100),
    };
    assert!(err.to_string().contains("sudo apt-get update"));

    let err = BootstrapError::FetchFailed {
      url: "https://sh.rustup.rs".to_string(),
      message: "connection refused".to_string(),
    };
    assert!(err.to_string().contains("https://sh.rustup.rs"));
  }
}
