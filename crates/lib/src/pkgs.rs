//! System package installation.
//!
//! Phase two of the bootstrap: on Linux, refresh the APT index and install
//! the native libraries the game's windowing/audio stack links against.
//! Every other OS skips the phase entirely, with no warning.

use std::fmt;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::consts::SYSTEM_PACKAGES;
use crate::platform::os::Os;
use crate::types::BootstrapError;

/// A package-manager invocation, kept as data so plans can be shown
/// without executing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgCommand {
  pub program: &'static str,
  pub args: Vec<String>,
}

impl PkgCommand {
  fn new(program: &'static str, args: &[&str]) -> Self {
    Self {
      program,
      args: args.iter().map(|s| s.to_string()).collect(),
    }
  }
}

impl fmt::Display for PkgCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Command sequence for the given OS: index refresh then install on Linux,
/// nothing anywhere else.
pub fn plan(os: Option<Os>) -> Vec<PkgCommand> {
  if os != Some(Os::Linux) {
    return Vec::new();
  }

  let mut install = vec!["apt-get", "install", "-y"];
  install.extend(SYSTEM_PACKAGES);

  vec![
    PkgCommand::new("sudo", &["apt-get", "update"]),
    PkgCommand::new("sudo", &install),
  ]
}

/// Execute the package plan for `os` with inherited stdio, so the privilege
/// prompt and package-manager output reach the terminal.
///
/// Commands run strictly in sequence; the first failure stops this phase.
pub async fn install(os: Option<Os>) -> Result<(), BootstrapError> {
  let commands = plan(os);
  if commands.is_empty() {
    debug!("not linux, skipping system packages");
    return Ok(());
  }

  info!("installing system packages");

  for cmd in commands {
    info!(cmd = %cmd, "running package command");
    let status = Command::new(cmd.program)
      .args(&cmd.args)
      .status()
      .await
      .map_err(|source| BootstrapError::Spawn {
        program: cmd.program.to_string(),
        source,
      })?;

    if !status.success() {
      return Err(BootstrapError::PkgFailed {
        cmd: cmd.to_string(),
        code: status.code(),
      });
    }
  }

  Ok(())
}

/// Whether `pkg` is currently installed, per dpkg.
///
/// Read-only; used by the status command. Any query failure (including a
/// missing dpkg) reads as "not installed".
pub async fn installed(pkg: &str) -> bool {
  Command::new("dpkg")
    .arg("-s")
    .arg(pkg)
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .await
    .map(|s| s.success())
    .unwrap_or(false)
}
