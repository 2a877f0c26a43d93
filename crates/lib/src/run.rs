//! Build-and-run delegation.
//!
//! Phase three of the bootstrap: invoke `cargo run` in the project
//! directory with inherited stdio and hand the child's exit code back to
//! the caller. The bootstrapper never inspects the child's output.

use std::path::Path;
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::info;

use crate::consts::TOOLCHAIN_BIN;
use crate::toolchain::CargoEnv;
use crate::types::BootstrapError;

/// Spawn `cargo run` in `project_dir` and wait for it to finish.
///
/// `env` carries the toolchain environment when phase one installed it
/// during this run; an already-present toolchain needs no PATH adjustment.
pub async fn build_and_run(project_dir: &Path, env: Option<&CargoEnv>) -> Result<i32, BootstrapError> {
  info!(dir = ?project_dir, "building and running");

  let mut cmd = Command::new(TOOLCHAIN_BIN);
  cmd.arg("run").current_dir(project_dir);
  if let Some(env) = env {
    env.apply(&mut cmd);
  }

  let status = cmd.status().await.map_err(|source| BootstrapError::Spawn {
    program: TOOLCHAIN_BIN.to_string(),
    source,
  })?;

  Ok(exit_code(status))
}

/// Map an exit status to the code the bootstrapper should exit with.
///
/// A signal-terminated child maps to the conventional `128 + N` status on
/// Unix.
pub fn exit_code(status: ExitStatus) -> i32 {
  if let Some(code) = status.code() {
    return code;
  }

  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
      return 128 + signal;
    }
  }

  1
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
  use super::*;

  fn shell_status(cmd: &str) -> ExitStatus {
    std::process::Command::new("/bin/sh")
      .arg("-c")
      .arg(cmd)
      .status()
      .unwrap()
  }

  #[test]
  fn exit_code_passes_through_child_code() {
    assert_eq!(exit_code(shell_status("exit 0")), 0);
    assert_eq!(exit_code(shell_status("exit 7")), 7);
  }

  #[test]
  fn exit_code_maps_signals_to_shell_convention() {
    use std::os::unix::process::ExitStatusExt;

    // SIGKILL is 9
    let status = ExitStatus::from_raw(9);
    assert_eq!(exit_code(status), 137);
  }

  #[tokio::test]
  async fn build_and_run_fails_outside_a_project() {
    // cargo run in a directory without a manifest exits non-zero, and that
    // code is what the caller sees
    let temp = tempfile::TempDir::new().unwrap();
    let code = build_and_run(temp.path(), None).await.unwrap();
    assert_ne!(code, 0);
  }
}
