//! Toolchain detection and installation.
//!
//! Phase one of the bootstrap: probe the search path for `cargo`, and when
//! it is missing, fetch the rustup installer from its pinned HTTPS endpoint
//! and run it non-interactively. A present toolchain short-circuits the
//! phase before any network client is constructed.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::consts::{INSTALLER_FILENAME, INSTALLER_URL, TOOLCHAIN_BIN};
use crate::platform::paths;
use crate::probe;
use crate::types::BootstrapError;

/// Result of probing for the toolchain.
#[derive(Debug, Clone)]
pub struct ToolchainStatus {
  /// Path to the `cargo` executable, if present on the search path.
  pub cargo: Option<PathBuf>,
}

impl ToolchainStatus {
  /// Probe the process search path for the toolchain executable.
  pub fn detect() -> Self {
    Self {
      cargo: probe::find_tool(TOOLCHAIN_BIN),
    }
  }

  /// Probe an explicit `PATH` value.
  pub fn detect_in(path: &OsStr) -> Self {
    Self {
      cargo: probe::find_in_path(TOOLCHAIN_BIN, path),
    }
  }

  pub fn is_installed(&self) -> bool {
    self.cargo.is_some()
  }
}

/// Toolchain environment for child processes.
///
/// The in-process equivalent of sourcing `$CARGO_HOME/env` in a shell:
/// later phases spawn children with `$CARGO_HOME/bin` prepended to `PATH`.
/// The parent environment itself is left untouched.
#[derive(Debug, Clone)]
pub struct CargoEnv {
  bin_dir: PathBuf,
}

impl CargoEnv {
  /// Environment rooted at `$CARGO_HOME` (or its `~/.cargo` default).
  pub fn load() -> Self {
    Self {
      bin_dir: paths::cargo_bin_dir(),
    }
  }

  pub fn bin_dir(&self) -> &Path {
    &self.bin_dir
  }

  /// `PATH` value with the toolchain bin directory prepended.
  pub fn path_value(&self) -> OsString {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut parts = vec![self.bin_dir.clone()];
    parts.extend(std::env::split_paths(&current));
    std::env::join_paths(parts).unwrap_or(current)
  }

  /// Apply the environment to a command about to be spawned.
  pub fn apply(&self, cmd: &mut Command) {
    cmd.env("PATH", self.path_value());
  }
}

/// Location the installer script is downloaded to.
pub fn installer_path() -> PathBuf {
  paths::cache_dir().join(INSTALLER_FILENAME)
}

/// Download the installer script from `url` to `dest`.
///
/// Enforces TLS 1.2 as the protocol floor and makes exactly one attempt;
/// transport and HTTP errors propagate to the caller unchanged.
pub async fn fetch_installer(url: &str, dest: &Path) -> Result<(), BootstrapError> {
  info!(url = %url, "fetching installer");

  let client = reqwest::Client::builder()
    .min_tls_version(reqwest::tls::Version::TLS_1_2)
    .build()
    .map_err(|e| BootstrapError::FetchFailed {
      url: url.to_string(),
      message: e.to_string(),
    })?;

  let response = client
    .get(url)
    .send()
    .await
    .map_err(|e| BootstrapError::FetchFailed {
      url: url.to_string(),
      message: e.to_string(),
    })?;

  if !response.status().is_success() {
    return Err(BootstrapError::FetchFailed {
      url: url.to_string(),
      message: format!("HTTP {}", response.status()),
    });
  }

  let bytes = response.bytes().await.map_err(|e| BootstrapError::FetchFailed {
    url: url.to_string(),
    message: e.to_string(),
  })?;

  if let Some(parent) = dest.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  let mut file = tokio::fs::File::create(dest).await?;
  file.write_all(&bytes).await?;
  file.flush().await?;

  debug!(path = ?dest, size = bytes.len(), "installer written");

  Ok(())
}

/// Run the downloaded installer non-interactively (`sh <script> -y`).
///
/// Stdio is inherited so the installer's progress reaches the terminal.
pub async fn run_installer(script: &Path) -> Result<(), BootstrapError> {
  info!(script = ?script, "running installer");

  let status = Command::new("sh")
    .arg(script)
    .arg("-y")
    .status()
    .await
    .map_err(|source| BootstrapError::Spawn {
      program: "sh".to_string(),
      source,
    })?;

  if !status.success() {
    return Err(BootstrapError::InstallerFailed {
      code: status.code(),
    });
  }

  Ok(())
}

/// Ensure the toolchain is available, installing it when missing.
///
/// Returns the environment later phases should spawn children with:
/// `None` when the toolchain was already on the search path, `Some` when it
/// was installed into `$CARGO_HOME` during this run.
pub async fn ensure() -> Result<Option<CargoEnv>, BootstrapError> {
  let status = ToolchainStatus::detect();
  if let Some(cargo) = &status.cargo {
    info!(cargo = ?cargo, "toolchain already installed");
    return Ok(None);
  }

  info!("toolchain not found, installing");
  let script = installer_path();
  fetch_installer(INSTALLER_URL, &script).await?;
  run_installer(&script).await?;

  Ok(Some(CargoEnv::load()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  fn detect_in_empty_path_finds_nothing() {
    let status = ToolchainStatus::detect_in(OsStr::new(""));
    assert!(!status.is_installed());
  }

  #[cfg(unix)]
  #[test]
  fn detect_in_finds_cargo() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::TempDir::new().unwrap();
    let cargo = temp.path().join("cargo");
    std::fs::write(&cargo, "#!/bin/sh\nexit 0\n").unwrap();
    let mut perms = std::fs::metadata(&cargo).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&cargo, perms).unwrap();

    let path = std::env::join_paths([temp.path()]).unwrap();
    let status = ToolchainStatus::detect_in(&path);
    assert_eq!(status.cargo, Some(cargo));
    assert!(status.is_installed());
  }

  #[cfg(unix)]
  #[test]
  #[serial]
  fn cargo_env_prepends_bin_dir() {
    temp_env::with_vars(
      [
        ("CARGO_HOME", Some("/opt/cargo")),
        ("PATH", Some("/usr/bin:/bin")),
      ],
      || {
        let env = CargoEnv::load();
        assert_eq!(env.bin_dir(), Path::new("/opt/cargo/bin"));

        let path = env.path_value();
        let entries: Vec<_> = std::env::split_paths(&path).collect();
        assert_eq!(entries[0], PathBuf::from("/opt/cargo/bin"));
        assert!(entries.contains(&PathBuf::from("/usr/bin")));
      },
    );
  }

  #[cfg(not(windows))]
  #[test]
  #[serial]
  fn installer_path_lives_in_cache_dir() {
    temp_env::with_vars(
      [("XDG_CACHE_HOME", Some("/tmp/cache")), ("HOME", Some("/home/user"))],
      || {
        let path = installer_path();
        assert!(path.ends_with(INSTALLER_FILENAME));
        assert!(path.starts_with("/tmp/cache"));
      },
    );
  }
}
