//! Search-path executable lookup.
//!
//! The `command -v` analog: resolves an executable name against a `PATH`
//! value without spawning a shell. The toolchain phase branches on the
//! result, so this must not touch the network or the filesystem outside
//! of the listed directories.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolve `name` against the process `PATH`.
pub fn find_tool(name: &str) -> Option<PathBuf> {
  let path = std::env::var_os("PATH")?;
  find_in_path(name, &path)
}

/// Resolve `name` against an explicit `PATH` value.
///
/// Directories are searched in order; the first entry containing an
/// executable file with a matching name wins.
pub fn find_in_path(name: &str, path: &OsStr) -> Option<PathBuf> {
  for dir in std::env::split_paths(path) {
    if dir.as_os_str().is_empty() {
      continue;
    }
    for candidate in candidate_names(name) {
      let full = dir.join(candidate);
      if is_executable(&full) {
        return Some(full);
      }
    }
  }
  None
}

/// Filenames to try for `name` in each search directory.
#[cfg(unix)]
fn candidate_names(name: &str) -> Vec<String> {
  vec![name.to_string()]
}

/// Filenames to try for `name` in each search directory.
///
/// Windows resolves bare names through `PATHEXT`.
#[cfg(windows)]
fn candidate_names(name: &str) -> Vec<String> {
  let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
  let mut names = vec![name.to_string()];
  for ext in exts.split(';').filter(|e| !e.is_empty()) {
    names.push(format!("{}{}", name, ext));
  }
  names
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;

  path
    .metadata()
    .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
    .unwrap_or(false)
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
