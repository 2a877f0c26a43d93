use crate::consts::APP_NAME;
use std::path::PathBuf;

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  let userprofile = std::env::var("USERPROFILE").expect("USERPROFILE not set");
  PathBuf::from(userprofile)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  let home = std::env::var("HOME").expect("HOME not set");
  PathBuf::from(home)
}

/// Returns the toolchain home (`$CARGO_HOME`, defaulting to `~/.cargo`)
pub fn cargo_home() -> PathBuf {
  std::env::var("CARGO_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".cargo"))
}

/// Returns the directory the toolchain installer places binaries in
pub fn cargo_bin_dir() -> PathBuf {
  cargo_home().join("bin")
}

/// Returns the directory for cache files for the application
#[cfg(windows)]
pub fn cache_dir() -> PathBuf {
  let local_appdata = std::env::var("LOCALAPPDATA").expect("LOCALAPPDATA not set");
  PathBuf::from(local_appdata).join(APP_NAME).join("Cache")
}

/// Returns the directory for cache files for the application
#[cfg(not(windows))]
pub fn cache_dir() -> PathBuf {
  let cache_home = std::env::var("XDG_CACHE_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".cache"));
  cache_home.join(APP_NAME)
}
