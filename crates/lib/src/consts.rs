//! Project-wide constants.

/// Application name, used for cache paths.
pub const APP_NAME: &str = "minerboot";

/// Executable probed to decide whether the toolchain is installed.
pub const TOOLCHAIN_BIN: &str = "cargo";

/// Pinned HTTPS endpoint serving the toolchain installer script.
pub const INSTALLER_URL: &str = "https://sh.rustup.rs";

/// Filename the downloaded installer is stored under in the cache directory.
pub const INSTALLER_FILENAME: &str = "rustup-init.sh";

/// Native libraries the game's windowing/audio stack links against on Linux,
/// installed in this order.
pub const SYSTEM_PACKAGES: [&str; 3] = ["libasound2-dev", "libudev-dev", "pkg-config"];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn installer_url_is_https() {
    assert!(INSTALLER_URL.starts_with("https://"));
  }

  #[test]
  fn system_packages_order() {
    // apt receives the libraries in exactly this order
    assert_eq!(SYSTEM_PACKAGES, ["libasound2-dev", "libudev-dev", "pkg-config"]);
  }
}
