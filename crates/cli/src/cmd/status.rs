//! Status command implementation.
//!
//! Read-only report of platform identity, toolchain presence, and the
//! install state of the required native libraries. Nothing here mutates
//! the machine.

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use minerboot_lib::consts::SYSTEM_PACKAGES;
use minerboot_lib::pkgs;
use minerboot_lib::platform::os::Os;
use minerboot_lib::platform::platform_triple;
use minerboot_lib::toolchain::ToolchainStatus;

use crate::output::{print_json, print_stat, symbols};

pub fn cmd_status(json: bool) -> Result<()> {
  let os = Os::current();
  let toolchain = ToolchainStatus::detect();

  let packages: Vec<(&str, bool)> = if os == Some(Os::Linux) {
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(async {
      let mut out = Vec::new();
      for pkg in SYSTEM_PACKAGES {
        out.push((pkg, pkgs::installed(pkg).await));
      }
      out
    })
  } else {
    Vec::new()
  };

  if json {
    let package_list: Vec<_> = packages
      .iter()
      .map(|(name, installed)| serde_json::json!({ "name": name, "installed": installed }))
      .collect();
    let json_output = serde_json::json!({
      "platform": platform_triple(),
      "toolchain": {
        "installed": toolchain.is_installed(),
        "cargo": toolchain.cargo.as_ref().map(|p| p.display().to_string()),
      },
      "packages": package_list,
    });
    print_json(&json_output)?;
  } else {
    println!("minerboot v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print_stat("Platform", platform_triple().as_deref().unwrap_or("unknown"));
    match &toolchain.cargo {
      Some(path) => print_stat("Toolchain", &format!("cargo at {}", path.display())),
      None => print_stat("Toolchain", "not installed"),
    }

    if packages.is_empty() {
      print_stat("Packages", "skipped (not linux)");
    } else {
      println!();
      println!("Packages:");
      for (name, installed) in &packages {
        let symbol = if *installed {
          symbols::SUCCESS
            .if_supports_color(Stream::Stdout, |s| s.green())
            .to_string()
        } else {
          symbols::ERROR
            .if_supports_color(Stream::Stdout, |s| s.red())
            .to_string()
        };
        println!("  {} {}", symbol, name);
      }
    }
  }

  Ok(())
}
