//! minerboot - environment bootstrapper for the Golden Miner game project.
//!
//! Prepares the build environment (Rust toolchain, native windowing/audio
//! libraries on Linux) and delegates to `cargo run`. A bare `minerboot`
//! performs the full sequence; subcommands expose the individual phases.

mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_run, cmd_setup, cmd_status, cmd_up};

/// Prepare the build environment for the Golden Miner game and launch it.
#[derive(Parser)]
#[command(name = "minerboot")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Install anything missing, then build and run the game (default)
  Up {
    /// Project directory containing the game's Cargo.toml
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Show the steps that would run without executing them
    #[arg(long)]
    dry_run: bool,
  },

  /// Prepare the environment without launching the game
  Setup {
    /// Show the steps that would run without executing them
    #[arg(long)]
    dry_run: bool,
  },

  /// Build and run the game without touching the environment
  Run {
    /// Project directory containing the game's Cargo.toml
    #[arg(default_value = ".")]
    dir: PathBuf,
  },

  /// Show platform, toolchain, and package state
  Status {
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
  },
}

impl Default for Commands {
  fn default() -> Self {
    Commands::Up {
      dir: PathBuf::from("."),
      dry_run: false,
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .without_time()
    .init();

  let code = match cli.command.unwrap_or_default() {
    Commands::Up { dir, dry_run } => cmd_up(&dir, dry_run)?,
    Commands::Setup { dry_run } => cmd_setup(dry_run)?,
    Commands::Run { dir } => cmd_run(&dir)?,
    Commands::Status { json } => {
      cmd_status(json)?;
      0
    }
  };

  std::process::exit(code);
}
