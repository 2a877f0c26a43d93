//! minerboot-lib: environment bootstrapping for the Golden Miner game project
//!
//! This crate provides the logic behind the `minerboot` binary:
//! - `toolchain`: probe the search path for cargo, install via rustup when missing
//! - `pkgs`: Linux-only installation of the native windowing/audio libraries
//! - `run`: build-and-run delegation with exit-code propagation
//! - `bootstrap`: the sequential three-phase orchestrator

pub mod bootstrap;
pub mod consts;
pub mod pkgs;
pub mod platform;
pub mod probe;
pub mod run;
pub mod toolchain;
pub mod types;
