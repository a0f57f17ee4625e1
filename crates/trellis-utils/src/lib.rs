//! Shared utilities for the trellis tools.

pub mod config;

pub use config::{CONFIG_FILE, Config, EmitConfig, ProjectConfig};
