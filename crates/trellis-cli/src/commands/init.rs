//! Implementation of the `trellis init` command.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use trellis_cli::utils::SAMPLE_SOURCE;
use trellis_utils::{CONFIG_FILE, Config};

/// Executes the `init` command to initialize a project in the current directory.
///
/// # Errors
/// Returns an error if trellis.toml already exists or if files cannot be created.
pub fn execute() -> Result<()> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;

    if Path::new(CONFIG_FILE).exists() {
        anyhow::bail!("{CONFIG_FILE} already exists in current directory");
    }

    let project_name = current_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("trellis-app");

    let config = Config::new(project_name);
    config.save(CONFIG_FILE)?;

    let source_path = &config.project.source;
    if !source_path.exists() {
        fs::write(source_path, SAMPLE_SOURCE)
            .with_context(|| format!("Failed to create {}", source_path.display()))?;
    }

    println!(
        "{} trellis project '{}'",
        format!("{:>12}", "Created").green().bold(),
        project_name
    );
    println!();
    println!("To get started:");
    println!("  trellis emit");

    Ok(())
}
