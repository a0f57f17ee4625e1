//! Implementation of the `trellis backends` command.

use anyhow::Result;
use colored::Colorize;
use trellis_cli::pipeline;

/// Executes the `backends` command: lists registered backends.
///
/// # Errors
/// Returns an error if the built-in backends cannot be registered.
pub fn execute() -> Result<()> {
    let registry = pipeline::builtin_registry()?;
    for backend in registry.backends() {
        let Some(emitter) = registry.get(backend) else {
            continue;
        };
        println!(
            "{} {} (.{})",
            format!("{backend:<8}").bold(),
            emitter.language(),
            emitter.file_extension()
        );
    }
    Ok(())
}
