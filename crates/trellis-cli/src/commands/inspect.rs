//! Implementation of the `trellis inspect` command.

use anyhow::{Context, Result};
use std::path::Path;
use trellis_cli::pipeline;
use trellis_cli::Project;

/// Executes the `inspect` command: prints the bridge IR.
///
/// # Errors
/// Returns an error if the document cannot be loaded.
pub fn execute(input: Option<&Path>, json: bool, verbose: bool) -> Result<()> {
    let project = Project::discover()?;
    let document = pipeline::load_document(&project.source(input), verbose)?;

    if json {
        let text = document
            .to_json()
            .with_context(|| "Failed to serialize bridge document")?;
        println!("{text}");
    } else {
        print!("{document}");
    }
    Ok(())
}
