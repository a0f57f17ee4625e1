//! Implementation of the `trellis build` command.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use trellis_cli::pipeline;
use trellis_cli::utils::{print_file_status, print_status};
use trellis_cli::Project;

/// Executes the `build` command: writes the bridge IR as JSON.
///
/// # Errors
/// Returns an error if the document cannot be built or written.
pub fn execute(source: Option<&Path>, output: Option<&Path>, verbose: bool) -> Result<()> {
    let project = Project::discover()?;
    let source_path = project.source(source);
    print_file_status("Building", &source_path);

    let verbose = verbose || project.config().emit.verbose;
    let document = pipeline::load_document(&source_path, verbose)?;
    let json = document
        .to_json()
        .with_context(|| "Failed to serialize bridge document")?;

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let out_dir = project.out_dir();
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create {}", out_dir.display()))?;
            project.output_path(&out_dir, "bridge.json")
        }
    };
    fs::write(&output_path, json)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    print_status(
        "Finished",
        &format!(
            "{} widgets, {} handlers -> {}",
            document.widgets().len(),
            document.handlers().len(),
            output_path.display()
        ),
    );
    Ok(())
}
