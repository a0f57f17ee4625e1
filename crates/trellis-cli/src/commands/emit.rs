//! Implementation of the `trellis emit` command.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use trellis_cli::pipeline;
use trellis_cli::utils::{print_file_status, print_status};
use trellis_cli::Project;

/// Arguments of the `emit` command.
pub struct EmitArgs {
    pub backends: Vec<String>,
    pub input: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub stdout: bool,
    pub no_comments: bool,
    pub verbose: bool,
}

/// Executes the `emit` command: builds once and runs every requested backend.
///
/// # Errors
/// Returns an error if the document cannot be built, a backend is unknown or
/// fails, or output cannot be written.
pub fn execute(args: &EmitArgs) -> Result<()> {
    let project = Project::discover()?;
    let settings = &project.config().emit;

    let backends = if args.backends.is_empty() {
        settings.backends.clone()
    } else {
        args.backends.clone()
    };
    if backends.is_empty() {
        anyhow::bail!("No backend given and none configured in [emit] backends");
    }

    let mut options = settings.to_options();
    if args.no_comments {
        options.include_comments = false;
    }
    options.verbose |= args.verbose;

    let source_path = project.source(args.input.as_deref());
    let document = pipeline::load_document(&source_path, options.verbose)?;
    let registry = pipeline::builtin_registry()?;

    let out_dir = args.out_dir.clone().unwrap_or_else(|| project.out_dir());
    for backend in &backends {
        let code = pipeline::generate(&registry, backend, &document, options.clone())?;

        if args.stdout {
            print!("{code}");
            continue;
        }

        let extension = registry
            .get(backend)
            .map(|emitter| emitter.file_extension().to_string())
            .unwrap_or_else(|| backend.clone());
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create {}", out_dir.display()))?;
        let output_path = project.output_path(&out_dir, &extension);
        fs::write(&output_path, code)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        print_file_status("Emitted", &output_path);
    }

    if !args.stdout {
        print_status("Finished", &format!("{} backend(s)", backends.len()));
    }
    Ok(())
}
