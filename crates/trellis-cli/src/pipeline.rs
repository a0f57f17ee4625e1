//! Compilation pipeline stages.
//!
//! Failures are rendered as miette reports on stderr and returned as a short
//! summary error.

use anyhow::{Context, Result};
use miette::Diagnostic;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use trellis_backends::register_builtin;
use trellis_core::SourceDocument;
use trellis_emit::{EmitOptions, EmitterRegistry, emit};
use trellis_ir::{BRIDGE_FORMAT, BridgeDocument, Builder};

fn report(error: impl Diagnostic + Send + Sync + 'static, summary: &str) -> anyhow::Error {
    eprintln!("{:?}", miette::Report::new(error));
    anyhow::anyhow!("{summary}")
}

/// Parses source-IR JSON.
///
/// # Errors
/// Returns an error if the text is not a valid source document.
pub fn parse_source(text: &str) -> Result<SourceDocument> {
    SourceDocument::from_json(text).map_err(|e| report(e, "Failed to read source document"))
}

/// Builds the bridge IR for a source document.
///
/// # Errors
/// Returns an error if any build pass fails.
pub fn build(source: &SourceDocument, name: &str, verbose: bool) -> Result<BridgeDocument> {
    let document = Builder::new()
        .verbose(verbose)
        .source_name(name)
        .build(source)
        .map_err(|e| report(e, "Build failed"))?;
    info!(
        source = name,
        widgets = document.widgets().len(),
        handlers = document.handlers().len(),
        "built bridge document"
    );
    Ok(document)
}

/// Returns true if `text` is a serialized bridge document rather than source IR.
#[must_use]
pub fn is_bridge(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| {
            value
                .get("format")
                .and_then(serde_json::Value::as_str)
                .map(|format| format == BRIDGE_FORMAT)
        })
        .unwrap_or(false)
}

/// Loads a bridge document from `path`, building it first if the file holds
/// source IR. Loaded bridge documents are validated.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, built or validated.
pub fn load_document(path: &Path, verbose: bool) -> Result<BridgeDocument> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("<input>");

    if is_bridge(&text) {
        debug!(path = %path.display(), "loading bridge document");
        return BridgeDocument::from_json(&text)
            .map_err(|e| report(e, "Invalid bridge document"));
    }

    let source = parse_source(&text)?;
    build(&source, name, verbose)
}

/// Creates a registry holding the built-in backends.
///
/// # Errors
/// Returns an error if a built-in backend id is registered twice.
pub fn builtin_registry() -> Result<EmitterRegistry> {
    let mut registry = EmitterRegistry::new();
    register_builtin(&mut registry)?;
    Ok(registry)
}

/// Generates code for one backend.
///
/// # Errors
/// Returns an error if the backend is unknown or fails.
pub fn generate(
    registry: &EmitterRegistry,
    backend: &str,
    document: &BridgeDocument,
    options: EmitOptions,
) -> Result<String> {
    let mut ctx = registry
        .create_context(backend, options)
        .map_err(|e| report(e, "Unknown backend"))?;
    let code = emit(&mut ctx, document).map_err(|e| report(e, "Code generation failed"))?;
    ctx.release();
    Ok(code)
}
