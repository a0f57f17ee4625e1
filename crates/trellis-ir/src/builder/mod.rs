//! Source IR to bridge IR.
//!
//! Lowering walks the source tree once, depth-first, resolving kinds,
//! properties and layouts top-down. The remaining passes then run in order
//! on the finished tree shape:
//!
//! 1. handler extraction, which needs the whole tree to find duplicates
//! 2. background inheritance, which needs final parent chains
//! 3. validation of the tree invariant

/// Logs a recovered ambiguity at `info` in verbose builds, `debug` otherwise.
macro_rules! ambiguity {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            ::tracing::info!($($arg)+)
        } else {
            ::tracing::debug!($($arg)+)
        }
    };
}

pub mod background;
pub mod handlers;
pub mod layout;
pub mod normalize;
mod pass;
mod structure;

use crate::{BridgeDocument, Metadata};
use pass::{BackgroundPass, DocumentPass, HandlerExtractionPass, ValidationPass};
use tracing::{debug, info};
use trellis_core::{BuildError, SourceDocument, SourceNode, WindowSpec};

/// Builds bridge documents from source trees.
pub struct Builder {
    verbose: bool,
    source_name: Option<String>,
    passes: Vec<Box<dyn DocumentPass>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a quiet builder with the standard pass order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            verbose: false,
            source_name: None,
            passes: vec![
                Box::new(HandlerExtractionPass),
                Box::new(BackgroundPass),
                Box::new(ValidationPass),
            ],
        }
    }

    /// Raises recovered ambiguities from `debug` to `info`.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Records where the source came from in the document metadata.
    #[must_use]
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Builds a whole source document, window block included.
    ///
    /// # Errors
    /// Returns [`BuildError::MissingRoot`] if the document has no root, or the
    /// first structural failure any pass detects.
    pub fn build(&self, source: &SourceDocument) -> Result<BridgeDocument, BuildError> {
        self.build_root(source.root()?, &source.window)
    }

    /// Builds a tree from its root node and window settings.
    ///
    /// # Errors
    /// Returns the first structural failure any pass detects. Nothing is
    /// returned on failure; the partial document is dropped.
    pub fn build_root(
        &self,
        root: &SourceNode,
        window: &WindowSpec,
    ) -> Result<BridgeDocument, BuildError> {
        let mut draft = structure::lower(root, window, self.verbose)?;
        debug!(
            widgets = draft.document.widgets().len(),
            pending_handlers = draft.pending.len(),
            "lowered source tree"
        );

        for pass in &self.passes {
            draft = pass.run(draft)?;
            debug!(pass = %pass.pass(), "pass finished");
        }

        let mut document = draft.document;
        document.metadata = Metadata {
            source: self.source_name.clone(),
            ..Metadata::default()
        };

        if self.verbose {
            info!(
                widgets = document.widgets().len(),
                handlers = document.handlers().len(),
                "built bridge document"
            );
        }
        Ok(document)
    }
}

/// Builds a bridge document from a source root with default window settings.
///
/// # Errors
/// See [`Builder::build_root`].
pub fn build(root: &SourceNode, verbose: bool) -> Result<BridgeDocument, BuildError> {
    Builder::new()
        .verbose(verbose)
        .build_root(root, &WindowSpec::default())
}
