//! Build passes run after lowering.

use super::background::propagate;
use super::handlers::{PendingHandler, extract};
use crate::BridgeDocument;
use tracing::debug;
use trellis_core::{BuildError, BuildPass};

/// A document under construction, handed from pass to pass.
#[derive(Debug)]
pub(crate) struct BuildDraft {
    pub(crate) document: BridgeDocument,
    pub(crate) pending: Vec<PendingHandler>,
}

/// One step of the build pipeline.
///
/// A pass consumes the draft and hands back the transformed one, so a failing
/// pass leaves nothing half-built behind.
pub(crate) trait DocumentPass {
    /// Returns the pass identity used in error reports.
    fn pass(&self) -> BuildPass;

    fn run(&self, draft: BuildDraft) -> Result<BuildDraft, BuildError>;
}

/// Replaces inline handler definitions with table references.
pub(crate) struct HandlerExtractionPass;

impl DocumentPass for HandlerExtractionPass {
    fn pass(&self) -> BuildPass {
        BuildPass::Handlers
    }

    fn run(&self, mut draft: BuildDraft) -> Result<BuildDraft, BuildError> {
        let extracted = extract(&draft.pending);
        debug!(
            pending = draft.pending.len(),
            entries = extracted.table.len(),
            "extracted handlers"
        );

        for (widget_id, references) in extracted.references {
            let Some(widget) = draft.document.widget_mut(&widget_id) else {
                return Err(BuildError::DanglingHandler {
                    pass: self.pass(),
                    widget: widget_id.to_string(),
                    handler: references
                        .first()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                });
            };
            widget.handlers = references;
        }

        draft.document.set_handlers(extracted.table);
        draft.pending.clear();
        Ok(draft)
    }
}

/// Resolves background inheritance on the finished tree shape.
pub(crate) struct BackgroundPass;

impl DocumentPass for BackgroundPass {
    fn pass(&self) -> BuildPass {
        BuildPass::Background
    }

    fn run(&self, mut draft: BuildDraft) -> Result<BuildDraft, BuildError> {
        if draft.document.root().is_none() {
            return Err(BuildError::MissingRoot);
        }
        propagate(&mut draft.document);
        Ok(draft)
    }
}

/// Re-checks the tree invariant before the document is handed out.
pub(crate) struct ValidationPass;

impl DocumentPass for ValidationPass {
    fn pass(&self) -> BuildPass {
        BuildPass::Validation
    }

    fn run(&self, draft: BuildDraft) -> Result<BuildDraft, BuildError> {
        draft.document.validate_in(self.pass())?;
        Ok(draft)
    }
}
