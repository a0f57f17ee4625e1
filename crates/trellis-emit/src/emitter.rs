//! The contract every backend implements.

use crate::EmitterContext;
use trellis_core::BackendError;
use trellis_ir::{BridgeDocument, BridgeWidget, Handler, PropertyValue};

/// A backend code generator.
///
/// Per-item operations append to the context's writer. Backends read the
/// document and never mutate it; any per-emission state belongs in the
/// context's extension slot, not in the emitter, so one emitter can serve
/// several contexts at once.
pub trait Emitter: Send + Sync {
    /// Key looked up in handler implementation maps, e.g. `tcl`.
    fn language(&self) -> &str;

    /// Extension for generated files, without the dot.
    fn file_extension(&self) -> &str;

    /// Line comment marker of the target language.
    fn comment_prefix(&self) -> &str {
        "#"
    }

    /// Sets up backend state when a context is created.
    fn init_context(&self, _ctx: &mut EmitterContext) {}

    /// Emits the creation of one widget.
    ///
    /// # Errors
    /// Returns a backend-specific failure.
    fn emit_widget(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError>;

    /// Emits the layout command placing one widget in its parent.
    ///
    /// # Errors
    /// Returns a backend-specific failure.
    fn emit_layout(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError>;

    /// Emits one property assignment on an existing widget.
    ///
    /// # Errors
    /// Returns a backend-specific failure.
    fn emit_property(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), BackendError>;

    /// Emits one handler table entry. Handlers without an implementation in
    /// [`language`](Self::language) must be skipped, not reported.
    ///
    /// # Errors
    /// Returns a backend-specific failure.
    fn emit_handler(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        handler: &Handler,
    ) -> Result<(), BackendError>;

    /// Emits a complete program for the document.
    ///
    /// # Errors
    /// Returns a backend-specific failure.
    fn emit_document(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
    ) -> Result<(), BackendError>;

    /// Frees backend state held by the context.
    fn release(&self, _ctx: &mut EmitterContext) {}
}
