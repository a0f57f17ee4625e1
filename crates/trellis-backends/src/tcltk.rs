//! Tcl/Tk script backend.

use crate::tk::{self, Dialect};
use trellis_core::BackendError;
use trellis_emit::{Emitter, EmitterContext};
use trellis_ir::{BridgeDocument, BridgeWidget, Handler, PropertyValue};

/// Emits a standalone Tcl script that builds the window with Tk.
///
/// Handlers without a `tcl` implementation are left out, along with their
/// bindings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TclTkEmitter;

impl TclTkEmitter {
    /// Backend id used by [`crate::register_builtin`].
    pub const ID: &'static str = "tcltk";
}

impl Emitter for TclTkEmitter {
    fn language(&self) -> &str {
        Dialect::Tcl.language()
    }

    fn file_extension(&self) -> &str {
        "tcl"
    }

    fn emit_widget(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError> {
        ctx.comment(format!("{} ({})", widget.id, widget.source_type));
        for command in tk::create(document, widget, Dialect::Tcl) {
            ctx.writer().line(command);
        }
        for (name, value) in &widget.properties {
            self.emit_property(ctx, document, widget, name, value)?;
        }
        for command in tk::bind_commands(document, widget, Dialect::Tcl) {
            ctx.writer().line(command);
        }
        Ok(())
    }

    fn emit_layout(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError> {
        if let Some(command) = tk::layout_command(document, widget, Dialect::Tcl) {
            ctx.writer().line(command);
        }
        Ok(())
    }

    fn emit_property(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), BackendError> {
        let path = tk::path(document, widget);
        if let Some(command) = tk::property_command(&path, widget.kind, name, value, Dialect::Tcl) {
            ctx.writer().line(command);
        }
        Ok(())
    }

    fn emit_handler(
        &self,
        ctx: &mut EmitterContext,
        _document: &BridgeDocument,
        handler: &Handler,
    ) -> Result<(), BackendError> {
        let Some(code) = handler.implementation(self.language()) else {
            return Ok(());
        };

        match &handler.name {
            Some(name) => ctx.comment(format!("{name}: {} on {}", handler.event, handler.widget)),
            None => ctx.comment(format!("{} on {}", handler.event, handler.widget)),
        }
        let writer = ctx.writer();
        writer.line(format!("proc {} {{}} {{", tk::handler_name(&handler.id)));
        writer.indent();
        for line in code.lines() {
            writer.line(line.trim_end());
        }
        writer.dedent();
        writer.line("}");
        Ok(())
    }

    fn emit_document(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
    ) -> Result<(), BackendError> {
        let window = &document.window;
        ctx.comment(format!("Generated by {}", document.metadata.generator));
        ctx.comment(format!(
            "Window: {} ({}x{})",
            window.title, window.width, window.height
        ));
        if ctx.options().include_comments {
            ctx.writer().blank();
        }

        let writer = ctx.writer();
        writer.line("package require Tk");
        writer.line(format!("wm title . {}", tk::quote(&window.title)));
        writer.line(format!("wm geometry . {}x{}", window.width, window.height));
        if !window.resizable {
            writer.line("wm resizable . 0 0");
        }
        if let Some(background) = &window.background {
            writer.line(format!(". configure -background {}", background.rgb()));
        }

        let handlers: Vec<&Handler> = document
            .handlers()
            .iter()
            .filter(|handler| handler.implementation(self.language()).is_some())
            .collect();
        if !handlers.is_empty() {
            ctx.writer().blank();
            ctx.comment("Event handlers");
            for handler in handlers {
                self.emit_handler(ctx, document, handler)?;
            }
        }

        ctx.writer().blank();
        ctx.comment("Widgets");
        for widget in document.widgets() {
            self.emit_widget(ctx, document, widget)?;
            self.emit_layout(ctx, document, widget)?;
        }

        ctx.writer().blank();
        ctx.comment("Start event loop");
        ctx.writer().line("tkwait window .");
        Ok(())
    }
}
