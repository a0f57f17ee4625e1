//! Limbo backend: an Inferno module driving Tk through `tk->cmd`.

use crate::tk::{self, Dialect};
use trellis_core::BackendError;
use trellis_emit::{Emitter, EmitterContext};
use trellis_ir::{BridgeDocument, BridgeWidget, Handler, PropertyValue};

/// Emits a Limbo module whose `init` builds the window and runs the event
/// loop. Handler code from the `limbo` implementations becomes one function
/// per handler, reached through a `cmd` channel.
#[derive(Debug, Clone)]
pub struct LimboEmitter {
    module: String,
}

/// Handler functions emitted so far, kept in the context.
#[derive(Debug, Default)]
struct Dispatch {
    functions: Vec<String>,
}

impl Default for LimboEmitter {
    fn default() -> Self {
        Self::new("TrellisApp")
    }
}

impl LimboEmitter {
    /// Backend id used by [`crate::register_builtin`].
    pub const ID: &'static str = "limbo";

    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    fn cmd(ctx: &mut EmitterContext, command: &str) {
        ctx.writer()
            .line(format!("tk->cmd(top, {});", string_literal(command)));
    }
}

/// Writes `text` as a Limbo string literal.
fn string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for c in text.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\t' => literal.push_str("\\t"),
            _ => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

impl Emitter for LimboEmitter {
    fn language(&self) -> &str {
        Dialect::Limbo.language()
    }

    fn file_extension(&self) -> &str {
        "b"
    }

    fn init_context(&self, ctx: &mut EmitterContext) {
        ctx.set_extension(Dispatch::default());
    }

    fn emit_widget(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError> {
        ctx.comment(format!("{} ({})", widget.id, widget.source_type));
        for command in tk::create(document, widget, Dialect::Limbo) {
            Self::cmd(ctx, &command);
        }
        for (name, value) in &widget.properties {
            self.emit_property(ctx, document, widget, name, value)?;
        }
        for command in tk::bind_commands(document, widget, Dialect::Limbo) {
            Self::cmd(ctx, &command);
        }
        Ok(())
    }

    fn emit_layout(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
        widget: &BridgeWidget,
    ) -> Result<(), BackendError> {
        if let Some(command) = tk::layout_command(document, widget, Dialect::Limbo) {
            Self::cmd(ctx, &command);
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
        if let Some(command) =
            tk::property_command(&path, widget.kind, name, value, Dialect::Limbo)
        {
            Self::cmd(ctx, &command);
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

        let function = tk::handler_name(&handler.id);
        ctx.comment(format!("{} on {}", handler.event, handler.widget));
        let writer = ctx.writer();
        writer.line(format!("{function}()"));
        writer.line("{");
        writer.indent();
        for line in code.lines() {
            writer.line(line.trim_end());
        }
        writer.dedent();
        writer.line("}");
        writer.blank();

        if let Some(dispatch) = ctx.extension_mut::<Dispatch>() {
            dispatch.functions.push(function);
        }
        Ok(())
    }

    fn emit_document(
        &self,
        ctx: &mut EmitterContext,
        document: &BridgeDocument,
    ) -> Result<(), BackendError> {
        let window = &document.window;
        let module = &self.module;
        if let Some(dispatch) = ctx.extension_mut::<Dispatch>() {
            dispatch.functions.clear();
        }

        ctx.comment(format!("Generated by {}", document.metadata.generator));
        ctx.comment(format!(
            "Window: {} ({}x{})",
            window.title, window.width, window.height
        ));
        let writer = ctx.writer();
        writer.line(format!("implement {module};"));
        writer.blank();
        for (file, var, ty) in [
            ("sys.m", "sys", "Sys"),
            ("draw.m", "draw", "Draw"),
            ("tk.m", "tk", "Tk"),
            ("tkclient.m", "tkclient", "Tkclient"),
        ] {
            writer.line(format!("include \"{file}\";"));
            writer.indent().line(format!("{var}: {ty};"));
            writer.dedent();
        }
        writer.blank();
        writer.line(format!("{module}: module"));
        writer.line("{");
        writer
            .indent()
            .line("init: fn(ctxt: ref Draw->Context, argv: list of string);");
        writer.dedent().line("};");
        writer.blank();

        for handler in document.handlers() {
            self.emit_handler(ctx, document, handler)?;
        }

        let writer = ctx.writer();
        writer.line("init(ctxt: ref Draw->Context, nil: list of string)");
        writer.line("{");
        writer.indent();
        for (var, ty) in [
            ("sys", "Sys"),
            ("draw", "Draw"),
            ("tk", "Tk"),
            ("tkclient", "Tkclient"),
        ] {
            writer.line(format!("{var} = load {ty} {ty}->PATH;"));
        }
        writer.line("tkclient->init();");
        writer.blank();
        writer.line(format!(
            "(top, wmctl) := tkclient->toplevel(ctxt, \"\", {}, Tkclient->Appl);",
            string_literal(&window.title)
        ));
        writer.line("cmdch := chan of string;");
        writer.line("tk->namechan(top, cmdch, \"cmd\");");

        let mut geometry = format!(". configure -width {} -height {}", window.width, window.height);
        if let Some(background) = &window.background {
            geometry.push_str(&format!(" -background {}", background.rgb()));
        }
        Self::cmd(ctx, &geometry);
        ctx.writer().blank();

        for widget in document.widgets() {
            self.emit_widget(ctx, document, widget)?;
            self.emit_layout(ctx, document, widget)?;
        }
        Self::cmd(ctx, "update");
        ctx.writer().blank();

        let writer = ctx.writer();
        writer.line("tkclient->onscreen(top, nil);");
        writer.line("tkclient->startinput(top, \"kbd\" :: \"ptr\" :: nil);");
        writer.line("for(;;) alt {");
        for (pattern, action) in [
            ("s := <-top.ctxt.kbd =>", "tk->keyboard(top, s);"),
            ("s := <-top.ctxt.ptr =>", "tk->pointer(top, *s);"),
            (
                "s := <-top.ctxt.ctl or s = <-top.wreq or s = <-wmctl =>",
                "tkclient->wmctl(top, s);",
            ),
            ("s := <-cmdch =>", "dispatch(s);"),
        ] {
            writer.line(pattern);
            writer.indent().line(action);
            writer.dedent();
        }
        writer.line("}");
        writer.dedent().line("}");
        writer.blank();

        let functions = ctx
            .extension::<Dispatch>()
            .map(|dispatch| dispatch.functions.clone())
            .unwrap_or_default();
        let writer = ctx.writer();
        writer.line("dispatch(s: string)");
        writer.line("{");
        writer.indent().line("case s {");
        for function in &functions {
            writer.line(format!("\"{function}\" =>"));
            writer.indent().line(format!("{function}();"));
            writer.dedent();
        }
        writer.line("* =>");
        writer
            .indent()
            .line("sys->fprint(sys->fildes(2), \"unknown command %s\\n\", s);");
        writer.dedent().line("}");
        writer.dedent().line("}");
        Ok(())
    }

    fn release(&self, ctx: &mut EmitterContext) {
        ctx.take_extension::<Dispatch>();
    }
}
