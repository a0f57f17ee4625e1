//! Per-emission state.

use crate::{CodeWriter, EmitOptions, Emitter};
use std::any::Any;
use std::sync::Arc;
use tracing::debug;
use trellis_core::{BackendError, EmitError};
use trellis_ir::{BridgeDocument, HandlerId, WidgetId};

/// State for one emission through one backend.
///
/// The context holds its own reference to the emitter, so it stays usable
/// after the backend is unregistered. It is not meant to be shared between
/// concurrent emissions.
pub struct EmitterContext {
    backend: String,
    emitter: Arc<dyn Emitter>,
    options: EmitOptions,
    writer: CodeWriter,
    extension: Option<Box<dyn Any + Send>>,
}

impl EmitterContext {
    /// Creates a context and lets the emitter initialize it.
    #[must_use]
    pub fn new(backend: impl Into<String>, emitter: Arc<dyn Emitter>, options: EmitOptions) -> Self {
        let writer = CodeWriter::new(options.indent.clone(), options.indent_level)
            .with_comment_prefix(emitter.comment_prefix());
        let mut ctx = Self {
            backend: backend.into(),
            emitter: Arc::clone(&emitter),
            options,
            writer,
            extension: None,
        };
        emitter.init_context(&mut ctx);
        ctx
    }

    /// Identifier the backend was registered under.
    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    #[must_use]
    pub fn emitter(&self) -> &dyn Emitter {
        self.emitter.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn writer(&mut self) -> &mut CodeWriter {
        &mut self.writer
    }

    /// Writes a comment if the options ask for comments.
    pub fn comment(&mut self, text: impl AsRef<str>) {
        if self.options.include_comments {
            self.writer.comment(text);
        }
    }

    /// Stores backend-owned state, replacing any previous value.
    pub fn set_extension<T: Any + Send>(&mut self, value: T) {
        self.extension = Some(Box::new(value));
    }

    #[must_use]
    pub fn extension<T: Any + Send>(&self) -> Option<&T> {
        self.extension.as_ref()?.downcast_ref()
    }

    pub fn extension_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
        self.extension.as_mut()?.downcast_mut()
    }

    /// Removes the backend state if it has type `T`.
    pub fn take_extension<T: Any + Send>(&mut self) -> Option<T> {
        let extension = self.extension.take()?;
        match extension.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(other) => {
                self.extension = Some(other);
                None
            }
        }
    }

    #[must_use]
    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    /// Emits the creation of one widget and returns the text produced.
    ///
    /// # Errors
    /// Returns [`EmitError::UnknownWidget`] if the id is not in the document,
    /// or the backend's failure.
    pub fn emit_widget(
        &mut self,
        document: &BridgeDocument,
        id: &WidgetId,
    ) -> Result<String, EmitError> {
        let widget = document.widget(id).ok_or_else(|| self.unknown_widget(id))?;
        self.capture(|emitter, ctx| emitter.emit_widget(ctx, document, widget))
    }

    /// Emits the layout command for one widget and returns the text produced.
    ///
    /// # Errors
    /// Returns [`EmitError::UnknownWidget`] if the id is not in the document,
    /// or the backend's failure.
    pub fn emit_layout(
        &mut self,
        document: &BridgeDocument,
        id: &WidgetId,
    ) -> Result<String, EmitError> {
        let widget = document.widget(id).ok_or_else(|| self.unknown_widget(id))?;
        self.capture(|emitter, ctx| emitter.emit_layout(ctx, document, widget))
    }

    /// Emits one property of a widget. A property the widget does not have
    /// produces no text.
    ///
    /// # Errors
    /// Returns [`EmitError::UnknownWidget`] if the id is not in the document,
    /// or the backend's failure.
    pub fn emit_property(
        &mut self,
        document: &BridgeDocument,
        id: &WidgetId,
        name: &str,
    ) -> Result<String, EmitError> {
        let widget = document.widget(id).ok_or_else(|| self.unknown_widget(id))?;
        let Some(value) = widget.property(name) else {
            return Ok(String::new());
        };
        self.capture(|emitter, ctx| emitter.emit_property(ctx, document, widget, name, value))
    }

    /// Emits one handler table entry and returns the text produced.
    ///
    /// # Errors
    /// Returns [`EmitError::UnknownHandler`] if the id is not in the document,
    /// or the backend's failure.
    pub fn emit_handler(
        &mut self,
        document: &BridgeDocument,
        id: &HandlerId,
    ) -> Result<String, EmitError> {
        let handler = document
            .handler(id)
            .ok_or_else(|| EmitError::UnknownHandler {
                backend: self.backend.clone(),
                handler: id.to_string(),
            })?;
        self.capture(|emitter, ctx| emitter.emit_handler(ctx, document, handler))
    }

    /// Emits a whole program for the document.
    ///
    /// # Errors
    /// Returns [`EmitError::Backend`] wrapping the backend's failure.
    pub fn emit_document(&mut self, document: &BridgeDocument) -> Result<String, EmitError> {
        self.writer.clear();
        debug!(
            backend = %self.backend,
            widgets = document.widgets().len(),
            "emitting document"
        );
        self.capture(|emitter, ctx| emitter.emit_document(ctx, document))
    }

    /// Hands the context back to its emitter for cleanup.
    pub fn release(mut self) {
        let emitter = Arc::clone(&self.emitter);
        emitter.release(&mut self);
        debug!(backend = %self.backend, "released emitter context");
    }

    fn capture(
        &mut self,
        op: impl FnOnce(&dyn Emitter, &mut Self) -> Result<(), BackendError>,
    ) -> Result<String, EmitError> {
        let emitter = Arc::clone(&self.emitter);
        let start = self.writer.len();
        if let Err(source) = op(emitter.as_ref(), self) {
            self.writer.split_off(start);
            return Err(EmitError::Backend {
                backend: self.backend.clone(),
                source,
            });
        }
        Ok(self.writer.split_off(start))
    }

    fn unknown_widget(&self, id: &WidgetId) -> EmitError {
        EmitError::UnknownWidget {
            backend: self.backend.clone(),
            widget: id.to_string(),
        }
    }
}

impl std::fmt::Debug for EmitterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitterContext")
            .field("backend", &self.backend)
            .field("options", &self.options)
            .field("has_extension", &self.extension.is_some())
            .finish_non_exhaustive()
    }
}
