//! Error types and result aliases for the trellis compiler.
//!
//! Build failures, registry misuse and emitter failures are distinct types so
//! callers can tell a bad input document apart from a bad backend setup.

use crate::NodePath;
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// The build pass a structural failure was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildPass {
    /// Depth-first lowering of the source tree into widgets.
    Structure,
    /// Handler extraction and deduplication.
    Handlers,
    /// Root-down background inheritance.
    Background,
    /// Final tree invariant check.
    Validation,
}

impl BuildPass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Handlers => "handlers",
            Self::Background => "background",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for BuildPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal failure while turning a source tree into a bridge document.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum BuildError {
    #[error("unknown widget type `{type_name}` at {path}")]
    #[diagnostic(
        code(trellis::build::unknown_type),
        help("add a mapping for this type or fix the source document")
    )]
    UnknownWidgetType { type_name: String, path: NodePath },

    #[error("source document has no root component")]
    #[diagnostic(code(trellis::build::missing_root))]
    MissingRoot,

    #[error("invalid source document: {message}")]
    #[diagnostic(code(trellis::build::invalid_source))]
    InvalidSource { message: String },

    #[error("[{pass}] widget `{widget}` references missing child `{child}`")]
    #[diagnostic(code(trellis::build::dangling_child))]
    DanglingChild {
        pass: BuildPass,
        widget: String,
        child: String,
    },

    #[error("[{pass}] widget `{child}` is claimed as a child by `{widget}` but already has a parent")]
    #[diagnostic(code(trellis::build::multiple_parents))]
    MultipleParents {
        pass: BuildPass,
        widget: String,
        child: String,
    },

    #[error("[{pass}] cycle detected through widget `{widget}`")]
    #[diagnostic(code(trellis::build::cycle))]
    Cycle { pass: BuildPass, widget: String },

    #[error("[{pass}] widget `{widget}` is not reachable from the root")]
    #[diagnostic(code(trellis::build::unreachable))]
    Unreachable { pass: BuildPass, widget: String },

    #[error("[{pass}] widget `{widget}` references missing handler `{handler}`")]
    #[diagnostic(code(trellis::build::dangling_handler))]
    DanglingHandler {
        pass: BuildPass,
        widget: String,
        handler: String,
    },

    #[error("[{pass}] widget id `{widget}` is used more than once")]
    #[diagnostic(code(trellis::build::duplicate_id))]
    DuplicateWidgetId { pass: BuildPass, widget: String },

    #[error("[{pass}] handler id `{handler}` is used more than once")]
    #[diagnostic(code(trellis::build::duplicate_handler_id))]
    DuplicateHandlerId { pass: BuildPass, handler: String },

    #[error("[{pass}] invalid id `{id}`")]
    #[diagnostic(
        code(trellis::build::invalid_id),
        help("ids start with a lower-case letter and contain only a-z, 0-9 and `-`")
    )]
    InvalidId { pass: BuildPass, id: String },

    #[error("[{pass}] widget `{widget}` names `{parent}` as its parent but is not one of its children")]
    #[diagnostic(code(trellis::build::parent_mismatch))]
    ParentMismatch {
        pass: BuildPass,
        widget: String,
        parent: String,
    },
}

impl BuildError {
    /// Returns the pass that produced this error, if it is pass-specific.
    #[must_use]
    pub fn pass(&self) -> Option<BuildPass> {
        match self {
            Self::UnknownWidgetType { .. } | Self::MissingRoot | Self::InvalidSource { .. } => {
                Some(BuildPass::Structure)
            }
            Self::DanglingChild { pass, .. }
            | Self::MultipleParents { pass, .. }
            | Self::Cycle { pass, .. }
            | Self::Unreachable { pass, .. }
            | Self::DanglingHandler { pass, .. }
            | Self::DuplicateWidgetId { pass, .. }
            | Self::DuplicateHandlerId { pass, .. }
            | Self::InvalidId { pass, .. }
            | Self::ParentMismatch { pass, .. } => Some(*pass),
        }
    }
}

/// Misuse of the emitter registry.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("backend `{backend}` is already registered")]
    #[diagnostic(
        code(trellis::registry::already_registered),
        help("unregister the backend before registering it again")
    )]
    AlreadyRegistered { backend: String },

    #[error("unknown backend `{backend}` (available: {})", .available.join(", "))]
    #[diagnostic(code(trellis::registry::unknown_backend))]
    UnknownBackend {
        backend: String,
        available: Vec<String>,
    },
}

/// Failure reported by a backend. The core never inspects it beyond the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<fmt::Error> for BackendError {
    fn from(_: fmt::Error) -> Self {
        Self::new("formatting failed")
    }
}

/// Failure while emitting a bridge document through a backend.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum EmitError {
    #[error("emission failed for backend `{backend}`: {source}")]
    #[diagnostic(code(trellis::emit::backend))]
    Backend {
        backend: String,
        #[source]
        source: BackendError,
    },

    #[error("backend `{backend}`: no widget `{widget}` in document")]
    #[diagnostic(code(trellis::emit::unknown_widget))]
    UnknownWidget { backend: String, widget: String },

    #[error("backend `{backend}`: no handler `{handler}` in document")]
    #[diagnostic(code(trellis::emit::unknown_handler))]
    UnknownHandler { backend: String, handler: String },
}

/// Main error type for the trellis compiler.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),
}

/// Result type alias using the trellis Error type.
pub type Result<T> = std::result::Result<T, Error>;
