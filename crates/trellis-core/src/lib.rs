//! Core types and utilities for the trellis UI compiler.
//!
//! This crate provides the error taxonomy, node paths used to localize
//! failures, and the source IR data model shared by every compiler stage.

pub mod error;
pub mod path;
pub mod source;

pub use error::{BackendError, BuildError, BuildPass, EmitError, Error, RegistryError, Result};
pub use path::{NodePath, PathSegment};
pub use source::{SourceDocument, SourceEvent, SourceNode, SourceValue, WindowSpec};
