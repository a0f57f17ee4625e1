//! Emitter contract and backend registry.
//!
//! Backends implement [`Emitter`] and are registered in an
//! [`EmitterRegistry`] under a backend id. Emission goes through an
//! [`EmitterContext`] created from the registry:
//!
//! ```rust,ignore
//! let mut registry = EmitterRegistry::new();
//! registry.register("tcltk", TclTkEmitter)?;
//!
//! let mut ctx = registry.create_context("tcltk", EmitOptions::default())?;
//! let script = emit(&mut ctx, &document)?;
//! ctx.release();
//! ```

mod context;
mod emitter;
mod options;
mod registry;
mod writer;

pub use context::EmitterContext;
pub use emitter::Emitter;
pub use options::EmitOptions;
pub use registry::{EmitterRegistry, emit};
pub use writer::CodeWriter;
