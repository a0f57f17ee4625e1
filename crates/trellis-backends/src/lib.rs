//! Built-in code generation backends.
//!
//! - [`TclTkEmitter`] (`tcltk`): a Tcl script using Tk.
//! - [`LimboEmitter`] (`limbo`): an Inferno Limbo module driving Tk.
//! - [`RustEmitter`] (`rust`): Rust items describing the widget tree.

mod limbo;
mod rust;
mod tcltk;
mod tk;

pub use limbo::LimboEmitter;
pub use rust::RustEmitter;
pub use tcltk::TclTkEmitter;

use tracing::debug;
use trellis_core::RegistryError;
use trellis_emit::EmitterRegistry;

/// Registers every built-in backend.
///
/// # Errors
/// Returns [`RegistryError::AlreadyRegistered`] if one of the built-in ids
/// is taken.
pub fn register_builtin(registry: &mut EmitterRegistry) -> Result<(), RegistryError> {
    registry.register(TclTkEmitter::ID, TclTkEmitter)?;
    registry.register(LimboEmitter::ID, LimboEmitter::default())?;
    registry.register(RustEmitter::ID, RustEmitter)?;
    debug!(backends = registry.len(), "registered built-in backends");
    Ok(())
}
