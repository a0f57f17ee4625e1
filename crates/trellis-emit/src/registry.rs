//! Backend registry.

use crate::{EmitOptions, Emitter, EmitterContext};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use trellis_core::{EmitError, RegistryError};
use trellis_ir::BridgeDocument;

/// Table of registered backends, keyed by backend id.
///
/// The registry does no locking of its own. Register every backend before
/// emission starts; after that, `&EmitterRegistry` can be shared freely for
/// lookups and context creation.
#[derive(Default)]
pub struct EmitterRegistry {
    backends: BTreeMap<String, Arc<dyn Emitter>>,
}

impl EmitterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend under `id`.
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyRegistered`] if `id` is taken; the
    /// existing registration is left untouched.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        emitter: impl Emitter + 'static,
    ) -> Result<(), RegistryError> {
        self.register_shared(id, Arc::new(emitter))
    }

    /// Registers an emitter that is already behind an [`Arc`].
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyRegistered`] if `id` is taken.
    pub fn register_shared(
        &mut self,
        id: impl Into<String>,
        emitter: Arc<dyn Emitter>,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.backends.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered { backend: id });
        }
        debug!(backend = %id, "registered backend");
        self.backends.insert(id, emitter);
        Ok(())
    }

    /// Removes a backend. Unknown ids are ignored.
    ///
    /// Contexts created earlier keep working.
    pub fn unregister(&mut self, id: &str) {
        if self.backends.remove(id).is_some() {
            debug!(backend = %id, "unregistered backend");
        }
    }

    /// Removes every backend.
    pub fn clear(&mut self) {
        debug!(count = self.backends.len(), "clearing backend registry");
        self.backends.clear();
    }

    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.backends.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn Emitter>> {
        self.backends.get(id).cloned()
    }

    /// Registered ids in sorted order.
    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Creates an emission context for a registered backend.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownBackend`] listing the registered ids
    /// if `id` is not registered.
    pub fn create_context(
        &self,
        id: &str,
        options: EmitOptions,
    ) -> Result<EmitterContext, RegistryError> {
        let emitter = self.get(id).ok_or_else(|| RegistryError::UnknownBackend {
            backend: id.to_string(),
            available: self.backends().map(str::to_string).collect(),
        })?;
        debug!(backend = %id, "created emitter context");
        Ok(EmitterContext::new(id, emitter, options))
    }
}

impl std::fmt::Debug for EmitterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.backends.keys()).finish()
    }
}

/// Emits a whole document through a context's backend.
///
/// # Errors
/// Returns [`EmitError::Backend`] if the backend fails.
pub fn emit(ctx: &mut EmitterContext, document: &BridgeDocument) -> Result<String, EmitError> {
    ctx.emit_document(document)
}
