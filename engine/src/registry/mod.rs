//! Opaque-handle registry for engine instances
//!
//! Embedders that cannot hold Rust values directly hold integer handles
//! instead; the registry owns the engines and maps handles back to them.
//! Handles are process-local, start at 1 (0 is never issued), and are never
//! reused, so a double release is always detected rather than silently
//! resolving to a newer engine.

use std::collections::HashMap;

use thiserror::Error;

/// Errors that can occur during handle lookup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown or already released handle {0}")]
    InvalidHandle(u64),
}

/// Maps opaque `u64` handles to owned engine instances.
///
/// The registry is single-threaded; callers needing shared access wrap it in
/// one coarse lock (see the FFI layer).
///
/// # Example
/// ```
/// use twister_engine_core_rs::{Engine32, HandleRegistry};
///
/// let mut registry = HandleRegistry::new();
/// let handle = registry.register(Engine32::new(42).unwrap());
/// let word = registry.get_mut(handle).unwrap().next_word();
/// registry.release(handle).unwrap();
/// ```
#[derive(Debug)]
pub struct HandleRegistry<E> {
    /// Live engines keyed by handle
    entries: HashMap<u64, E>,

    /// Next handle to issue; monotonically increasing
    next_handle: u64,
}

impl<E> HandleRegistry<E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Take ownership of `engine` and issue a handle for it.
    pub fn register(&mut self, engine: E) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.entries.insert(handle, engine);
        handle
    }

    /// Look up a live engine.
    ///
    /// # Errors
    /// Returns `RegistryError::InvalidHandle` if the handle was never issued
    /// or has already been released.
    pub fn get_mut(&mut self, handle: u64) -> Result<&mut E, RegistryError> {
        self.entries
            .get_mut(&handle)
            .ok_or(RegistryError::InvalidHandle(handle))
    }

    /// Invalidate a handle and drop its engine.
    ///
    /// # Errors
    /// Returns `RegistryError::InvalidHandle` on an unknown or
    /// already-released handle; other entries are unaffected either way.
    pub fn release(&mut self, handle: u64) -> Result<(), RegistryError> {
        self.entries
            .remove(&handle)
            .map(|_| ())
            .ok_or(RegistryError::InvalidHandle(handle))
    }

    /// Number of live engines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for HandleRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
