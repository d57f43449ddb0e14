//! Handle-based PyO3 interface to the twister engines
//!
//! One process-wide registry per width, each behind a single coarse mutex.
//! Handles returned here are opaque integers meaningful only inside the
//! issuing process; they must not be serialized across process boundaries.

use std::sync::{Mutex, MutexGuard, OnceLock};

use pyo3::exceptions::{PyMemoryError, PyValueError};
use pyo3::prelude::*;

use crate::registry::{HandleRegistry, RegistryError};
use crate::twister::{Engine32, Engine64, EngineError};

static ENGINES_32: OnceLock<Mutex<HandleRegistry<Engine32>>> = OnceLock::new();
static ENGINES_64: OnceLock<Mutex<HandleRegistry<Engine64>>> = OnceLock::new();

fn engines_32() -> MutexGuard<'static, HandleRegistry<Engine32>> {
    lock(ENGINES_32.get_or_init(|| Mutex::new(HandleRegistry::new())))
}

fn engines_64() -> MutexGuard<'static, HandleRegistry<Engine64>> {
    lock(ENGINES_64.get_or_init(|| Mutex::new(HandleRegistry::new())))
}

// Registry operations cannot leave the map half-updated, so a poisoned lock
// still guards a consistent registry; recover the guard.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn creation_failed(err: EngineError) -> PyErr {
    PyErr::new::<PyMemoryError, _>(format!("Failed to create engine: {}", err))
}

fn invalid_handle(err: RegistryError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

/// Create a 32-bit engine with the default seed; returns its handle.
#[pyfunction]
pub fn default_32() -> PyResult<u64> {
    let engine = Engine32::with_default_seed().map_err(creation_failed)?;
    Ok(engines_32().register(engine))
}

/// Create a 32-bit engine seeded with `seed`; returns its handle.
#[pyfunction]
pub fn create_32(seed: u32) -> PyResult<u64> {
    let engine = Engine32::new(seed).map_err(creation_failed)?;
    Ok(engines_32().register(engine))
}

/// Next output word of the 32-bit engine behind `handle`.
///
/// Raises ValueError if the handle is unknown or already released.
#[pyfunction]
pub fn generate_32(handle: u64) -> PyResult<u32> {
    let mut registry = engines_32();
    let engine = registry.get_mut(handle).map_err(invalid_handle)?;
    Ok(engine.next_word())
}

/// Release the 32-bit engine behind `handle`, invalidating the handle.
///
/// Raises ValueError on an unknown or already-released handle.
#[pyfunction]
pub fn release_32(handle: u64) -> PyResult<()> {
    engines_32().release(handle).map_err(invalid_handle)
}

/// Create a 64-bit engine with the default seed; returns its handle.
#[pyfunction]
pub fn default_64() -> PyResult<u64> {
    let engine = Engine64::with_default_seed().map_err(creation_failed)?;
    Ok(engines_64().register(engine))
}

/// Create a 64-bit engine seeded with `seed`; returns its handle.
#[pyfunction]
pub fn create_64(seed: u64) -> PyResult<u64> {
    let engine = Engine64::new(seed).map_err(creation_failed)?;
    Ok(engines_64().register(engine))
}

/// Next output word of the 64-bit engine behind `handle`.
///
/// Raises ValueError if the handle is unknown or already released.
#[pyfunction]
pub fn generate_64(handle: u64) -> PyResult<u64> {
    let mut registry = engines_64();
    let engine = registry.get_mut(handle).map_err(invalid_handle)?;
    Ok(engine.next_word())
}

/// Release the 64-bit engine behind `handle`, invalidating the handle.
///
/// Raises ValueError on an unknown or already-released handle.
#[pyfunction]
pub fn release_64(handle: u64) -> PyResult<()> {
    engines_64().release(handle).map_err(invalid_handle)
}
