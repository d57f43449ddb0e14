//! Twister Engine Core - Deterministic PRNG Engine
//!
//! Bit-exact Mersenne Twister engines (MT19937 and MT19937-64) behind an
//! opaque-handle interface suitable for cross-language embedding.
//!
//! # Architecture
//!
//! - **twister**: the generator core (seeding, twist, temper, untemper)
//! - **registry**: opaque-handle indirection mapping integers to owned engines
//! - **ffi**: PyO3 boundary exposing the handle-based API
//!
//! # Critical Invariants
//!
//! 1. Identical seed produces an identical, infinite output sequence
//! 2. Output matches the published reference streams bit for bit
//! 3. FFI boundary is minimal and safe; errors never unwind across it
//!
//! The generators are NOT cryptographically secure and are not presented as
//! such; bit-exactness exists precisely so that seed recovery and state
//! cloning against reference implementations keep working.

// Module declarations
pub mod registry;
pub mod twister;

// Re-exports for convenience
pub use registry::{HandleRegistry, RegistryError};
pub use twister::{
    Engine32, Engine64, EngineError, MersenneTwister, Mt32, Mt64, TwisterSpec, TwisterWord,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn twister_engine_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::twister::default_32, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::twister::create_32, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::twister::generate_32, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::twister::release_32, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::twister::default_64, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::twister::create_64, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::twister::generate_64, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::twister::release_64, m)?)?;
    Ok(())
}
