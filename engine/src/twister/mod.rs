//! Deterministic Mersenne Twister generation
//!
//! Two bit-exact engines, differing only in word width and constants:
//! [`Engine32`] (MT19937) and [`Engine64`] (MT19937-64). Both are driven by
//! one generic implementation of the seed/twist/temper recurrences.
//!
//! CRITICAL: engines must reproduce the published reference streams exactly.
//! Callers rely on word-for-word equality for seed recovery and state
//! cloning.

mod engine;
mod params;

pub use engine::{Engine32, Engine64, EngineError, MersenneTwister};
pub use params::{Mt32, Mt64, TwisterSpec, TwisterWord};
