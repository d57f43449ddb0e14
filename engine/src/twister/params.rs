//! Word-level primitives and per-width tuning constants
//!
//! The seeding, twist and temper recurrences are identical for both generator
//! widths; only the word type and the constant set differ. `TwisterWord`
//! captures the primitive integer operations the recurrences need, and
//! `TwisterSpec` pins the published constant set for each width at compile
//! time.
//!
//! CRITICAL: these constants define the output sequence bit-for-bit. Any
//! change breaks reproducibility against the reference streams.

use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, BitXor, BitXorAssign, Shl, Shr};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Primitive integer operations required by the generator recurrences.
///
/// Implemented for `u32` and `u64` only; the recurrences are not meaningful
/// for other widths.
pub trait TwisterWord:
    Copy
    + Eq
    + Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + BitXorAssign
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Word width in bits
    const BITS: u32;
    const ZERO: Self;
    const MAX: Self;

    /// Truncating conversion from a state position
    fn from_index(i: usize) -> Self;

    fn wrapping_mul(self, rhs: Self) -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;

    fn is_odd(self) -> bool;

    /// Copy the word's little-endian bytes into `dst`, truncated to
    /// `dst.len()` when the destination is shorter than the word.
    fn copy_le_bytes(self, dst: &mut [u8]);
}

impl TwisterWord for u32 {
    const BITS: u32 = u32::BITS;
    const ZERO: Self = 0;
    const MAX: Self = u32::MAX;

    fn from_index(i: usize) -> Self {
        i as u32
    }

    fn wrapping_mul(self, rhs: Self) -> Self {
        u32::wrapping_mul(self, rhs)
    }

    fn wrapping_add(self, rhs: Self) -> Self {
        u32::wrapping_add(self, rhs)
    }

    fn is_odd(self) -> bool {
        self & 1 == 1
    }

    fn copy_le_bytes(self, dst: &mut [u8]) {
        let bytes = self.to_le_bytes();
        let len = dst.len().min(bytes.len());
        dst[..len].copy_from_slice(&bytes[..len]);
    }
}

impl TwisterWord for u64 {
    const BITS: u32 = u64::BITS;
    const ZERO: Self = 0;
    const MAX: Self = u64::MAX;

    fn from_index(i: usize) -> Self {
        i as u64
    }

    fn wrapping_mul(self, rhs: Self) -> Self {
        u64::wrapping_mul(self, rhs)
    }

    fn wrapping_add(self, rhs: Self) -> Self {
        u64::wrapping_add(self, rhs)
    }

    fn is_odd(self) -> bool {
        self & 1 == 1
    }

    fn copy_le_bytes(self, dst: &mut [u8]) {
        let bytes = self.to_le_bytes();
        let len = dst.len().min(bytes.len());
        dst[..len].copy_from_slice(&bytes[..len]);
    }
}

/// Tuning constants for one generator width.
///
/// Constant names follow the published parameter names of the algorithm
/// (n, m, a; u, d, s, b, t, c, l; f).
pub trait TwisterSpec: Copy + Debug + 'static {
    type Word: TwisterWord;

    /// State length in words
    const N: usize;

    /// Offset of the middle word combined during the twist
    const M: usize;

    /// Twist matrix coefficient, applied when the combined word is odd
    const MATRIX_A: Self::Word;

    /// Mask selecting the top `w - r` bits of a state word
    const UPPER_MASK: Self::Word;

    /// Mask selecting the low `r` bits of a state word
    const LOWER_MASK: Self::Word;

    const TEMPER_U: u32;
    const TEMPER_D: Self::Word;
    const TEMPER_S: u32;
    const TEMPER_B: Self::Word;
    const TEMPER_T: u32;
    const TEMPER_C: Self::Word;
    const TEMPER_L: u32;

    /// Multiplier of the seeding recurrence
    const INIT_F: Self::Word;

    /// Seed used when the caller does not supply one
    const DEFAULT_SEED: Self::Word;
}

/// MT19937: the 32-bit generator, period 2^19937 - 1
#[derive(Debug, Clone, Copy)]
pub struct Mt32;

impl TwisterSpec for Mt32 {
    type Word = u32;

    const N: usize = 624;
    const M: usize = 397;

    const MATRIX_A: u32 = 0x9908_b0df;
    const UPPER_MASK: u32 = 0x8000_0000;
    const LOWER_MASK: u32 = 0x7fff_ffff;

    const TEMPER_U: u32 = 11;
    const TEMPER_D: u32 = 0xffff_ffff;
    const TEMPER_S: u32 = 7;
    const TEMPER_B: u32 = 0x9d2c_5680;
    const TEMPER_T: u32 = 15;
    const TEMPER_C: u32 = 0xefc6_0000;
    const TEMPER_L: u32 = 18;

    const INIT_F: u32 = 1_812_433_253;
    const DEFAULT_SEED: u32 = 5489;
}

/// MT19937-64: the 64-bit variant, same period class
#[derive(Debug, Clone, Copy)]
pub struct Mt64;

impl TwisterSpec for Mt64 {
    type Word = u64;

    const N: usize = 312;
    const M: usize = 156;

    const MATRIX_A: u64 = 0xb502_6f5a_a966_19e9;
    const UPPER_MASK: u64 = 0xffff_ffff_8000_0000;
    const LOWER_MASK: u64 = 0x7fff_ffff;

    const TEMPER_U: u32 = 29;
    const TEMPER_D: u64 = 0x5555_5555_5555_5555;
    const TEMPER_S: u32 = 17;
    const TEMPER_B: u64 = 0x71d6_7fff_eda6_0000;
    const TEMPER_T: u32 = 37;
    const TEMPER_C: u64 = 0xfff7_eee0_0000_0000;
    const TEMPER_L: u32 = 43;

    const INIT_F: u64 = 6_364_136_223_846_793_005;
    const DEFAULT_SEED: u64 = 5489;
}
