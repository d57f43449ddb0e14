//! Generic Mersenne Twister engine
//!
//! One implementation of the recurrence serves both widths; the constant set
//! is supplied by a [`TwisterSpec`] marker type. The engine is bit-exact
//! against the published reference streams, which is what makes downstream
//! seed-recovery and state-cloning work possible.
//!
//! # Algorithm
//!
//! The state is N words plus a cursor. Seeding fills the state from a single
//! word with the multiplier recurrence and marks the state stale. Extraction
//! tempers the word under the cursor; when the cursor reaches N the whole
//! state is advanced in place (the "twist") and the cursor resets. The twist
//! is O(N) but runs once every N extractions, so extraction is O(1) amortized.
//!
//! # Determinism
//!
//! Same seed → same sequence, indefinitely. This is CRITICAL: callers compare
//! outputs word-for-word against other implementations of the same generator.
//!
//! # Security
//!
//! This generator is NOT cryptographically secure. N outputs are enough to
//! reconstruct the full state (see [`MersenneTwister::untemper`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::params::{Mt32, Mt64, TwisterSpec, TwisterWord};

/// Errors that can occur while constructing an engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot allocate {words} words of generator state")]
    Allocation { words: usize },
}

/// The 32-bit engine (MT19937)
pub type Engine32 = MersenneTwister<Mt32>;

/// The 64-bit engine (MT19937-64)
pub type Engine64 = MersenneTwister<Mt64>;

/// Deterministic Mersenne Twister generator, parameterized by word width.
///
/// # Example
/// ```
/// use twister_engine_core_rs::Engine32;
///
/// let mut rng = Engine32::new(12345).unwrap();
/// let word = rng.next_word();
/// ```
///
/// State serializes with serde so a generator can be checkpointed and resumed
/// mid-stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct MersenneTwister<S: TwisterSpec> {
    /// The N recurrence words; the generator's entire recoverable state
    state: Box<[S::Word]>,

    /// Position of the next word to temper, in [0, N]. N means stale: the
    /// state must be twisted before the next extraction.
    index: usize,
}

impl<S: TwisterSpec> MersenneTwister<S> {
    /// Create an engine seeded with `seed`.
    ///
    /// Seeding itself is total; the only failure mode is the state
    /// allocation.
    ///
    /// # Example
    /// ```
    /// use twister_engine_core_rs::Engine64;
    ///
    /// let mut rng = Engine64::new(19650218).unwrap();
    /// let word = rng.next_word();
    /// ```
    pub fn new(seed: S::Word) -> Result<Self, EngineError> {
        let mut words = Vec::new();
        words
            .try_reserve_exact(S::N)
            .map_err(|_| EngineError::Allocation { words: S::N })?;
        words.resize(S::N, S::Word::ZERO);

        let mut engine = Self {
            state: words.into_boxed_slice(),
            index: S::N,
        };
        engine.reseed(seed);
        Ok(engine)
    }

    /// Create an engine seeded with the width's canonical default seed (5489).
    ///
    /// Produces the same sequence as `new(5489)`.
    pub fn with_default_seed() -> Result<Self, EngineError> {
        Self::new(S::DEFAULT_SEED)
    }

    /// Rebuild an engine from an exported state array and cursor.
    ///
    /// Together with [`untemper`](Self::untemper) this allows cloning a live
    /// generator from N of its outputs.
    ///
    /// # Panics
    /// Panics if `words` is not exactly N words long or `index` exceeds N.
    pub fn from_state(words: &[S::Word], index: usize) -> Result<Self, EngineError> {
        assert_eq!(words.len(), S::N, "state must be exactly {} words", S::N);
        assert!(index <= S::N, "index {} out of range [0, {}]", index, S::N);

        let mut state = Vec::new();
        state
            .try_reserve_exact(S::N)
            .map_err(|_| EngineError::Allocation { words: S::N })?;
        state.extend_from_slice(words);

        Ok(Self {
            state: state.into_boxed_slice(),
            index,
        })
    }

    /// Restart the sequence from `seed`, reusing the existing allocation.
    ///
    /// `state[0] = seed; state[i] = f * (state[i-1] ^ (state[i-1] >> (w-2))) + i`,
    /// truncated to the word width. Leaves the state stale so the first
    /// extraction after reseeding twists.
    pub fn reseed(&mut self, seed: S::Word) {
        self.state[0] = seed;
        for i in 1..S::N {
            let prev = self.state[i - 1];
            self.state[i] = S::INIT_F
                .wrapping_mul(prev ^ (prev >> (S::Word::BITS - 2)))
                .wrapping_add(S::Word::from_index(i));
        }
        self.index = S::N;
    }

    /// Extract the next output word.
    ///
    /// Twists first if the state is stale, then tempers the word under the
    /// cursor. Cannot fail for a validly constructed engine.
    ///
    /// # Example
    /// ```
    /// use twister_engine_core_rs::Engine32;
    ///
    /// let mut a = Engine32::new(42).unwrap();
    /// let mut b = Engine32::new(42).unwrap();
    /// assert_eq!(a.next_word(), b.next_word());
    /// ```
    pub fn next_word(&mut self) -> S::Word {
        if self.index == S::N {
            self.twist();
        }
        let word = self.state[self.index];
        self.index += 1;
        Self::temper(word)
    }

    /// Fill `dest` with the little-endian bytes of successive output words.
    ///
    /// A trailing chunk shorter than the word width takes the word's low
    /// bytes; the rest of that word is discarded.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        let stride = (S::Word::BITS / 8) as usize;
        for chunk in dest.chunks_mut(stride) {
            self.next_word().copy_le_bytes(chunk);
        }
    }

    /// The raw (untempered) state words.
    pub fn state_words(&self) -> &[S::Word] {
        &self.state
    }

    /// Position of the next word to temper; N means a twist is pending.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Apply the output transform to a raw state word.
    pub fn temper(mut y: S::Word) -> S::Word {
        y ^= (y >> S::TEMPER_U) & S::TEMPER_D;
        y ^= (y << S::TEMPER_S) & S::TEMPER_B;
        y ^= (y << S::TEMPER_T) & S::TEMPER_C;
        y ^= y >> S::TEMPER_L;
        y
    }

    /// Invert the output transform, recovering the raw state word.
    ///
    /// `untemper(temper(y)) == y` for every word. This is what makes state
    /// cloning from observed outputs possible.
    ///
    /// # Example
    /// ```
    /// use twister_engine_core_rs::Engine32;
    ///
    /// assert_eq!(Engine32::untemper(Engine32::temper(0xdeadbeef)), 0xdeadbeef);
    /// ```
    pub fn untemper(mut y: S::Word) -> S::Word {
        y = undo_shr_xor(y, S::TEMPER_L, S::Word::MAX);
        y = undo_shl_xor(y, S::TEMPER_T, S::TEMPER_C);
        y = undo_shl_xor(y, S::TEMPER_S, S::TEMPER_B);
        y = undo_shr_xor(y, S::TEMPER_U, S::TEMPER_D);
        y
    }

    /// Advance the whole state by one recurrence pass.
    ///
    /// Written in place: positions at or beyond the write cursor still hold
    /// their pre-twist values when they are read, which is exactly what the
    /// recurrence requires.
    fn twist(&mut self) {
        for i in 0..S::N {
            let y = (self.state[i] & S::UPPER_MASK)
                | (self.state[(i + 1) % S::N] & S::LOWER_MASK);
            let mut next = self.state[(i + S::M) % S::N] ^ (y >> 1);
            if y.is_odd() {
                next ^= S::MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }
}

impl<S: TwisterSpec> Iterator for MersenneTwister<S> {
    type Item = S::Word;

    fn next(&mut self) -> Option<S::Word> {
        Some(self.next_word())
    }
}

impl MersenneTwister<Mt32> {
    /// Random f64 in [0.0, 1.0) with 53-bit resolution.
    ///
    /// Draws two words and combines 26 + 27 bits into the mantissa, matching
    /// the reference high-resolution real conversion.
    pub fn next_f64(&mut self) -> f64 {
        let a = (self.next_word() >> 5) as u64;
        let b = (self.next_word() >> 6) as u64;
        (a as f64 * 67_108_864.0 + b as f64) * (1.0 / 9_007_199_254_740_992.0)
    }
}

impl MersenneTwister<Mt64> {
    /// Random f64 in [0.0, 1.0) with 53-bit resolution.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_word() >> 11) as f64 * (1.0 / 9_007_199_254_740_992.0)
    }
}

// Invert y ^= (y >> shift) & mask. Each round fixes `shift` more high bits,
// independent of the mask, so ceil(w / shift) rounds recover the word.
fn undo_shr_xor<W: TwisterWord>(y: W, shift: u32, mask: W) -> W {
    let mut x = y;
    let mut recovered = 0;
    while recovered < W::BITS {
        x = y ^ ((x >> shift) & mask);
        recovered += shift;
    }
    x
}

// Invert y ^= (y << shift) & mask, fixing low bits upward.
fn undo_shl_xor<W: TwisterWord>(y: W, shift: u32, mask: W) -> W {
    let mut x = y;
    let mut recovered = 0;
    while recovered < W::BITS {
        x = y ^ ((x << shift) & mask);
        recovered += shift;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_matches_explicit() {
        let mut default = Engine32::with_default_seed().unwrap();
        let mut explicit = Engine32::new(5489).unwrap();

        for _ in 0..64 {
            assert_eq!(default.next_word(), explicit.next_word());
        }
    }

    #[test]
    fn test_fresh_engine_is_stale() {
        let rng = Engine32::new(1).unwrap();
        assert_eq!(rng.index(), Mt32::N);

        let rng = Engine64::new(1).unwrap();
        assert_eq!(rng.index(), Mt64::N);
    }

    #[test]
    fn test_zero_seed_is_valid() {
        let mut rng = Engine32::new(0).unwrap();
        let first = rng.next_word();
        let mut again = Engine32::new(0).unwrap();
        assert_eq!(first, again.next_word());
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = Engine64::new(777).unwrap();
        let head: Vec<u64> = (&mut rng).take(10).collect();

        rng.reseed(777);
        let again: Vec<u64> = rng.take(10).collect();
        assert_eq!(head, again);
    }

    #[test]
    fn test_untemper_inverts_temper() {
        for value in [0u32, 1, 0xdead_beef, u32::MAX] {
            assert_eq!(Engine32::untemper(Engine32::temper(value)), value);
        }
        for value in [0u64, 1, 0xdead_beef_feed_face, u64::MAX] {
            assert_eq!(Engine64::untemper(Engine64::temper(value)), value);
        }
    }

    #[test]
    fn test_fill_bytes_matches_words() {
        let mut words = Engine32::new(9).unwrap();
        let mut bytes = Engine32::new(9).unwrap();

        let mut buf = [0u8; 8];
        bytes.fill_bytes(&mut buf);

        let mut expected = Vec::new();
        expected.extend_from_slice(&words.next_word().to_le_bytes());
        expected.extend_from_slice(&words.next_word().to_le_bytes());
        assert_eq!(buf.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_fill_bytes_partial_tail() {
        let mut reference = Engine64::new(3).unwrap();
        let word = reference.next_word();

        let mut rng = Engine64::new(3).unwrap();
        let mut buf = [0u8; 3];
        rng.fill_bytes(&mut buf);
        assert_eq!(buf, word.to_le_bytes()[..3]);
    }

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut rng32 = Engine32::new(12345).unwrap();
        let mut rng64 = Engine64::new(12345).unwrap();

        for _ in 0..1000 {
            let a = rng32.next_f64();
            let b = rng64.next_f64();
            assert!((0.0..1.0).contains(&a), "32-bit value {} out of range", a);
            assert!((0.0..1.0).contains(&b), "64-bit value {} out of range", b);
        }
    }

    #[test]
    #[should_panic(expected = "state must be exactly")]
    fn test_from_state_rejects_wrong_length() {
        let _ = Engine32::from_state(&[0u32; 10], 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_state_rejects_bad_index() {
        let words = vec![0u32; Mt32::N];
        let _ = Engine32::from_state(&words, Mt32::N + 1);
    }
}
