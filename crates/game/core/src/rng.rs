//! Deterministic random number generation.
//!
//! Every probabilistic subsystem (encounter generation, loot rolls, conflict
//! durations, lobby draws) draws from a 32-bit xorshift generator seeded from
//! the save's session seed. Given the same seed, the generator must produce
//! the same sequence of values — this is what makes a save replayable from
//! its seed plus its ordered action log.
//!
//! # Stream derivation
//!
//! Rather than instantiating one long-lived generator, each call site builds
//! a short-lived [`Rng`] from a derived seed:
//!
//! - `turn_seed(base, n) = (base + n * 9973) mod 2^32`
//! - per-door streams additionally mix a fixed call-site offset (`offset*13`)
//!   and the door name's character-code sum into `n`
//!
//! The offsets decorrelate the streams used for different purposes within
//! the same turn. Both the constants and the order of draws at each call
//! site are load-bearing: changing either changes every outcome derived from
//! existing seeds.

/// Errors surfaced by the RNG layer.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RngError {
    /// A seed arriving from untyped data was not an integer in u32 range.
    #[error("seed must be an integer in u32 range (got {0})")]
    InvalidSeed(f64),

    /// `pick_one` was called on an empty collection. This indicates a logic
    /// or config defect, not a user-recoverable condition.
    #[error("cannot pick from an empty pool")]
    EmptyPool,
}

/// 32-bit xorshift generator.
///
/// Small state, fast, and trivially reproducible. Statistical quality is
/// adequate for game mechanics; this is not a cryptographic generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Creates a generator from a typed seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Creates a generator from an untyped numeric seed.
    ///
    /// Fails with [`RngError::InvalidSeed`] when the value has a fractional
    /// part or falls outside u32 range. Use this at boundaries where seeds
    /// arrive as raw JSON numbers; typed `u32` construction is infallible.
    pub fn from_numeric(seed: f64) -> Result<Self, RngError> {
        if seed.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&seed) {
            return Err(RngError::InvalidSeed(seed));
        }
        Ok(Self::new(seed as u32))
    }

    /// Advances the state and returns the next raw u32.
    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in `[0, 1)` built from the low 28 bits of `next()`.
    pub fn next_float(&mut self) -> f64 {
        (self.next() & 0x0FFF_FFFF) as f64 / 0x1000_0000 as f64
    }

    /// Uniform inclusive integer in `[min, max]`. Swapped bounds normalize.
    pub fn next_int(&mut self, min: u32, max: u32) -> u32 {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        let range = (max - min + 1) as f64;
        min + (self.next_float() * range) as u32
    }

    /// Uniform pick from a slice.
    pub fn pick_one<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RngError> {
        if items.is_empty() {
            return Err(RngError::EmptyPool);
        }
        let index = self.next_int(0, items.len() as u32 - 1) as usize;
        Ok(&items[index])
    }
}

/// Derives the turn-scoped seed: `(base + turn * 9973) mod 2^32`.
pub fn turn_seed(base: u32, turn: u32) -> u32 {
    base.wrapping_add(turn.wrapping_mul(9973))
}
