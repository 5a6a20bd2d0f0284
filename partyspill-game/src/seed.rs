//! Deterministic seeding helpers.
//!
//! Bingo boards are derived from a string seed with a tiny linear
//! congruential generator so the same player always sees the same board.
//! Everything else that needs reproducible randomness maps a string to a
//! `u64` and seeds a ChaCha generator from it.

use crate::constants::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER, STRING_HASH_MULTIPLIER};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Rolling `h = h * 31 + unit` over UTF-16 code units, wrapped to 32 bits.
#[must_use]
pub fn string_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0_i32, |acc, unit| {
        acc.wrapping_mul(STRING_HASH_MULTIPLIER)
            .wrapping_add(i32::from(unit))
    })
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Map an arbitrary string to a 64-bit seed.
#[must_use]
pub fn seed_from_str(input: &str) -> u64 {
    fnv1a64(input.as_bytes())
}

/// ChaCha generator seeded from a string.
#[must_use]
pub fn rng_from_str(input: &str) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed_from_str(input))
}

/// Linear congruential generator: `state = (state * 9301 + 49297) mod 233280`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededLcg {
    state: u64,
}

impl SeededLcg {
    #[must_use]
    pub fn from_seed(seed: &str) -> Self {
        Self {
            state: u64::from(string_hash(seed).unsigned_abs()),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        #[allow(clippy::cast_precision_loss)]
        let unit = self.state as f64 / LCG_MODULUS as f64;
        unit
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let idx = (self.next_unit() * bound as f64) as usize;
        idx.min(bound.saturating_sub(1))
    }

    /// Fisher-Yates shuffle driven by this generator.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}
