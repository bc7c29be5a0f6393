//! Deterministic hash folding.
//!
//! Every contribution is reduced to a `u64` with [`hash_one`] and folded into
//! a [`HashCombiner`]. Both use `FxHasher`, which carries no random state, so
//! a value hashes identically for the whole life of the process (and across
//! processes on the same target).

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Contribution of an absent reference-kind member.
///
/// Non-zero, so an absent member never hashes like a present one whose own
/// hash happens to be zero.
pub const NULL_HASH: u64 = 0x2545_F491_4F6C_DD1D;

/// Contribution of an absent sequence.
///
/// Distinct from the hash of an empty sequence, which is the value of an
/// empty fold.
pub const ABSENT_SEQUENCE_HASH: u64 = 0x9E37_79B9_7F4A_7C15;

/// Hash a single value.
#[inline]
pub fn hash_one<V: Hash + ?Sized>(value: &V) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Order-sensitive accumulator for per-member hash contributions.
///
/// Folding `a` then `b` differs from folding `b` then `a`, and folding the
/// same contribution twice does not cancel out. The state starts from an odd
/// seed, so zero contributions still move it: `[]`, `[0]` and `[0, 0]` all
/// fold differently.
pub struct HashCombiner {
    state: FxHasher,
}

/// Odd, so the seeded state is never zero.
const COMBINER_SEED: u64 = 0xCBF2_9CE4_8422_2325;

impl Default for HashCombiner {
    fn default() -> Self {
        let mut state = FxHasher::default();
        state.write_u64(COMBINER_SEED);
        HashCombiner { state }
    }
}

impl HashCombiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the hash of `value`.
    #[inline]
    pub fn add<V: Hash + ?Sized>(&mut self, value: &V) {
        self.add_u64(hash_one(value));
    }

    /// Fold an already computed contribution.
    #[inline]
    pub fn add_u64(&mut self, contribution: u64) {
        self.state.write_u64(contribution);
    }

    #[inline]
    pub fn finish(&self) -> u64 {
        self.state.finish()
    }
}

#[cfg(test)]
mod tests;
