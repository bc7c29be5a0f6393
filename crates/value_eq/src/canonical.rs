//! Canonical representations for members without `Eq + Hash`.
//!
//! Floating point numbers only implement `PartialEq`, and that equality is
//! not reflexive for NaN. Such members are compared through a canonical
//! representation instead: two values are equal exactly when their
//! representations are, and the representation is what gets hashed.

use std::hash::Hash;

/// A type that can be compared through a canonical, hashable form.
pub trait Canonical {
    type Repr: Eq + Hash;

    fn canonical(&self) -> Self::Repr;
}

impl Canonical for f64 {
    type Repr = u64;

    /// Every NaN maps to one bit pattern and `-0.0` maps to `0.0`.
    fn canonical(&self) -> u64 {
        if self.is_nan() {
            f64::NAN.to_bits()
        } else {
            // -0.0 + 0.0 == +0.0 under round-to-nearest
            (*self + 0.0).to_bits()
        }
    }
}

impl Canonical for f32 {
    type Repr = u32;

    fn canonical(&self) -> u32 {
        if self.is_nan() {
            f32::NAN.to_bits()
        } else {
            (*self + 0.0).to_bits()
        }
    }
}
