//! Errors raised while synthesizing a comparer.
//!
//! Both variants describe a structural problem with a type's declaration.
//! They are discovered once, the first time the type is compared, and are
//! cached alongside successful entries so every later caller observes the
//! same failure.

use thiserror::Error;

/// A type's member declarations cannot be turned into a comparer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// A member marked compare-as-sequence has no discoverable element type.
    #[error(
        "member `{owner}::{member}` is marked as a sequence, but `{declared}` has no element type"
    )]
    MissingElementType {
        owner: &'static str,
        member: &'static str,
        declared: &'static str,
    },

    /// A compared member has no equality contract of any kind.
    #[error("member `{owner}::{member}` of type `{declared}` has no usable equality contract")]
    UnsupportedMember {
        owner: &'static str,
        member: &'static str,
        declared: &'static str,
    },
}

impl SynthesisError {
    /// Name of the member the error points at.
    pub fn member(&self) -> &'static str {
        match self {
            SynthesisError::MissingElementType { member, .. }
            | SynthesisError::UnsupportedMember { member, .. } => member,
        }
    }
}
