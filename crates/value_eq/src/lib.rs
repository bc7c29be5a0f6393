//! Structural equality and hashing, synthesized once per type.
//!
//! A *value object* is a type whose identity is its data: two instances are
//! equal when their members are. Instead of hand-writing `PartialEq` and
//! `Hash`, a value object declares its members once (usually through
//! `#[derive(ValueObject)]`) and the engine builds a [`Comparer`] from those
//! declarations the first time the type is compared. The comparer is cached
//! for the rest of the process.
//!
//! # Members
//!
//! Each member is one of:
//!
//! - **Plain**: compared with its own equality contract. Members that may be
//!   absent (`Option`, smart pointers) short-circuit when both sides alias
//!   the same value.
//! - **Ignored**: `#[value_eq(ignore)]`; excluded from equality and hashing.
//! - **Sequence-compared**: `#[value_eq(sequence)]`; compared and hashed
//!   element by element, in order.
//!
//! # Example
//!
//! ```
//! use value_eq::ValueObject;
//!
//! #[derive(Debug, ValueObject)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     #[value_eq(ignore)]
//!     visits: u64,
//!     #[value_eq(sequence)]
//!     hobbies: Vec<String>,
//! }
//!
//! let a = Person { name: "Jefke".into(), age: 43, visits: 1, hobbies: vec!["Tennis".into()] };
//! let b = Person { name: "Jefke".into(), age: 43, visits: 9, hobbies: vec!["Tennis".into()] };
//! assert_eq!(a, b);
//! ```
//!
//! # Failures
//!
//! Declarations that cannot be synthesized (a sequence marker on a type with
//! no element type, a compared member with no equality contract) surface as a
//! [`SynthesisError`] from [`Comparer::get`], once, the first time the type
//! is used. [`Comparer::instance`] and the generated trait impls turn that
//! error into a panic.

// Lets the derive's `::value_eq::` paths resolve in this crate's own tests.
#[cfg(test)]
extern crate self as value_eq;

mod cache;
mod canonical;
mod error;
mod extract;
mod hash;
mod member;
mod sequence;
mod synth;
mod type_ref;

pub use cache::Comparer;
pub use canonical::Canonical;
pub use error::SynthesisError;
pub use extract::{element_type, extract, Classification, MemberDescriptor};
pub use hash::{hash_one, HashCombiner, ABSENT_SEQUENCE_HASH, NULL_HASH};
pub use member::{Markers, Member, Members};
pub use sequence::{Sequence, SequenceShape};
pub use type_ref::TypeRef;

/// Derive [`ValueObject`] from a struct's named fields.
///
/// Also generates `PartialEq`, `Eq` and `Hash` impls that route through the
/// type's [`Comparer`], unless the struct carries
/// `#[value_eq(skip_std_traits)]`.
pub use value_eq_macros::ValueObject;

/// A type compared by its members.
pub trait ValueObject: Sized + 'static {
    /// Declare this type's members, in the order they should be compared.
    fn members(members: &mut Members<Self>);

    /// The cached comparer for this type.
    ///
    /// The default looks the comparer up in the global cache on every call.
    /// Derived impls keep the reference in a per-type static instead.
    ///
    /// # Panics
    ///
    /// Panics if the type's declarations cannot be synthesized.
    fn comparer() -> &'static Comparer<Self> {
        Comparer::instance()
    }
}
