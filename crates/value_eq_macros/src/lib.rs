//! Procedural macros for `value_eq`.
//!
//! # Derive Macros
//!
//! - `ValueObject`: declares a struct's fields to the structural comparer and
//!   routes `PartialEq`, `Eq` and `Hash` through it.
//!
//! # Usage
//!
//! ```text
//! use value_eq::ValueObject;
//!
//! #[derive(ValueObject)]
//! struct Person {
//!     name: String,
//!     #[value_eq(ignore)]
//!     cache_key: u64,
//!     #[value_eq(sequence)]
//!     hobbies: Vec<String>,
//! }
//! ```

use proc_macro::TokenStream;

mod utils;
mod value_object;

/// Derive `value_eq::ValueObject` for a struct with named fields.
///
/// # Field attributes
///
/// - `#[value_eq(ignore)]`: excluded from equality and hashing.
/// - `#[value_eq(sequence)]`: compared and hashed element by element.
///
/// # Container attributes
///
/// - `#[value_eq(skip_std_traits)]`: do not generate `PartialEq`, `Eq` and
///   `Hash`.
#[proc_macro_derive(ValueObject, attributes(value_eq))]
pub fn derive_value_object(input: TokenStream) -> TokenStream {
    value_object::derive_value_object(input)
}
