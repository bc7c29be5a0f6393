//! Members compared element-wise as ordered sequences.

use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use crate::TypeRef;

/// What the declared type of a sequence member reveals about its elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceShape {
    /// A fixed-size array or slice of the given element type.
    Array(TypeRef),
    /// A generic container and its type parameters, in order.
    Generic(Vec<TypeRef>),
    /// Iterable, but without an element type of its own (`String`, `str`).
    Scalar,
}

/// An ordered sequence that can be compared and hashed element by element.
///
/// Only ordered containers implement this. Hash sets and maps are left out:
/// their iteration order is not part of their value.
pub trait Sequence {
    type Element: PartialEq + Hash;

    fn shape() -> SequenceShape;

    fn elements(&self) -> impl Iterator<Item = &Self::Element>;
}

impl<E: PartialEq + Hash + 'static, const N: usize> Sequence for [E; N] {
    type Element = E;

    fn shape() -> SequenceShape {
        SequenceShape::Array(TypeRef::of::<E>())
    }

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E: PartialEq + Hash + 'static> Sequence for [E] {
    type Element = E;

    fn shape() -> SequenceShape {
        SequenceShape::Array(TypeRef::of::<E>())
    }

    fn elements(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

macro_rules! boxed_slice_sequence {
    ($($ptr:ident),*) => {$(
        impl<E: PartialEq + Hash + 'static> Sequence for $ptr<[E]> {
            type Element = E;

            fn shape() -> SequenceShape {
                SequenceShape::Array(TypeRef::of::<E>())
            }

            fn elements(&self) -> impl Iterator<Item = &E> {
                self.iter()
            }
        }
    )*};
}

boxed_slice_sequence!(Box, Arc, Rc);

macro_rules! container_sequence {
    ($($container:ident),*) => {$(
        impl<E: PartialEq + Hash + 'static> Sequence for $container<E> {
            type Element = E;

            fn shape() -> SequenceShape {
                SequenceShape::Generic(vec![TypeRef::of::<E>()])
            }

            fn elements(&self) -> impl Iterator<Item = &E> {
                self.iter()
            }
        }
    )*};
}

container_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl Sequence for String {
    type Element = u8;

    fn shape() -> SequenceShape {
        SequenceShape::Scalar
    }

    fn elements(&self) -> impl Iterator<Item = &u8> {
        self.as_bytes().iter()
    }
}

impl Sequence for str {
    type Element = u8;

    fn shape() -> SequenceShape {
        SequenceShape::Scalar
    }

    fn elements(&self) -> impl Iterator<Item = &u8> {
        self.as_bytes().iter()
    }
}
