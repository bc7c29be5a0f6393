//! Member declarations: what a value object tells the engine about itself.
//!
//! A [`ValueObject`](crate::ValueObject) lists its members into a
//! [`Members`] builder. Each builder method fixes how the member is read
//! (always present, possibly absent, or as a sequence) and which equality
//! contract applies to it. Markers added afterwards (see [`Member::exclude`])
//! change how the member is classified, never how it is read.

use std::any::type_name;
use std::hash::Hash;
use std::slice;

use bitflags::bitflags;

use crate::canonical::Canonical;
use crate::hash::hash_one;
use crate::sequence::{Sequence, SequenceShape};
use crate::synth;
use crate::TypeRef;

bitflags! {
    /// Per-member configuration markers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Markers: u8 {
        /// Contributes to neither equality nor hash.
        const EXCLUDE = 1 << 0;
        /// Compared and hashed element-wise as an ordered sequence.
        const SEQUENCE = 1 << 1;
    }
}

/// Member test: both sides of one member, as read from two owners.
pub(crate) type TestFn<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Member hash contribution, as read from one owner.
pub(crate) type HashFn<T> = Box<dyn Fn(&T) -> u64 + Send + Sync>;

/// How a member is read, with its equality contract bound in.
pub(crate) enum Access<T> {
    /// Always present; compared with its own equality.
    Value { test: TestFn<T>, hash: HashFn<T> },
    /// May be absent; aliasing short-circuits the comparison.
    Reference { test: TestFn<T>, hash: HashFn<T> },
    /// An ordered sequence, possibly absent.
    Sequence {
        shape: SequenceShape,
        test: TestFn<T>,
        hash: HashFn<T>,
    },
    /// Readable, but nothing is known about how to compare it.
    Opaque,
}

impl<T> Access<T> {
    fn kind(&self) -> &'static str {
        match self {
            Access::Value { .. } => "value",
            Access::Reference { .. } => "reference",
            Access::Sequence { .. } => "sequence",
            Access::Opaque => "opaque",
        }
    }
}

/// One declared member of a value object.
pub struct Member<T> {
    name: &'static str,
    declared: TypeRef,
    markers: Markers,
    pub(crate) access: Access<T>,
}

impl<T> Member<T> {
    /// Exclude this member from both equality and hashing.
    pub fn exclude(&mut self) -> &mut Self {
        self.markers |= Markers::EXCLUDE;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declared(&self) -> TypeRef {
        self.declared
    }

    pub fn markers(&self) -> Markers {
        self.markers
    }

    pub(crate) fn into_parts(self) -> (&'static str, TypeRef, Markers, Access<T>) {
        (self.name, self.declared, self.markers, self.access)
    }
}

impl<T> std::fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("markers", &self.markers)
            .field("access", &self.access.kind())
            .finish()
    }
}

/// Ordered list of member declarations for `T`.
///
/// The order members are added in is the order the engine reports them in
/// and the order equality and hashing visit them in.
pub struct Members<T> {
    list: Vec<Member<T>>,
}

impl<T: 'static> Members<T> {
    pub(crate) fn new() -> Self {
        Members { list: Vec::new() }
    }

    /// Collect the declarations `T` makes about itself.
    pub(crate) fn of() -> Self
    where
        T: crate::ValueObject,
    {
        let mut members = Self::new();
        T::members(&mut members);
        members
    }

    fn push(
        &mut self,
        name: &'static str,
        declared: TypeRef,
        markers: Markers,
        access: Access<T>,
    ) -> &mut Member<T> {
        let idx = self.list.len();
        self.list.push(Member {
            name,
            declared,
            markers,
            access,
        });
        &mut self.list[idx]
    }

    /// A member that is always present, compared with its `PartialEq`.
    pub fn field<M>(&mut self, name: &'static str, get: fn(&T) -> &M) -> &mut Member<T>
    where
        M: PartialEq + Hash + ?Sized + 'static,
    {
        let access = Access::Value {
            test: Box::new(move |l: &T, r: &T| synth::value_test(get(l), get(r))),
            hash: Box::new(move |obj: &T| hash_one(get(obj))),
        };
        self.push(name, TypeRef::of::<M>(), Markers::empty(), access)
    }

    /// A member that may be absent (`None` plays the null reference).
    pub fn nullable<M>(&mut self, name: &'static str, get: fn(&T) -> Option<&M>) -> &mut Member<T>
    where
        M: PartialEq + Hash + ?Sized + 'static,
    {
        let access = Access::Reference {
            test: Box::new(move |l: &T, r: &T| {
                synth::reference_test(get(l), get(r), |a, b| a == b)
            }),
            hash: Box::new(move |obj: &T| synth::reference_hash(get(obj), hash_one)),
        };
        self.push(name, TypeRef::of::<M>(), Markers::empty(), access)
    }

    /// A member without `Eq + Hash`, compared through its canonical form.
    pub fn canonical<M>(&mut self, name: &'static str, get: fn(&T) -> &M) -> &mut Member<T>
    where
        M: Canonical + 'static,
    {
        let access = Access::Value {
            test: Box::new(move |l: &T, r: &T| {
                synth::value_test(&get(l).canonical(), &get(r).canonical())
            }),
            hash: Box::new(move |obj: &T| hash_one(&get(obj).canonical())),
        };
        self.push(name, TypeRef::of::<M>(), Markers::empty(), access)
    }

    /// [`Members::canonical`] for a member that may be absent.
    pub fn canonical_nullable<M>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> Option<&M>,
    ) -> &mut Member<T>
    where
        M: Canonical + 'static,
    {
        let access = Access::Reference {
            test: Box::new(move |l: &T, r: &T| {
                synth::reference_test(get(l), get(r), |a, b| a.canonical() == b.canonical())
            }),
            hash: Box::new(move |obj: &T| {
                synth::reference_hash(get(obj), |m| hash_one(&m.canonical()))
            }),
        };
        self.push(name, TypeRef::of::<M>(), Markers::empty(), access)
    }

    /// A member compared element-wise. `None` is an absent sequence.
    pub fn sequence<S>(&mut self, name: &'static str, get: fn(&T) -> Option<&S>) -> &mut Member<T>
    where
        S: Sequence + ?Sized + 'static,
    {
        let access = Access::Sequence {
            shape: S::shape(),
            test: Box::new(move |l: &T, r: &T| synth::sequence_test(get(l), get(r))),
            hash: Box::new(move |obj: &T| synth::sequence_hash(get(obj))),
        };
        self.push(name, TypeRef::of::<S>(), Markers::SEQUENCE, access)
    }

    /// A member excluded from comparison. Its type needs no contract.
    pub fn ignore<M: ?Sized + 'static>(&mut self, name: &'static str) -> &mut Member<T> {
        self.push(name, TypeRef::of::<M>(), Markers::EXCLUDE, Access::Opaque)
    }

    /// A member the engine can see but has no equality contract for.
    ///
    /// Unless it is also excluded, synthesis fails for the owning type.
    pub fn opaque<M: ?Sized + 'static>(&mut self, name: &'static str) -> &mut Member<T> {
        self.push(name, TypeRef::of::<M>(), Markers::empty(), Access::Opaque)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Member<T>> {
        self.list.iter()
    }

    /// Name of the owning type, for diagnostics.
    pub fn owner(&self) -> &'static str {
        type_name::<T>()
    }
}

impl<T> IntoIterator for Members<T> {
    type Item = Member<T>;
    type IntoIter = std::vec::IntoIter<Member<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Members<T> {
    type Item = &'a Member<T>;
    type IntoIter = slice::Iter<'a, Member<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}
