//! Per-type comparer cache.
//!
//! One [`Comparer`] exists per value object type for the whole process. It
//! is built on first demand and never rebuilt or evicted.
//!
//! # Concurrency
//!
//! Building happens outside the registry lock: synthesis is pure, so racing
//! builders may duplicate work but cannot corrupt anything. The first
//! builder to take the write lock publishes its result; later ones find it
//! in the double-check and drop their own. Published entries are leaked, so
//! callers hold plain `&'static` references that need no further locking.
//!
//! Failed syntheses are published the same way. The error is computed once
//! and every later caller receives a clone of it.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;
use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::extract::extract;
use crate::member::{HashFn, TestFn};
use crate::synth::{synthesize, Synthesized};
use crate::{SynthesisError, TypeRef, ValueObject};

/// Outcome of building the comparer for one type.
type Built<T> = Result<Comparer<T>, SynthesisError>;

type Slot = &'static (dyn Any + Send + Sync);

/// Published entries, keyed by the value object's `TypeId`.
///
/// Append-only: a slot is never replaced once inserted.
static REGISTRY: LazyLock<RwLock<FxHashMap<TypeId, Slot>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

/// The cached equality predicate and hash function for `T`.
pub struct Comparer<T> {
    type_ref: TypeRef,
    compared: Vec<&'static str>,
    test: TestFn<T>,
    hash: HashFn<T>,
}

impl<T: ValueObject> Comparer<T> {
    /// The comparer for `T`, building it on first use.
    pub fn get() -> Result<&'static Self, SynthesisError> {
        let built = match lookup::<T>() {
            Some(built) => built,
            None => build_and_publish::<T>(),
        };
        built.as_ref().map_err(Clone::clone)
    }

    /// The comparer for `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T`'s member declarations cannot be synthesized. Such a type
    /// is unusable until its declarations are fixed.
    pub fn instance() -> &'static Self {
        Self::get().unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T: 'static> Comparer<T> {
    fn from_synthesized(synthesized: Synthesized<T>) -> Self {
        Comparer {
            type_ref: TypeRef::of::<T>(),
            compared: synthesized.compared,
            test: synthesized.test,
            hash: synthesized.hash,
        }
    }

    /// Structural equality of two present values.
    ///
    /// This is the value-type form: neither side can be absent. The same
    /// instance on both sides is equal without running the predicate.
    #[inline]
    pub fn equals(&self, left: &T, right: &T) -> bool {
        ptr::eq(left, right) || (self.test)(left, right)
    }

    /// Structural equality where either side may be absent.
    ///
    /// The same instance (or two absent values) is equal without running the
    /// predicate. A present value never equals an absent one.
    #[inline]
    pub fn equals_nullable(&self, left: Option<&T>, right: Option<&T>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(l), Some(r)) => ptr::eq(l, r) || (self.test)(l, r),
            _ => false,
        }
    }

    /// Compare against a value of unknown type.
    ///
    /// `right` must be exactly a `T`; any other runtime type, including a
    /// reference to a `T`, is unequal. Matching values are narrowed and
    /// compared with [`Comparer::equals_nullable`].
    pub fn equals_any(&self, left: Option<&T>, right: Option<&dyn Any>) -> bool {
        match right {
            None => left.is_none(),
            Some(right) => match right.downcast_ref::<T>() {
                Some(right) => self.equals_nullable(left, Some(right)),
                None => false,
            },
        }
    }

    /// Structural hash of `obj`.
    #[inline]
    pub fn hash(&self, obj: &T) -> u64 {
        (self.hash)(obj)
    }

    /// Identity of the compared type.
    pub fn type_ref(&self) -> TypeRef {
        self.type_ref
    }

    /// Names of the members that take part in equality and hashing, in the
    /// order they are visited.
    pub fn compared_members(&self) -> &[&'static str] {
        &self.compared
    }
}

/// Hashing the comparer itself is always a mistake: the caller meant to
/// hash a value with [`Comparer::hash`].
impl<T> Hash for Comparer<T> {
    fn hash<H: Hasher>(&self, _state: &mut H) {
        panic!(
            "a Comparer has no hash of its own; hash a `{}` with `Comparer::hash(&value)` instead",
            self.type_ref
        );
    }
}

impl<T> fmt::Debug for Comparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer")
            .field("type", &self.type_ref)
            .field("compared", &self.compared)
            .finish_non_exhaustive()
    }
}

fn lookup<T: ValueObject>() -> Option<&'static Built<T>> {
    REGISTRY
        .read()
        .get(&TypeId::of::<T>())
        .copied()
        .and_then(|slot| slot.downcast_ref::<Built<T>>())
}

fn build_and_publish<T: ValueObject>() -> &'static Built<T> {
    let type_ref = TypeRef::of::<T>();

    // Built without holding the lock; `members()` is user code.
    let built: Built<T> = extract::<T>()
        .and_then(synthesize)
        .map(Comparer::from_synthesized);

    let mut registry = REGISTRY.write();

    // Double-check: another thread may have published while we built.
    if let Some(existing) = registry
        .get(&type_ref.id())
        .copied()
        .and_then(|slot| slot.downcast_ref::<Built<T>>())
    {
        tracing::trace!(ty = %type_ref, "discarding comparer built by a losing thread");
        return existing;
    }

    match &built {
        Ok(comparer) => tracing::debug!(
            ty = %type_ref,
            compared = comparer.compared.len(),
            "published comparer"
        ),
        Err(error) => tracing::warn!(ty = %type_ref, %error, "comparer synthesis failed"),
    }

    let published: &'static Built<T> = Box::leak(Box::new(built));
    registry.insert(type_ref.id(), published);
    published
}
