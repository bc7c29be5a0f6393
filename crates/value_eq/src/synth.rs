//! Comparer synthesis.
//!
//! The per-member rules live here as small generic functions. The member
//! builder monomorphizes them against each member's accessor; synthesis then
//! checks the classified descriptors and folds the surviving members into one
//! equality predicate and one hash function.
//!
//! Both composites visit members in the same order, so two values with equal
//! compared members always hash alike.

use std::any::type_name;
use std::ptr;

use crate::extract::{Classification, MemberDescriptor};
use crate::hash::{HashCombiner, ABSENT_SEQUENCE_HASH, NULL_HASH};
use crate::member::{Access, HashFn, TestFn};
use crate::sequence::Sequence;
use crate::{SynthesisError, ValueObject};

/// Value-kind member: the member's own equality.
#[inline]
pub(crate) fn value_test<M: PartialEq + ?Sized>(left: &M, right: &M) -> bool {
    left == right
}

/// Reference-kind member.
///
/// Aliased operands (including both absent) are equal without consulting
/// `eq`. Otherwise the left side must be present and equal to the right;
/// a present value never equals an absent one.
#[inline]
pub(crate) fn reference_test<M: ?Sized>(
    left: Option<&M>,
    right: Option<&M>,
    eq: impl FnOnce(&M, &M) -> bool,
) -> bool {
    let aliased = match (left, right) {
        (Some(l), Some(r)) => ptr::eq(l, r),
        (None, None) => true,
        _ => false,
    };
    if aliased {
        return true;
    }
    match (left, right) {
        (Some(l), Some(r)) => eq(l, r),
        _ => false,
    }
}

#[inline]
pub(crate) fn reference_hash<M: ?Sized>(value: Option<&M>, hash: impl FnOnce(&M) -> u64) -> u64 {
    value.map_or(NULL_HASH, hash)
}

/// Ordered element-wise equality.
///
/// Two absent sequences are equal. An absent sequence never equals a
/// present one, not even an empty one.
pub(crate) fn sequence_test<S: Sequence + ?Sized>(left: Option<&S>, right: Option<&S>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => ptr::eq(l, r) || l.elements().eq(r.elements()),
        _ => false,
    }
}

/// Fold of the element hashes, in sequence order.
///
/// Absent elements (`None` in a sequence of `Option`) hash to the fixed
/// hash of `None`, so they never need special casing here.
pub(crate) fn sequence_hash<S: Sequence + ?Sized>(sequence: Option<&S>) -> u64 {
    let Some(sequence) = sequence else {
        return ABSENT_SEQUENCE_HASH;
    };
    let mut combiner = HashCombiner::new();
    for element in sequence.elements() {
        combiner.add(element);
    }
    combiner.finish()
}

/// The composite functions for one type.
pub(crate) struct Synthesized<T> {
    pub(crate) test: TestFn<T>,
    pub(crate) hash: HashFn<T>,
    /// Names of the compared members, in visiting order.
    pub(crate) compared: Vec<&'static str>,
}

/// Build the composite predicate and hasher from classified descriptors.
///
/// Ignored members are dropped. Any other member without an equality
/// contract fails the whole type.
#[tracing::instrument(level = "debug", skip_all, fields(ty = type_name::<T>()))]
pub(crate) fn synthesize<T: ValueObject>(
    descriptors: Vec<MemberDescriptor<T>>,
) -> Result<Synthesized<T>, SynthesisError> {
    let mut tests: Vec<TestFn<T>> = Vec::with_capacity(descriptors.len());
    let mut hashes: Vec<HashFn<T>> = Vec::with_capacity(descriptors.len());
    let mut compared = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        if descriptor.classification() == Classification::Ignored {
            continue;
        }
        let name = descriptor.name();
        let declared = descriptor.declared();
        match descriptor.access {
            Access::Value { test, hash }
            | Access::Reference { test, hash }
            | Access::Sequence { test, hash, .. } => {
                tests.push(test);
                hashes.push(hash);
                compared.push(name);
            }
            Access::Opaque => {
                return Err(SynthesisError::UnsupportedMember {
                    owner: type_name::<T>(),
                    member: name,
                    declared: declared.name(),
                });
            }
        }
    }

    tracing::debug!(compared = compared.len(), "member tests assembled");

    Ok(Synthesized {
        test: conjunction(tests),
        hash: fold(hashes),
        compared,
    })
}

/// Logical AND of the member tests, short-circuiting in order.
///
/// No tests means every pair is equal.
fn conjunction<T: 'static>(mut tests: Vec<TestFn<T>>) -> TestFn<T> {
    match tests.len() {
        0 => Box::new(|_: &T, _: &T| true),
        1 => tests.remove(0),
        _ => Box::new(move |left: &T, right: &T| tests.iter().all(|test| test(left, right))),
    }
}

fn fold<T: 'static>(hashes: Vec<HashFn<T>>) -> HashFn<T> {
    Box::new(move |obj: &T| {
        let mut combiner = HashCombiner::new();
        for hash in &hashes {
            combiner.add_u64(hash(obj));
        }
        combiner.finish()
    })
}
