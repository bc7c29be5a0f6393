//! Member descriptor extraction.
//!
//! Turns a type's member declarations into classified descriptors. This is
//! pure: it reads declarations and derives metadata, so it is safe to call
//! repeatedly, but the per-type cache makes sure it runs once per type.
//!
//! Descriptors come back in declaration order, which for derived types is
//! the order fields appear in the struct definition.

use std::any::type_name;
use std::fmt;

use crate::member::{Access, Markers, Member, Members};
use crate::sequence::SequenceShape;
use crate::{SynthesisError, TypeRef, ValueObject};

/// How a member takes part in equality and hashing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Compared with its own equality contract.
    Plain,
    /// Contributes to neither equality nor hash.
    Ignored,
    /// Compared and hashed element-wise.
    SequenceCompared,
}

/// A classified member, ready for synthesis.
pub struct MemberDescriptor<T> {
    name: &'static str,
    declared: TypeRef,
    classification: Classification,
    element_type: Option<TypeRef>,
    pub(crate) access: Access<T>,
}

impl<T> MemberDescriptor<T> {
    /// Member name. Only used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declared(&self) -> TypeRef {
        self.declared
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Element type; present only for [`Classification::SequenceCompared`].
    pub fn element_type(&self) -> Option<TypeRef> {
        self.element_type
    }
}

impl<T> fmt::Debug for MemberDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("classification", &self.classification)
            .field("element_type", &self.element_type)
            .finish_non_exhaustive()
    }
}

/// Element type of a sequence-shaped member.
///
/// Arrays and slices report their element type. Generic containers report
/// their first type parameter. Anything else has no element type.
pub fn element_type(shape: &SequenceShape) -> Option<TypeRef> {
    match shape {
        SequenceShape::Array(element) => Some(*element),
        SequenceShape::Generic(params) => params.first().copied(),
        SequenceShape::Scalar => None,
    }
}

/// Classify every member `T` declares, in declaration order.
///
/// Fails if a member marked compare-as-sequence has no element type.
pub fn extract<T: ValueObject>() -> Result<Vec<MemberDescriptor<T>>, SynthesisError> {
    Members::<T>::of().into_iter().map(classify).collect()
}

fn classify<T>(member: Member<T>) -> Result<MemberDescriptor<T>, SynthesisError> {
    let (name, declared, markers, access) = member.into_parts();

    // Exclusion wins over every other marker.
    let (classification, element) = if markers.contains(Markers::EXCLUDE) {
        (Classification::Ignored, None)
    } else if markers.contains(Markers::SEQUENCE) {
        let element = match &access {
            Access::Sequence { shape, .. } => element_type(shape),
            _ => None,
        };
        let Some(element) = element else {
            return Err(SynthesisError::MissingElementType {
                owner: type_name::<T>(),
                member: name,
                declared: declared.name(),
            });
        };
        (Classification::SequenceCompared, Some(element))
    } else {
        (Classification::Plain, None)
    };

    Ok(MemberDescriptor {
        name,
        declared,
        classification,
        element_type: element,
        access,
    })
}

#[cfg(test)]
mod tests;
