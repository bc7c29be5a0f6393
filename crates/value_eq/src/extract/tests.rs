use super::*;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;

struct Order {
    id: u32,
    lines: Vec<String>,
    codes: [u8; 4],
    queue: VecDeque<i64>,
    memo: String,
}

impl ValueObject for Order {
    fn members(members: &mut Members<Self>) {
        members.field("id", |o: &Order| &o.id);
        members.sequence("lines", |o: &Order| Some(&o.lines));
        members.sequence("codes", |o: &Order| Some(&o.codes));
        members.sequence("queue", |o: &Order| Some(&o.queue));
        members.field("memo", |o: &Order| &o.memo).exclude();
    }
}

struct Misdeclared {
    label: String,
}

impl ValueObject for Misdeclared {
    fn members(members: &mut Members<Self>) {
        // `String` is iterable but has no element type of its own.
        members.sequence("label", |m: &Misdeclared| Some(&m.label));
    }
}

struct ExcludedSequence {
    label: String,
}

impl ValueObject for ExcludedSequence {
    fn members(members: &mut Members<Self>) {
        members
            .sequence("label", |m: &ExcludedSequence| Some(&m.label))
            .exclude();
    }
}

fn summary<T>(descriptors: &[MemberDescriptor<T>]) -> Vec<(&'static str, Classification)> {
    descriptors
        .iter()
        .map(|d| (d.name(), d.classification()))
        .collect()
}

#[test]
fn test_classification_in_declaration_order() {
    let descriptors = extract::<Order>().unwrap();
    assert_eq!(
        summary(&descriptors),
        vec![
            ("id", Classification::Plain),
            ("lines", Classification::SequenceCompared),
            ("codes", Classification::SequenceCompared),
            ("queue", Classification::SequenceCompared),
            ("memo", Classification::Ignored),
        ]
    );
}

#[test]
fn test_element_types() {
    let descriptors = extract::<Order>().unwrap();
    let elements: Vec<_> = descriptors.iter().map(MemberDescriptor::element_type).collect();
    assert_eq!(
        elements,
        vec![
            None,
            Some(TypeRef::of::<String>()),
            Some(TypeRef::of::<u8>()),
            Some(TypeRef::of::<i64>()),
            None,
        ]
    );
}

#[test]
fn test_extraction_is_repeatable() {
    let first = summary(&extract::<Order>().unwrap());
    let second = summary(&extract::<Order>().unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_sequence_without_element_type_is_rejected() {
    let err = extract::<Misdeclared>().unwrap_err();
    assert_eq!(
        err,
        SynthesisError::MissingElementType {
            owner: std::any::type_name::<Misdeclared>(),
            member: "label",
            declared: std::any::type_name::<String>(),
        }
    );
    assert_eq!(err.member(), "label");
}

#[test]
fn test_exclusion_wins_over_sequence_marker() {
    let descriptors = extract::<ExcludedSequence>().unwrap();
    assert_eq!(summary(&descriptors), vec![("label", Classification::Ignored)]);
}

#[test]
fn test_element_type_rules() {
    assert_eq!(
        element_type(&SequenceShape::Array(TypeRef::of::<u16>())),
        Some(TypeRef::of::<u16>())
    );
    assert_eq!(
        element_type(&SequenceShape::Generic(vec![
            TypeRef::of::<char>(),
            TypeRef::of::<bool>(),
        ])),
        Some(TypeRef::of::<char>())
    );
    assert_eq!(element_type(&SequenceShape::Generic(Vec::new())), None);
    assert_eq!(element_type(&SequenceShape::Scalar), None);
}
