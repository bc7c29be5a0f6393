//! Sequences that may be absent, arrays, and raw identifiers.

use value_eq::ValueObject;

#[derive(Debug, ValueObject)]
pub struct Schedule {
    #[value_eq(sequence)]
    pub slots: Option<Vec<Option<String>>>,
    #[value_eq(sequence)]
    pub days: [u8; 7],
    pub r#type: String,
}

fn main() {
    let a = Schedule { slots: None, days: [1; 7], r#type: "weekly".to_owned() };
    let b = Schedule { slots: Some(Vec::new()), days: [1; 7], r#type: "weekly".to_owned() };
    assert_ne!(a, b);
}
