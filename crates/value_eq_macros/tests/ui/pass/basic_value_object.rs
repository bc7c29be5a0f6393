//! Plain, ignored and sequence-compared fields.

use value_eq::ValueObject;

#[derive(Debug, ValueObject)]
pub struct Person {
    pub name: String,
    pub age: u32,
    #[value_eq(ignore)]
    pub not_used: i32,
    #[value_eq(sequence)]
    pub hobbies: Vec<String>,
}

fn main() {
    let a = Person {
        name: "Jefke".to_owned(),
        age: 43,
        not_used: 44,
        hobbies: vec!["WindSurfing".to_owned()],
    };
    let b = Person {
        name: "Jefke".to_owned(),
        age: 43,
        not_used: 666,
        hobbies: vec!["WindSurfing".to_owned()],
    };
    assert_eq!(a, b);
    assert_ne!(a.not_used, b.not_used);
}
