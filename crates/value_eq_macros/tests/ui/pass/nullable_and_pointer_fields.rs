//! `Option`, smart pointer and float fields.

use std::rc::Rc;
use std::sync::Arc;

use value_eq::ValueObject;

#[derive(Debug, ValueObject)]
pub struct Nested {
    pub price: f64,
    pub when: (u16, u8, u8),
}

#[derive(Debug, ValueObject)]
pub struct Holder {
    pub nested: Option<Nested>,
    pub shared: Option<Arc<Nested>>,
    pub boxed: Box<Nested>,
    pub counted: Rc<str>,
    pub discount: Option<f32>,
}

fn assert_total_eq<T: Eq>() {}

fn main() {
    // Float members are compared canonically, so they do not block `Eq`.
    assert_total_eq::<Nested>();
    assert_total_eq::<Holder>();

    let make = || Holder {
        nested: Some(Nested { price: 100.0, when: (2019, 12, 24) }),
        shared: None,
        boxed: Box::new(Nested { price: 1.0, when: (2020, 1, 1) }),
        counted: Rc::from("x"),
        discount: Some(0.5),
    };
    assert_eq!(make(), make());
}
