//! Opting out of the generated `PartialEq`, `Eq` and `Hash` impls.

use value_eq::{Comparer, ValueObject};

#[derive(ValueObject)]
#[value_eq(skip_std_traits)]
pub struct Manual {
    pub id: u64,
    #[value_eq(ignore)]
    pub callback: Box<dyn Fn() + Send + Sync>,
}

impl PartialEq for Manual {
    fn eq(&self, other: &Self) -> bool {
        Comparer::<Self>::instance().equals(self, other)
    }
}

fn main() {
    let a = Manual { id: 1, callback: Box::new(|| {}) };
    let b = Manual { id: 1, callback: Box::new(|| {}) };
    assert!(a == b);
    (a.callback)();
    (b.callback)();
}
