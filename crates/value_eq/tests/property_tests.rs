//! Property-based tests for synthesized comparers.
//!
//! Checks the algebraic contract every comparer must honor:
//! 1. Reflexivity, symmetry and hash consistency
//! 2. Ignored members are invisible
//! 3. Sequence comparison is order-sensitive

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use value_eq::{hash_one, Comparer, ValueObject};

#[derive(Debug, Clone, ValueObject)]
struct Profile {
    name: String,
    age: u8,
    rating: Option<f64>,
    #[value_eq(ignore)]
    #[allow(dead_code, reason = "Ignored member exists only to prove it is invisible to comparison")]
    session: u64,
    #[value_eq(sequence)]
    hobbies: Vec<Option<String>>,
}

// -- Strategies --

fn hobby_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec![
        "WindSurfing",
        "Volleyball",
        "Tennis",
        "Chess",
    ]))
    .prop_map(|hobby| hobby.map(str::to_owned))
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (
        prop::sample::select(vec!["Jefke", "Jef", "Peter"]),
        0u8..4,
        prop::option::of(prop::sample::select(vec![0.0, -0.0, 1.5, f64::NAN])),
        any::<u64>(),
        prop::collection::vec(hobby_strategy(), 0..4),
    )
        .prop_map(|(name, age, rating, session, hobbies)| Profile {
            name: name.to_owned(),
            age,
            rating,
            session,
            hobbies,
        })
}

proptest! {
    #[test]
    fn reflexive(x in profile_strategy()) {
        prop_assert_eq!(&x, &x.clone());
        prop_assert!(Comparer::<Profile>::instance().equals(&x, &x));
    }

    #[test]
    fn symmetric(x in profile_strategy(), y in profile_strategy()) {
        prop_assert_eq!(x == y, y == x);
    }

    #[test]
    fn equal_values_hash_alike(x in profile_strategy(), y in profile_strategy()) {
        if x == y {
            prop_assert_eq!(hash_one(&x), hash_one(&y));
        }
    }

    #[test]
    fn session_is_invisible(x in profile_strategy(), session in any::<u64>()) {
        let y = Profile { session, ..x.clone() };
        prop_assert_eq!(&x, &y);
        prop_assert_eq!(hash_one(&x), hash_one(&y));
    }

    #[test]
    fn hobbies_are_order_sensitive(
        x in profile_strategy(),
        hobbies in prop::collection::vec(hobby_strategy(), 2..5),
    ) {
        let mut reversed = hobbies.clone();
        reversed.reverse();
        prop_assume!(reversed != hobbies);

        let forward = Profile { hobbies, ..x.clone() };
        let backward = Profile { hobbies: reversed, ..x };
        prop_assert_ne!(forward, backward);
    }

    #[test]
    fn hash_is_stable(x in profile_strategy()) {
        let comparer = Comparer::<Profile>::instance();
        prop_assert_eq!(comparer.hash(&x), comparer.hash(&x.clone()));
        // The generated `Hash` impl feeds the comparer's hash to the hasher.
        prop_assert_eq!(hash_one(&x), hash_one(&comparer.hash(&x)));
    }
}
