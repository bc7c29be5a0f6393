use super::*;

fn fold(contributions: &[u64]) -> u64 {
    let mut combiner = HashCombiner::new();
    for &c in contributions {
        combiner.add_u64(c);
    }
    combiner.finish()
}

#[test]
fn test_hash_one_is_deterministic() {
    assert_eq!(hash_one("Jefke"), hash_one(&String::from("Jefke")));
    assert_eq!(hash_one(&43_i32), hash_one(&43_i32));
}

#[test]
fn test_combiner_is_order_sensitive() {
    assert_ne!(fold(&[1, 2]), fold(&[2, 1]));
}

#[test]
fn test_repeated_contributions_do_not_cancel() {
    // A plain XOR fold would collapse both of these to zero.
    assert_ne!(fold(&[7, 7]), fold(&[]));
    assert_ne!(fold(&[7, 7]), fold(&[9, 9]));
}

#[test]
fn test_leading_zero_contributions_are_not_dropped() {
    assert_eq!(hash_one(&None::<u32>), 0);
    assert_ne!(fold(&[]), fold(&[0]));
    assert_ne!(fold(&[0]), fold(&[0, 0]));
    assert_ne!(fold(&[]), fold(&[0, 0]));
    assert_ne!(fold(&[0, 42]), fold(&[42]));
}

#[test]
fn test_absent_sequence_differs_from_empty_fold() {
    assert_ne!(ABSENT_SEQUENCE_HASH, fold(&[]));
}

#[test]
fn test_null_hash_is_a_distinct_sentinel() {
    assert_ne!(NULL_HASH, 0);
    assert_ne!(NULL_HASH, fold(&[]));
    assert_ne!(NULL_HASH, ABSENT_SEQUENCE_HASH);
    assert_ne!(NULL_HASH, hash_one(&0_u32));
}

#[test]
fn test_add_matches_add_u64_of_hash_one() {
    let mut a = HashCombiner::new();
    a.add("WindSurfing");
    let mut b = HashCombiner::new();
    b.add_u64(hash_one("WindSurfing"));
    assert_eq!(a.finish(), b.finish());
}
