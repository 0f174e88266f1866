//! End-to-end container behavior and randomized invariant checks
//!
//! Exercises the public API only: ordering across variants, split/prune
//! behavior at small bucket sizes, indexed access, slicing, and bulk loads.
//! The randomized sections drive the set with a seeded RNG against a plain
//! sorted-vector model and assert equivalence after every operation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use termset_core::{AddResult, Error, RemoveResult, SetConfig, SortedSet, Term};

fn int(i: i64) -> Term {
    Term::Integer(i)
}

fn bits(s: &str) -> Term {
    Term::Bitstring(s.to_string())
}

fn set_with(max_bucket_size: usize) -> SortedSet {
    SortedSet::new(SetConfig::init(max_bucket_size, 0).unwrap())
}

// === Concrete scenarios ===

#[test]
fn insert_out_of_order_integers() {
    let mut set = set_with(500);
    set.add(int(3));
    set.add(int(1));
    set.add(int(2));

    assert_eq!(set.to_vec(), vec![int(1), int(2), int(3)]);
}

#[test]
fn add_reports_effective_positions() {
    let mut set = set_with(500);
    assert_eq!(set.add(int(1)), AddResult::Added(0));
    assert_eq!(set.add(int(3)), AddResult::Added(1));
    assert_eq!(set.add(int(2)), AddResult::Added(1));
    assert_eq!(set.to_vec(), vec![int(1), int(2), int(3)]);
}

#[test]
fn bitstrings_across_splits() {
    let mut set = set_with(3);
    for s in ["aaa", "bbb", "ccc", "ddd", "eee"] {
        set.add(bits(s));
    }

    let listed: Vec<Term> = set.to_vec();
    let expected: Vec<Term> = ["aaa", "bbb", "ccc", "ddd", "eee"]
        .iter()
        .map(|s| bits(s))
        .collect();
    assert_eq!(listed, expected);
    assert_eq!(set.at(3), Some(&bits("ddd")));

    assert_eq!(set.remove(&bits("ddd")), RemoveResult::Removed(3));
    let expected: Vec<Term> = ["aaa", "bbb", "ccc", "eee"].iter().map(|s| bits(s)).collect();
    assert_eq!(set.to_vec(), expected);
}

#[test]
fn bucket_search_over_even_integers() {
    let mut set = set_with(5);
    for i in (2..=18).step_by(2) {
        set.add(int(i));
    }

    assert_eq!(set.find_bucket_index(&int(5)), 1);
    assert_eq!(set.find_bucket_index(&int(21)), 3);
    assert_eq!(set.find_bucket_index(&int(0)), 0);

    // Over-requested slice clamps silently
    let expected: Vec<Term> = [8, 10, 12, 14, 16, 18].iter().map(|&v| int(v)).collect();
    assert_eq!(set.slice(3, 10), expected);
}

#[test]
fn cross_variant_rank_in_one_set() {
    let mut set = set_with(500);
    set.add(int(1));
    set.add(Term::Atom("foo".to_string()));
    set.add(bits("foo"));

    assert_eq!(
        set.to_vec(),
        vec![int(1), Term::Atom("foo".to_string()), bits("foo")]
    );
}

#[test]
fn append_bucket_strict_limit() {
    let mut set = SortedSet::empty(SetConfig::init(5, 0).unwrap());
    let result = set.append_bucket((1..=5).map(int).collect());
    assert!(matches!(
        result,
        Err(Error::MaxBucketSizeExceeded { len: 5, max: 5 })
    ));
    assert_eq!(set.size(), 0);

    let mut set = SortedSet::empty(SetConfig::init(6, 0).unwrap());
    set.append_bucket((1..=5).map(int).collect()).unwrap();
    assert_eq!(set.size(), 5);
    assert_eq!(set.to_vec(), (1..=5).map(int).collect::<Vec<_>>());
}

#[test]
fn sorted_bulk_load_round_trip() {
    // Two appended runs followed by interleaved adds
    let mut set = SortedSet::empty(SetConfig::init(10, 0).unwrap());
    set.append_bucket((0..8).map(|i| int(i * 10)).collect()).unwrap();
    set.append_bucket((8..12).map(|i| int(i * 10)).collect()).unwrap();

    set.add(int(15));
    set.add(int(95));

    let mut expected: Vec<i64> = (0..12).map(|i| i * 10).collect();
    expected.push(15);
    expected.push(95);
    expected.sort_unstable();

    let listed: Vec<Term> = set.to_vec();
    assert_eq!(listed, expected.into_iter().map(int).collect::<Vec<_>>());
}

// === Randomized model equivalence ===

/// Drive the set with random adds/removes against a sorted-vector model.
///
/// Every operation's tagged outcome (including the effective index) must
/// match the model exactly, and periodic full-state checks compare `to_vec`,
/// `at`, `size`, and `slice` against the model.
fn run_model_check(seed: u64, max_bucket_size: usize, ops: usize, value_range: i64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut set = set_with(max_bucket_size);
    let mut model: Vec<i64> = Vec::new();

    for step in 0..ops {
        let value = rng.gen_range(0..value_range);

        if rng.gen_bool(0.6) {
            let result = set.add(int(value));
            match model.binary_search(&value) {
                Ok(existing) => assert_eq!(
                    result,
                    AddResult::Duplicate(existing),
                    "step {}: duplicate add of {}",
                    step,
                    value
                ),
                Err(insertion) => {
                    assert_eq!(
                        result,
                        AddResult::Added(insertion),
                        "step {}: fresh add of {}",
                        step,
                        value
                    );
                    model.insert(insertion, value);
                }
            }
        } else {
            let result = set.remove(&int(value));
            match model.binary_search(&value) {
                Ok(existing) => {
                    assert_eq!(
                        result,
                        RemoveResult::Removed(existing),
                        "step {}: remove of {}",
                        step,
                        value
                    );
                    model.remove(existing);
                }
                Err(_) => assert_eq!(
                    result,
                    RemoveResult::NotFound,
                    "step {}: remove of absent {}",
                    step,
                    value
                ),
            }
        }

        assert_eq!(set.size(), model.len(), "step {}: size drift", step);

        if step % 97 == 0 {
            let listed: Vec<Term> = set.to_vec();
            let expected: Vec<Term> = model.iter().map(|&v| int(v)).collect();
            assert_eq!(listed, expected, "step {}: full order drift", step);

            if !model.is_empty() {
                let probe = rng.gen_range(0..model.len());
                assert_eq!(set.at(probe), Some(&int(model[probe])));

                let start = rng.gen_range(0..model.len());
                let amount = rng.gen_range(0..model.len() + 4);
                let end = (start + amount).min(model.len());
                let expected: Vec<Term> = model[start..end].iter().map(|&v| int(v)).collect();
                assert_eq!(set.slice(start, amount), expected);
            }
            assert_eq!(set.at(model.len()), None);
        }
    }
}

#[test]
fn model_check_tiny_buckets() {
    run_model_check(7, 2, 2000, 200);
}

#[test]
fn model_check_small_buckets() {
    run_model_check(11, 5, 3000, 400);
}

#[test]
fn model_check_default_sized_buckets() {
    run_model_check(13, 500, 2000, 50_000);
}

#[test]
fn add_remove_restores_previous_state() {
    let mut rng = SmallRng::seed_from_u64(17);
    let mut set = set_with(4);
    for _ in 0..50 {
        set.add(int(rng.gen_range(0..500)));
    }

    let before = set.to_vec();
    let before_size = set.size();

    // A value guaranteed absent
    let probe = int(10_000);
    assert!(matches!(set.add(probe.clone()), AddResult::Added(_)));
    assert!(matches!(set.remove(&probe), RemoveResult::Removed(_)));

    assert_eq!(set.size(), before_size);
    assert_eq!(set.to_vec(), before);
}

#[test]
fn distinct_inserts_round_trip_sorted() {
    let mut rng = SmallRng::seed_from_u64(23);
    let mut values: Vec<i64> = (0..300).map(|i| i * 3).collect();
    // Shuffle by random swaps
    for i in (1..values.len()).rev() {
        let j = rng.gen_range(0..=i);
        values.swap(i, j);
    }

    let mut set = set_with(8);
    for &v in &values {
        assert!(matches!(set.add(int(v)), AddResult::Added(_)));
    }

    values.sort_unstable();
    assert_eq!(set.to_vec(), values.into_iter().map(int).collect::<Vec<_>>());
}

#[test]
fn find_index_agrees_with_at_and_to_vec() {
    let mut rng = SmallRng::seed_from_u64(29);
    let mut set = set_with(5);
    for _ in 0..200 {
        set.add(int(rng.gen_range(0..300)));
    }

    let listed = set.to_vec();
    for (i, term) in listed.iter().enumerate() {
        match set.find_index(term) {
            termset_core::FindResult::Found { idx, .. } => assert_eq!(idx, i),
            termset_core::FindResult::NotFound => panic!("listed term not found: {}", term),
        }
        assert_eq!(set.at(i), Some(term));
    }
}

#[test]
fn mixed_variant_model_check() {
    let mut rng = SmallRng::seed_from_u64(31);
    let mut set = set_with(4);
    let mut model: Vec<Term> = Vec::new();

    let make_term = |rng: &mut SmallRng| -> Term {
        match rng.gen_range(0..5) {
            0 => Term::Integer(rng.gen_range(-20..20)),
            1 => Term::Atom(format!("a{}", rng.gen_range(0..15))),
            2 => Term::Bitstring(format!("b{}", rng.gen_range(0..15))),
            3 => Term::Tuple(vec![
                Term::Atom("k".to_string()),
                Term::Integer(rng.gen_range(0..10)),
            ]),
            _ => Term::List(vec![Term::Integer(rng.gen_range(0..10))]),
        }
    };

    for step in 0..1500 {
        let term = make_term(&mut rng);

        if rng.gen_bool(0.7) {
            let result = set.add(term.clone());
            match model.binary_search(&term) {
                Ok(existing) => assert_eq!(result, AddResult::Duplicate(existing)),
                Err(insertion) => {
                    assert_eq!(result, AddResult::Added(insertion));
                    model.insert(insertion, term);
                }
            }
        } else {
            let result = set.remove(&term);
            match model.binary_search(&term) {
                Ok(existing) => {
                    assert_eq!(result, RemoveResult::Removed(existing));
                    model.remove(existing);
                }
                Err(_) => assert_eq!(result, RemoveResult::NotFound),
            }
        }

        assert_eq!(set.size(), model.len(), "step {}: size drift", step);
        if step % 101 == 0 {
            assert_eq!(set.to_vec(), model);
        }
    }
}
