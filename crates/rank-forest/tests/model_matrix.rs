//! Randomized equivalence against a `Vec` model.

use proptest::prelude::*;
use rank_forest::{FindList, PositionalList};
use rank_forest_util::{Fuzzer, ListOp};

fn assert_matches(list: &FindList<u32>, model: &[u32]) {
    list.assert_valid().unwrap();
    assert_eq!(list.len(), model.len());
    assert!(list.iter().eq(model.iter()));
}

#[test]
fn random_insert_thousand_values_matrix() {
    let fuzzer = Fuzzer::from_u64(1);
    let mut list = FindList::new();
    let mut model = Vec::new();

    for v in 1..=1000u32 {
        let i = fuzzer.position(model.len());
        list.insert(i, v).unwrap();
        model.insert(i, v);
        assert_matches(&list, &model);
        assert_eq!(list.get(model.len()), None);
    }

    for (i, v) in model.iter().enumerate() {
        assert_eq!(list.get(i), Some(v));
    }
    for v in 1..=1000u32 {
        let i = list.index_of(&v).unwrap();
        assert_eq!(model[i], v);
        assert_eq!(list.get(i), Some(&v));
    }

    for _ in 0..1000 {
        let i = fuzzer.index(model.len());
        assert_eq!(list.remove(i), model.get(i).copied());
        model.remove(i);
        assert_matches(&list, &model);
    }
    assert!(list.is_empty());
}

#[test]
fn interleaved_workload_matrix() {
    let fuzzer = Fuzzer::from_u64(2);
    let mut list = FindList::new();
    let mut model: Vec<u32> = Vec::new();

    for op in fuzzer.list_workload(10_000, 0.5) {
        match op {
            ListOp::Insert { index, value } => {
                list.insert(index, value).unwrap();
                model.insert(index, value);
                assert_eq!(list.index_of(&value), Some(index));
            }
            ListOp::Remove { index } => {
                let value = model.remove(index);
                assert_eq!(list.index_of(&value), Some(index));
                assert_eq!(list.remove(index), Some(value));
                assert_eq!(list.index_of(&value), None);
            }
        }
        assert_matches(&list, &model);
        if !model.is_empty() {
            let probe = fuzzer.index(model.len());
            assert_eq!(list.get(probe), Some(&model[probe]));
        }
    }

    while let Some(expected) = model.first().copied() {
        model.remove(0);
        assert_eq!(list.remove(0), Some(expected));
        assert_matches(&list, &model);
    }
}

#[test]
fn grow_heavy_then_shrink_heavy_matrix() {
    let fuzzer = Fuzzer::from_u64(3);
    let mut list = PositionalList::new();
    let mut model = Vec::new();

    for (count, bias) in [(3_000, 0.8), (3_000, 0.2)] {
        for _ in 0..count {
            if !model.is_empty() && !fuzzer.random_bool(bias) {
                let i = fuzzer.index(model.len());
                assert_eq!(list.remove(i), Some(model.remove(i)));
            } else {
                let i = fuzzer.position(model.len());
                let v = fuzzer.position(100);
                list.insert(i, v).unwrap();
                model.insert(i, v);
            }
        }
        list.assert_valid().unwrap();
        assert!(list.iter().eq(model.iter()));
    }
}

#[derive(Clone, Debug)]
enum Step {
    Insert(usize),
    Remove(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<usize>().prop_map(Step::Insert),
        any::<usize>().prop_map(Step::Remove),
    ]
}

proptest! {
    #[test]
    fn list_tracks_vec(steps in prop::collection::vec(step(), 1..300)) {
        let mut list = FindList::new();
        let mut model: Vec<u32> = Vec::new();

        for (value, s) in steps.into_iter().enumerate() {
            let value = value as u32;
            match s {
                Step::Insert(raw) => {
                    let i = raw % (model.len() + 1);
                    list.insert(i, value).unwrap();
                    model.insert(i, value);
                }
                Step::Remove(raw) => {
                    // Deliberately allow out-of-range removals.
                    let i = raw % (model.len() + 2);
                    let expected = if i < model.len() { Some(model.remove(i)) } else { None };
                    prop_assert_eq!(list.remove(i), expected);
                }
            }
            prop_assert!(list.assert_valid().is_ok());
            prop_assert!(list.iter().eq(model.iter()));
        }

        for (i, v) in model.iter().enumerate() {
            prop_assert_eq!(list.index_of(v), Some(i));
        }
    }
}
