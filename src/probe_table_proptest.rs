#![cfg(test)]

// Property tests for ProbeTable kept inside the crate so they can inspect
// slot state through the same paths the unit tests use.

use crate::error::InsertError;
use crate::probe::ProbeStrategy;
use crate::probe_table::ProbeTable;
use crate::slot::Validity;
use proptest::prelude::*;
use std::collections::HashMap;
use std::ops::ControlFlow;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Delete(usize),
    Lookup(usize),
    Iterate,
}

fn arb_probe() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("linear"), Just("quadratic"), Just("double")]
}

fn arb_hash() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("sum"), Just("length"), Just("prime")]
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..4), 1..=10).prop_flat_map(
        |pool| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => idx.clone().prop_map(OpI::Delete),
                2 => idx.clone().prop_map(OpI::Lookup),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences and strategies:
// - Duplicate keys are rejected; a successful insert lands on a slot holding the key.
// - `lookup` agrees with the model; `delete` returns the model's value.
// - A full-table error only happens when the key is absent and, for strategies
//   that visit every slot, only when every slot is live.
// - `len` equals the number of used slots and the number of iterated entries.
// - Lookup and delete never visit more than `capacity` slots.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(
        requested in 1usize..14,
        probe in arb_probe(),
        primary in arb_hash(),
        secondary in arb_hash(),
        (pool, ops) in arb_scenario(),
    ) {
        let mut sut: ProbeTable<i32> = ProbeTable::create(requested, probe, primary, secondary).unwrap();
        let capacity = sut.capacity();
        prop_assert!(capacity >= requested);
        let exhaustive = sut.probe_strategy() != ProbeStrategy::Quadratic;
        let mut model: HashMap<Vec<u8>, i32> = HashMap::new();

        for op in ops {
            let before = sut.costs();
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let already = model.contains_key(k);
                    match sut.insert(k, v) {
                        Ok(slot) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            prop_assert!(sut.slots()[slot].holds(k));
                            model.insert(k.clone(), v);
                        }
                        Err(InsertError::DuplicateKey) => {
                            prop_assert!(already, "duplicate error only when key exists");
                        }
                        Err(InsertError::TableFull { capacity: c }) => {
                            prop_assert_eq!(c, capacity);
                            prop_assert!(!already);
                            if exhaustive {
                                prop_assert_eq!(model.len(), capacity);
                            }
                        }
                    }
                    prop_assert!(sut.costs().insert > before.insert);
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.delete(k), model.remove(k));
                    prop_assert!(sut.costs().delete - before.delete <= capacity as u64);
                }
                OpI::Lookup(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.lookup(k), model.get(k));
                    prop_assert!(sut.costs().lookup - before.lookup <= capacity as u64);
                }
                OpI::Iterate => {
                    let mut seen: HashMap<Vec<u8>, i32> = HashMap::new();
                    let flow = sut.iterate(|k, v| {
                        if seen.insert(k.to_vec(), *v).is_some() {
                            return ControlFlow::Break(());
                        }
                        ControlFlow::Continue(())
                    });
                    prop_assert_eq!(flow, ControlFlow::Continue(()), "key iterated twice");
                    prop_assert_eq!(&seen, &model);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let used = sut.slots().iter().filter(|s| s.validity() == Validity::Used).count();
            prop_assert_eq!(used, model.len());
            prop_assert_eq!(sut.iter().count(), model.len());
        }
    }
}

// Property: tombstones never hide live keys. After deleting any subset of a
// filled table, every remaining key is still found and every deleted key is
// not; reinserting the deleted keys succeeds wherever the probe can reach
// a free slot.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_tombstones_preserve_chains(
        probe in arb_probe(),
        keys in proptest::collection::btree_set(proptest::collection::vec(any::<u8>(), 1..6), 1..12),
        mask in proptest::collection::vec(any::<bool>(), 12),
    ) {
        let mut t: ProbeTable<usize> = ProbeTable::create(13, probe, "sum", "length").unwrap();
        let keys: Vec<Vec<u8>> = keys.into_iter().collect();
        let mut stored = Vec::new();
        for (i, k) in keys.iter().enumerate() {
            if t.insert(k, i).is_ok() {
                stored.push(i);
            }
        }
        for &i in &stored {
            if mask[i] {
                prop_assert_eq!(t.delete(&keys[i]), Some(i));
            }
        }
        for &i in &stored {
            let expected = if mask[i] { None } else { Some(&i) };
            prop_assert_eq!(t.lookup(&keys[i]), expected);
        }
        // Quadratic probing only reaches part of the table, so a reinsert may
        // find its old tombstone taken by an earlier one.
        let mut lost = Vec::new();
        for &i in &stored {
            if mask[i] {
                match t.insert(&keys[i], i) {
                    Ok(_) => {}
                    Err(InsertError::TableFull { .. })
                        if t.probe_strategy() == ProbeStrategy::Quadratic =>
                    {
                        lost.push(i)
                    }
                    Err(e) => prop_assert!(false, "reinsert failed: {}", e),
                }
            }
        }
        for &i in &stored {
            let expected = if lost.contains(&i) { None } else { Some(&i) };
            prop_assert_eq!(t.lookup(&keys[i]), expected);
        }
        prop_assert_eq!(t.len(), stored.len() - lost.len());
    }
}
