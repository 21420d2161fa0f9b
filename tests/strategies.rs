// Strategy selection and the hash/probe traits used outside a table.
mod common;

use probe_table::hash::{ByLength, ByPrime, BySum};
use probe_table::probe::{DoubleHash, Linear};
use probe_table::{
    HashFunction, HashStrategy, Probe, ProbeMode, ProbeStrategy, ProbeTable, Slot, UnknownStrategy,
};

#[test]
fn parse_errors_name_the_family() {
    let e = "md5".parse::<HashStrategy>().unwrap_err();
    assert_eq!(
        e,
        UnknownStrategy {
            family: "hash",
            name: "md5".to_string()
        }
    );
    assert_eq!(e.to_string(), "invalid hash strategy 'md5'");

    let e = "robin".parse::<ProbeStrategy>().unwrap_err();
    assert_eq!(e.to_string(), "invalid probe strategy 'robin'");
}

// Unknown names warn and fall back instead of failing creation.
#[test]
fn unknown_names_still_create_a_table() {
    common::init_logger();
    let mut t: ProbeTable<u8> = ProbeTable::create(7, "cuckoo", "crc", "fnv").unwrap();
    assert_eq!(t.probe_strategy(), ProbeStrategy::Linear);
    assert_eq!(t.primary_hash(), HashStrategy::Sum);
    assert_eq!(t.secondary_hash(), HashStrategy::Sum);
    t.insert(b"ok", 1).unwrap();
    assert_eq!(t.lookup(b"ok"), Some(&1));
}

#[test]
fn enum_dispatch_matches_unit_strategies() {
    let keys: [&[u8]; 4] = [b"", b"a", b"hello", b"\x00\xff\x10"];
    for cap in [2usize, 13, 101] {
        for k in keys {
            assert_eq!(HashStrategy::Length.hash_index(k, cap), ByLength.hash_index(k, cap));
            assert_eq!(HashStrategy::Sum.hash_index(k, cap), BySum.hash_index(k, cap));
            assert_eq!(HashStrategy::Prime.hash_index(k, cap), ByPrime.hash_index(k, cap));
        }
    }
}

// A user-supplied secondary hash plugs into the probe trait directly.
#[test]
fn custom_secondary_hash() {
    struct Seven;
    impl HashFunction for Seven {
        fn hash_index(&self, _key: &[u8], capacity: usize) -> usize {
            7 % capacity
        }
    }

    let mut slots: Vec<Slot<()>> = (0..11).map(|_| Slot::Empty).collect();
    slots[3] = Slot::Used {
        key: b"x".to_vec().into_boxed_slice(),
        value: (),
    };
    let out = DoubleHash.probe(&slots, b"k", 3, ProbeMode::Insert, &Seven);
    assert_eq!(out.slot, Some(10));
    assert_eq!(out.cost, 2);

    let out = ProbeStrategy::Linear.probe(&slots, b"k", 3, ProbeMode::Lookup, &Seven);
    assert_eq!(out, Linear.probe(&slots, b"k", 3, ProbeMode::Lookup, &Seven));
    assert_eq!(out.slot, Some(4));
}
