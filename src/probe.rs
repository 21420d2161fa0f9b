//! Collision resolution: linear, quadratic and double-hash probing.
//!
//! A probe walks the slot array from a start index and stops at the first
//! slot that either holds the key, is empty, or (when inserting) is a
//! tombstone. Each visited slot adds one to the returned cost. If the
//! strategy's termination rule fires first, the probe reports exhaustion.

use crate::error::UnknownStrategy;
use crate::hash::HashFunction;
use crate::slot::Slot;
use core::fmt;
use core::str::FromStr;

/// What a probe is looking for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProbeMode {
    /// Tombstones are skipped: the key may live further along the chain.
    Lookup,
    /// A tombstone is an acceptable landing slot and ends the search.
    Insert,
}

/// Where a probe stopped and how many slots it visited.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ProbeOutcome {
    /// `None` when the termination rule fired without a usable slot.
    pub slot: Option<usize>,
    pub cost: u64,
}

impl ProbeOutcome {
    fn found(slot: usize, cost: u64) -> Self {
        Self {
            slot: Some(slot),
            cost,
        }
    }

    fn exhausted(cost: u64) -> Self {
        Self { slot: None, cost }
    }
}

/// A probing discipline over a slot array.
pub trait Probe {
    /// `start` must be in `[0, slots.len())`. `secondary` is only consulted
    /// by strategies that derive a step size from the key.
    fn probe<V, H>(
        &self,
        slots: &[Slot<V>],
        key: &[u8],
        start: usize,
        mode: ProbeMode,
        secondary: &H,
    ) -> ProbeOutcome
    where
        H: HashFunction + ?Sized;
}

#[inline]
fn ends_search<V>(slot: &Slot<V>, key: &[u8], mode: ProbeMode) -> bool {
    match slot {
        Slot::Used { .. } => slot.holds(key),
        Slot::Empty => true,
        Slot::Deleted { .. } => mode == ProbeMode::Insert,
    }
}

/// Step size 1; full once the walk wraps back to `start`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Linear;

impl Probe for Linear {
    fn probe<V, H>(
        &self,
        slots: &[Slot<V>],
        key: &[u8],
        start: usize,
        mode: ProbeMode,
        _secondary: &H,
    ) -> ProbeOutcome
    where
        H: HashFunction + ?Sized,
    {
        let capacity = slots.len();
        debug_assert!(start < capacity);
        let mut cost = 0;
        let mut j = start;
        loop {
            cost += 1;
            if ends_search(&slots[j], key, mode) {
                return ProbeOutcome::found(j, cost);
            }
            j = (j + 1) % capacity;
            if j == start {
                return ProbeOutcome::exhausted(cost);
            }
        }
    }
}

/// Visits `start + step^2` for `step = 0, 1, ...`; gives up once
/// `step == capacity`. This bounds the walk but does not guarantee that
/// every slot was seen.
#[derive(Copy, Clone, Debug, Default)]
pub struct Quadratic;

impl Probe for Quadratic {
    fn probe<V, H>(
        &self,
        slots: &[Slot<V>],
        key: &[u8],
        start: usize,
        mode: ProbeMode,
        _secondary: &H,
    ) -> ProbeOutcome
    where
        H: HashFunction + ?Sized,
    {
        let capacity = slots.len();
        debug_assert!(start < capacity);
        let mut cost = 0;
        let mut step = 0usize;
        let mut j = start;
        loop {
            cost += 1;
            if ends_search(&slots[j], key, mode) {
                return ProbeOutcome::found(j, cost);
            }
            step += 1;
            if step == capacity {
                return ProbeOutcome::exhausted(cost);
            }
            let offset = (step as u128 * step as u128 % capacity as u128) as usize;
            j = (start + offset) % capacity;
        }
    }
}

/// Fixed step taken from the secondary hash; full once the walk wraps
/// back to `start`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DoubleHash;

impl DoubleHash {
    /// Step size for `key`, clamped into `[1, capacity)`.
    ///
    /// A zero step would revisit `start` forever, so it is bumped to 1.
    pub fn step<H>(secondary: &H, key: &[u8], capacity: usize) -> usize
    where
        H: HashFunction + ?Sized,
    {
        let step = secondary.hash_index(key, capacity) % capacity;
        if step == 0 {
            log::debug!("double-hash step of 0 clamped to 1");
            1
        } else {
            step
        }
    }
}

impl Probe for DoubleHash {
    fn probe<V, H>(
        &self,
        slots: &[Slot<V>],
        key: &[u8],
        start: usize,
        mode: ProbeMode,
        secondary: &H,
    ) -> ProbeOutcome
    where
        H: HashFunction + ?Sized,
    {
        let capacity = slots.len();
        debug_assert!(start < capacity);
        let step = Self::step(secondary, key, capacity);
        let mut cost = 0;
        let mut j = start;
        loop {
            cost += 1;
            if ends_search(&slots[j], key, mode) {
                return ProbeOutcome::found(j, cost);
            }
            j = (j + step) % capacity;
            if j == start {
                return ProbeOutcome::exhausted(cost);
            }
        }
    }
}

/// The closed set of probing strategies a table can be configured with.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ProbeStrategy {
    #[default]
    Linear,
    Quadratic,
    DoubleHash,
}

impl ProbeStrategy {
    /// Match on the first three characters of `name` (`lin`, `qua`, `dou`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.get(..3)? {
            "lin" => Some(ProbeStrategy::Linear),
            "qua" => Some(ProbeStrategy::Quadratic),
            "dou" => Some(ProbeStrategy::DoubleHash),
            _ => None,
        }
    }

    /// Like `from_name`, falling back to `Linear` with a warning.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Invalid hash probe strategy '{}' - using 'linear'", name);
            ProbeStrategy::Linear
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProbeStrategy::Linear => "linear",
            ProbeStrategy::Quadratic => "quadratic",
            ProbeStrategy::DoubleHash => "double",
        }
    }
}

impl Probe for ProbeStrategy {
    #[inline]
    fn probe<V, H>(
        &self,
        slots: &[Slot<V>],
        key: &[u8],
        start: usize,
        mode: ProbeMode,
        secondary: &H,
    ) -> ProbeOutcome
    where
        H: HashFunction + ?Sized,
    {
        match self {
            ProbeStrategy::Linear => Linear.probe(slots, key, start, mode, secondary),
            ProbeStrategy::Quadratic => Quadratic.probe(slots, key, start, mode, secondary),
            ProbeStrategy::DoubleHash => DoubleHash.probe(slots, key, start, mode, secondary),
        }
    }
}

impl FromStr for ProbeStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownStrategy::new("probe", s))
    }
}

impl fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{ByLength, HashStrategy};

    const ALL: [ProbeStrategy; 3] = [
        ProbeStrategy::Linear,
        ProbeStrategy::Quadratic,
        ProbeStrategy::DoubleHash,
    ];

    fn used(key: &[u8]) -> Slot<()> {
        Slot::Used {
            key: key.to_vec().into_boxed_slice(),
            value: (),
        }
    }

    fn deleted(key: &[u8]) -> Slot<()> {
        Slot::Deleted {
            key: key.to_vec().into_boxed_slice(),
        }
    }

    /// Secondary hash that always yields the same step.
    struct Fixed(usize);
    impl HashFunction for Fixed {
        fn hash_index(&self, _key: &[u8], capacity: usize) -> usize {
            self.0 % capacity
        }
    }

    #[test]
    fn linear_walks_forward_and_wraps() {
        let slots = vec![Slot::Empty, used(b"x"), used(b"y"), used(b"z"), used(b"w")];
        let out = Linear.probe(&slots, b"k", 2, ProbeMode::Insert, &ByLength);
        assert_eq!(out, ProbeOutcome { slot: Some(0), cost: 4 });
    }

    /// Invariant: a live match ends the search in either mode.
    #[test]
    fn match_found_in_both_modes() {
        let slots = vec![used(b"a"), used(b"k"), Slot::Empty];
        for mode in [ProbeMode::Insert, ProbeMode::Lookup] {
            let out = Linear.probe(&slots, b"k", 0, mode, &ByLength);
            assert_eq!(out, ProbeOutcome { slot: Some(1), cost: 2 });
        }
    }

    /// Invariant: lookup skips tombstones, insert lands on the first one.
    #[test]
    fn tombstone_handling_depends_on_mode() {
        let slots = vec![deleted(b"k"), used(b"a"), used(b"k"), Slot::Empty, Slot::Empty];
        let lookup = Linear.probe(&slots, b"k", 0, ProbeMode::Lookup, &ByLength);
        assert_eq!(lookup, ProbeOutcome { slot: Some(2), cost: 3 });
        let insert = Linear.probe(&slots, b"q", 0, ProbeMode::Insert, &ByLength);
        assert_eq!(insert, ProbeOutcome { slot: Some(0), cost: 1 });
    }

    #[test]
    fn deleted_key_is_not_a_match() {
        let slots = vec![deleted(b"k"), Slot::Empty, Slot::Empty];
        let out = Linear.probe(&slots, b"k", 0, ProbeMode::Lookup, &ByLength);
        assert_eq!(out, ProbeOutcome { slot: Some(1), cost: 2 });
    }

    /// Invariant: on a full table each strategy reports exhaustion after at
    /// most `capacity` visited slots.
    #[test]
    fn full_table_is_exhausted_within_capacity() {
        let keys: Vec<Vec<u8>> = (0..7u8).map(|i| vec![b'a' + i]).collect();
        let slots: Vec<Slot<()>> = keys.iter().map(|k| used(k)).collect();
        for s in ALL {
            for start in 0..slots.len() {
                let out = s.probe(&slots, b"zz", start, ProbeMode::Insert, &HashStrategy::Sum);
                assert_eq!(out.slot, None, "{:?}", s);
                assert!(out.cost <= slots.len() as u64, "{:?} cost {}", s, out.cost);
            }
        }
    }

    #[test]
    fn lookup_through_tombstones_exhausts() {
        let slots = vec![deleted(b"a"), deleted(b"b"), deleted(b"c")];
        for s in ALL {
            let out = s.probe(&slots, b"a", 1, ProbeMode::Lookup, &ByLength);
            assert_eq!(out.slot, None);
        }
    }

    #[test]
    fn quadratic_sequence() {
        // start 1, capacity 7: 1, 2, 5, 3 (1+9), 3 (1+16=17), ...
        let mut slots = vec![used(b"x"), used(b"x"), used(b"x"), used(b"x"), used(b"x"), Slot::Empty, used(b"x")];
        let out = Quadratic.probe(&slots, b"k", 1, ProbeMode::Insert, &ByLength);
        assert_eq!(out, ProbeOutcome { slot: Some(5), cost: 3 });

        slots[5] = used(b"x");
        slots[0] = Slot::Empty;
        // Offsets 0,1,4,2,2,4,1 never land on 0 from start 1.
        let out = Quadratic.probe(&slots, b"k", 1, ProbeMode::Insert, &ByLength);
        assert_eq!(out, ProbeOutcome { slot: None, cost: 7 });
    }

    #[test]
    fn double_hash_uses_secondary_step() {
        let slots = vec![Slot::Empty, used(b"x"), used(b"x"), used(b"x"), used(b"x")];
        // start 1, step 3: 1, 4, 2, 0
        let out = DoubleHash.probe(&slots, b"k", 1, ProbeMode::Insert, &Fixed(3));
        assert_eq!(out, ProbeOutcome { slot: Some(0), cost: 4 });
    }

    /// Invariant: a zero secondary step is clamped so the probe still moves.
    #[test]
    fn double_hash_zero_step_is_clamped() {
        assert_eq!(DoubleHash::step(&Fixed(0), b"k", 5), 1);
        assert_eq!(DoubleHash::step(&Fixed(5), b"k", 5), 1);
        assert_eq!(DoubleHash::step(&Fixed(3), b"k", 5), 3);

        let slots = vec![used(b"x"), used(b"x"), Slot::Empty];
        let out = DoubleHash.probe(&slots, b"k", 0, ProbeMode::Insert, &Fixed(0));
        assert_eq!(out, ProbeOutcome { slot: Some(2), cost: 3 });
    }

    #[test]
    fn name_prefixes() {
        assert_eq!(ProbeStrategy::from_name("linear"), Some(ProbeStrategy::Linear));
        assert_eq!(ProbeStrategy::from_name("quad"), Some(ProbeStrategy::Quadratic));
        assert_eq!(ProbeStrategy::from_name("double"), Some(ProbeStrategy::DoubleHash));
        assert_eq!(ProbeStrategy::from_name("cuckoo"), None);
        assert_eq!(ProbeStrategy::resolve("cuckoo"), ProbeStrategy::Linear);
        assert!("li".parse::<ProbeStrategy>().is_err());
        for s in ALL {
            assert_eq!(s.name().parse::<ProbeStrategy>(), Ok(s));
        }
    }
}
