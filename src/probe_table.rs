//! ProbeTable: fixed-capacity open-addressing table over byte keys.

use crate::config::TableConfig;
use crate::error::{CreateError, InsertError};
use crate::hash::{HashFunction, HashStrategy};
use crate::key::PrintableKey;
use crate::primes::{CapacitySizer, KnownPrimes};
use crate::probe::{Probe, ProbeMode, ProbeOutcome, ProbeStrategy};
use crate::slot::{Slot, Validity};
use core::cell::Cell;
use core::ops::ControlFlow;

/// Accumulated probe steps per operation kind.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Costs {
    pub insert: u64,
    pub lookup: u64,
    pub delete: u64,
}

/// Strategy names exactly as passed at creation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StrategyNames {
    pub probe: String,
    pub primary_hash: String,
    pub secondary_hash: String,
}

/// Open-addressing table with a fixed number of slots.
///
/// Keys are copied into the table; values are stored as given and handed
/// back on `delete`. Use a reference or an id as `V` to keep value
/// ownership with the caller.
#[derive(Debug)]
pub struct ProbeTable<V> {
    slots: Box<[Slot<V>]>,
    len: usize,
    primary: HashStrategy,
    secondary: HashStrategy,
    probe: ProbeStrategy,
    names: StrategyNames,
    insert_cost: u64,
    // Lookups take `&self` but still accrue cost.
    lookup_cost: Cell<u64>,
    delete_cost: u64,
}

/// Iterator over live entries in slot order.
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(|s| match s {
            Slot::Used { key, value } => Some((&key[..], value)),
            _ => None,
        })
    }
}

impl<V> ProbeTable<V> {
    /// Create a table of at least `capacity` slots, rounded up to a known
    /// prime. Unknown strategy names fall back to `linear` / `sum`.
    pub fn create(
        capacity: usize,
        probe: &str,
        primary_hash: &str,
        secondary_hash: &str,
    ) -> Result<Self, CreateError> {
        Self::with_sizer(
            capacity,
            probe,
            primary_hash,
            secondary_hash,
            &KnownPrimes::default(),
        )
    }

    pub fn from_config(config: &TableConfig) -> Result<Self, CreateError> {
        Self::with_sizer(
            config.capacity,
            &config.probe,
            &config.primary_hash,
            &config.secondary_hash,
            &KnownPrimes::new(config.prime_limit),
        )
    }

    /// Like `create`, with a caller-supplied capacity policy.
    pub fn with_sizer<Z>(
        capacity: usize,
        probe: &str,
        primary_hash: &str,
        secondary_hash: &str,
        sizer: &Z,
    ) -> Result<Self, CreateError>
    where
        Z: CapacitySizer + ?Sized,
    {
        let primary = HashStrategy::resolve(primary_hash);
        let secondary = HashStrategy::resolve(secondary_hash);
        let probe_strategy = ProbeStrategy::resolve(probe);

        let size = match sizer
            .capacity_for(capacity)
            .filter(|&size| size > 0 && size >= capacity)
        {
            Some(size) => size,
            None => {
                log::error!("Cannot create table of size {}", capacity);
                return Err(CreateError::NoCapacity {
                    requested: capacity,
                });
            }
        };

        let slots: Box<[Slot<V>]> = (0..size).map(|_| Slot::Empty).collect();
        log::debug!(
            "created table: capacity {} (requested {}), {} probing, {}/{} hashing",
            size,
            capacity,
            probe_strategy,
            primary,
            secondary
        );
        Ok(Self {
            slots,
            len: 0,
            primary,
            secondary,
            probe: probe_strategy,
            names: StrategyNames {
                probe: probe.to_string(),
                primary_hash: primary_hash.to_string(),
                secondary_hash: secondary_hash.to_string(),
            },
            insert_cost: 0,
            lookup_cost: Cell::new(0),
            delete_cost: 0,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn costs(&self) -> Costs {
        Costs {
            insert: self.insert_cost,
            lookup: self.lookup_cost.get(),
            delete: self.delete_cost,
        }
    }

    pub fn probe_strategy(&self) -> ProbeStrategy {
        self.probe
    }
    pub fn primary_hash(&self) -> HashStrategy {
        self.primary
    }
    pub fn secondary_hash(&self) -> HashStrategy {
        self.secondary
    }
    pub fn names(&self) -> &StrategyNames {
        &self.names
    }

    /// Read-only view of every slot, including empty and deleted ones.
    pub fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }

    pub fn slot_validity(&self, index: usize) -> Option<Validity> {
        self.slots.get(index).map(Slot::validity)
    }

    fn start_index(&self, key: &[u8]) -> usize {
        self.primary.hash_index(key, self.capacity())
    }

    fn run_probe(&self, key: &[u8], start: usize, mode: ProbeMode) -> ProbeOutcome {
        self.probe
            .probe(&self.slots, key, start, mode, &self.secondary)
    }

    /// Lookup-mode probe that only reports a slot holding `key`.
    fn locate(&self, key: &[u8]) -> ProbeOutcome {
        let out = self.run_probe(key, self.start_index(key), ProbeMode::Lookup);
        ProbeOutcome {
            slot: out.slot.filter(|&i| self.slots[i].holds(key)),
            cost: out.cost,
        }
    }

    /// Insert `key` (copied) with `value`, returning the slot index used.
    ///
    /// Fails without touching the table if the key is already live or if
    /// the probe sequence finds no empty or deleted slot.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<usize, InsertError> {
        let start = self.start_index(key);
        let out = self.run_probe(key, start, ProbeMode::Insert);
        self.insert_cost += out.cost;

        let Some(index) = out.slot else {
            log::debug!(
                "table full: {} not placed after {} probes",
                PrintableKey(key),
                out.cost
            );
            return Err(InsertError::TableFull {
                capacity: self.capacity(),
            });
        };

        match self.slots[index].validity() {
            Validity::Used => return Err(self.duplicate(key)),
            Validity::Deleted => {
                // The key may still be live further along the chain.
                let check = self.run_probe(key, start, ProbeMode::Lookup);
                self.insert_cost += check.cost;
                if check.slot.is_some_and(|i| self.slots[i].holds(key)) {
                    return Err(self.duplicate(key));
                }
            }
            Validity::Empty => {}
        }

        // Reassigning drops any tombstone key left in the slot.
        self.slots[index] = Slot::Used {
            key: key.into(),
            value,
        };
        self.len += 1;
        Ok(index)
    }

    fn duplicate(&self, key: &[u8]) -> InsertError {
        log::warn!(
            "duplicate {} rejected while probing with '{}'",
            PrintableKey(key),
            self.names.probe
        );
        InsertError::DuplicateKey
    }

    /// Value stored under `key`, if live.
    pub fn lookup(&self, key: &[u8]) -> Option<&V> {
        let out = self.locate(key);
        self.lookup_cost.set(self.lookup_cost.get() + out.cost);
        out.slot.and_then(|i| self.slots[i].value())
    }

    /// Tombstone the slot holding `key` and return its value.
    ///
    /// The key bytes stay in the slot until it is reused.
    pub fn delete(&mut self, key: &[u8]) -> Option<V> {
        let out = self.locate(key);
        self.delete_cost += out.cost;
        let value = self.slots[out.slot?].take_value();
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    /// Call `f` on every live entry in slot order, stopping at the first
    /// `Break`, which is returned.
    pub fn iterate<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&[u8], &V) -> ControlFlow<B>,
    {
        self.iter().try_for_each(|(key, value)| f(key, value))
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a ProbeTable<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
