//! probe-table: a fixed-capacity, open-addressing hash table over byte
//! keys with pluggable hash functions and probing strategies.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: expose the classic internals of an open-addressing table
//!   (hash choice, collision resolution, tombstones, probe cost) as
//!   small, separately testable layers.
//! - Layers:
//!   - `key`: byte-exact, length-tagged key comparison.
//!   - `hash`: `HashFunction` trait with length, sum and polynomial
//!     (prime multiplier) strategies, selected through `HashStrategy`.
//!   - `probe`: `Probe` trait with linear, quadratic and double-hash
//!     walks over the slot array, selected through `ProbeStrategy`.
//!   - `slot`: the `Empty -> Used -> Deleted -> Used` state machine.
//!   - `ProbeTable<V>`: create/insert/lookup/delete/iterate on top of
//!     the above, plus per-operation cost counters.
//!
//! Constraints
//! - Capacity is fixed at creation (rounded up to a known prime); the
//!   table never grows or rehashes, so probe sequences are stable.
//! - Single-threaded: no internal synchronization. The lookup cost
//!   counter lives in a `Cell`, which also keeps the table `!Sync`.
//! - Keys are copied into owned buffers; values are stored as given.
//!   Callers that keep ownership of their data store `&T` or an id.
//! - At most one live slot holds a given key; duplicate inserts fail.
//!
//! Probing and tombstones
//! - Inserts stop at the first empty slot or tombstone on the chain.
//!   When a tombstone is chosen, a lookup-mode walk confirms the key is
//!   not live further along before the slot is reused.
//! - Lookups and deletes walk past tombstones and stop only at an exact
//!   match, an empty slot, or the strategy's termination bound.
//! - Every visited slot adds one to the counter of the operation that
//!   caused the walk.
//!
//! Strategy names
//! - Names are matched on their first three characters (`lin`, `qua`,
//!   `dou`; `sum`, `len`, `pri`). Unknown names log a warning and fall
//!   back to linear probing / sum hashing rather than failing.
//!
//! Failure modes
//! - Creation fails only when no capacity can be chosen (`CreateError`).
//! - A full table and a duplicate key are ordinary `InsertError`s.
//! - A missing key is `None` from `lookup` and `delete`.

pub mod config;
pub mod error;
pub mod hash;
pub mod key;
pub mod primes;
pub mod probe;
mod probe_table;
mod probe_table_proptest;
pub mod report;
pub mod slot;

// Public surface
pub use config::TableConfig;
pub use error::{CreateError, InsertError, UnknownStrategy};
pub use hash::{HashFunction, HashStrategy};
pub use probe::{Probe, ProbeMode, ProbeOutcome, ProbeStrategy};
pub use probe_table::{Costs, Iter, ProbeTable, StrategyNames};
pub use slot::{Slot, Validity};
