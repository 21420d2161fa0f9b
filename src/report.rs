//! Human-readable summaries and slot dumps of a table's state.

use crate::key::PrintableKey;
use crate::probe_table::{Costs, ProbeTable, StrategyNames};
use crate::slot::Slot;
use core::fmt;

/// Entry count, capacity, strategies and accrued probe costs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary<'a> {
    pub len: usize,
    pub capacity: usize,
    pub names: &'a StrategyNames,
    pub costs: Costs,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Associative array contains {} entries in a table of {} size",
            self.len, self.capacity
        )?;
        writeln!(
            f,
            "Strategies used: '{}' hash, '{}' secondary hash and '{}' probing",
            self.names.primary_hash, self.names.secondary_hash, self.names.probe
        )?;
        writeln!(f, "Costs accrued due to probing:")?;
        writeln!(f, "  Insertion : {}", self.costs.insert)?;
        writeln!(f, "  Search    : {}", self.costs.lookup)?;
        writeln!(f, "  Deletion  : {}", self.costs.delete)
    }
}

/// One line per slot, each prefixed with `tag`.
pub struct SlotDump<'a, V> {
    slots: &'a [Slot<V>],
    tag: &'a str,
}

impl<V> fmt::Display for SlotDump<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag;
        writeln!(f, "{}Dumping table of {} slots:", tag, self.slots.len())?;
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Used { key, .. } => {
                    writeln!(f, "{}  {} : in use : '{}'", tag, i, PrintableKey(key))?
                }
                Slot::Empty => writeln!(f, "{}  {} : empty (NULL)", tag, i)?,
                Slot::Deleted { key } => writeln!(
                    f,
                    "{}  {} : empty (deleted - was '{}')",
                    tag,
                    i,
                    PrintableKey(key)
                )?,
            }
        }
        Ok(())
    }
}

impl<V> ProbeTable<V> {
    pub fn summary(&self) -> Summary<'_> {
        Summary {
            len: self.len(),
            capacity: self.capacity(),
            names: self.names(),
            costs: self.costs(),
        }
    }

    pub fn dump<'a>(&'a self, tag: &'a str) -> SlotDump<'a, V> {
        SlotDump {
            slots: self.slots(),
            tag,
        }
    }
}
