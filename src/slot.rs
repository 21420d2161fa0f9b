//! Slot state machine: `Empty -> Used -> Deleted -> Used ...`

use crate::key::keys_equal;

/// Observable state of a slot, without its contents.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Validity {
    Empty,
    Used,
    Deleted,
}

/// One cell of the table. The key buffer is owned by the slot; a deleted
/// slot keeps its key until the slot is reused or the table is dropped.
#[derive(Debug)]
pub enum Slot<V> {
    Empty,
    Used { key: Box<[u8]>, value: V },
    Deleted { key: Box<[u8]> },
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<V> Slot<V> {
    #[inline]
    pub fn validity(&self) -> Validity {
        match self {
            Slot::Empty => Validity::Empty,
            Slot::Used { .. } => Validity::Used,
            Slot::Deleted { .. } => Validity::Deleted,
        }
    }

    /// Key bytes of a used or deleted slot.
    pub fn key(&self) -> Option<&[u8]> {
        match self {
            Slot::Empty => None,
            Slot::Used { key, .. } | Slot::Deleted { key } => Some(&key[..]),
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            Slot::Used { value, .. } => Some(value),
            _ => None,
        }
    }

    /// True only for a used slot holding exactly `key`.
    #[inline]
    pub fn holds(&self, key: &[u8]) -> bool {
        matches!(self, Slot::Used { key: k, .. } if keys_equal(k, key))
    }

    /// Turn a used slot into a tombstone, handing back its value.
    pub(crate) fn take_value(&mut self) -> Option<V> {
        match core::mem::take(self) {
            Slot::Used { key, value } => {
                *self = Slot::Deleted { key };
                Some(value)
            }
            other => {
                *self = other;
                None
            }
        }
    }
}
