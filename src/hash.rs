//! Primary and secondary hash strategies.
//!
//! Every strategy maps `(key, capacity)` to an index in `[0, capacity)`.
//! They are pure and deterministic; the table never seeds them.

use crate::error::UnknownStrategy;
use core::fmt;
use core::str::FromStr;

/// Maps a key to a slot index in `[0, capacity)`.
pub trait HashFunction {
    fn hash_index(&self, key: &[u8], capacity: usize) -> usize;
}

/// `key.len() mod capacity`. Only as many buckets as there are key lengths.
#[derive(Copy, Clone, Debug, Default)]
pub struct ByLength;

impl HashFunction for ByLength {
    #[inline]
    fn hash_index(&self, key: &[u8], capacity: usize) -> usize {
        key.len() % capacity
    }
}

/// Sum of the key bytes, reduced after every byte.
#[derive(Copy, Clone, Debug, Default)]
pub struct BySum;

impl HashFunction for BySum {
    #[inline]
    fn hash_index(&self, key: &[u8], capacity: usize) -> usize {
        key.iter()
            .fold(0usize, |sum, &b| (sum + b as usize) % capacity)
    }
}

/// Polynomial rolling hash with a prime multiplier.
#[derive(Copy, Clone, Debug, Default)]
pub struct ByPrime;

impl ByPrime {
    pub const MULTIPLIER: u64 = 31;
}

impl HashFunction for ByPrime {
    #[inline]
    fn hash_index(&self, key: &[u8], capacity: usize) -> usize {
        let cap = capacity as u64;
        // h < cap, so h * 31 + 255 stays in u128 range for any usize capacity.
        let h = key.iter().fold(0u64, |h, &b| {
            ((h as u128 * Self::MULTIPLIER as u128 + b as u128) % cap as u128) as u64
        });
        h as usize
    }
}

/// The closed set of hash strategies a table can be configured with.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum HashStrategy {
    Length,
    #[default]
    Sum,
    Prime,
}

impl HashStrategy {
    /// Match on the first three characters of `name` (`len`, `sum`, `pri`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.get(..3)? {
            "sum" => Some(HashStrategy::Sum),
            "len" => Some(HashStrategy::Length),
            "pri" => Some(HashStrategy::Prime),
            _ => None,
        }
    }

    /// Like `from_name`, falling back to `Sum` with a warning.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Invalid hash strategy '{}' - using 'sum'", name);
            HashStrategy::Sum
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashStrategy::Length => "length",
            HashStrategy::Sum => "sum",
            HashStrategy::Prime => "prime",
        }
    }
}

impl HashFunction for HashStrategy {
    #[inline]
    fn hash_index(&self, key: &[u8], capacity: usize) -> usize {
        match self {
            HashStrategy::Length => ByLength.hash_index(key, capacity),
            HashStrategy::Sum => BySum.hash_index(key, capacity),
            HashStrategy::Prime => ByPrime.hash_index(key, capacity),
        }
    }
}

impl FromStr for HashStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownStrategy::new("hash", s))
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
