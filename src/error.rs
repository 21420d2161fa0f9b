//! Error types for table creation, insertion and strategy parsing.

use thiserror::Error;

/// Table creation failed; no table was constructed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CreateError {
    #[error("cannot create table of size {requested}: no valid capacity available")]
    NoCapacity { requested: usize },
}

/// Insertion failed; the table is left unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The key is already stored in a live slot.
    #[error("duplicate key")]
    DuplicateKey,
    /// The probe sequence ran out before finding an empty or deleted slot.
    #[error("table full: no free slot reachable in {capacity} slots")]
    TableFull { capacity: usize },
}

/// A strategy name that matches none of the known prefixes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {family} strategy '{name}'")]
pub struct UnknownStrategy {
    pub family: &'static str,
    pub name: String,
}

impl UnknownStrategy {
    pub(crate) fn new(family: &'static str, name: &str) -> Self {
        Self {
            family,
            name: name.to_string(),
        }
    }
}
