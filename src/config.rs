//! Table configuration: requested capacity, strategy names and sizing bound.

use crate::primes::KNOWN_PRIME_LIMIT;

/// Default requested capacity.
pub const DEFAULT_CAPACITY: usize = 11;

/// Everything needed to build a [`ProbeTable`](crate::ProbeTable).
///
/// Strategy names are kept as given; they are resolved (with fallback) when
/// the table is created and reported verbatim in the summary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableConfig {
    pub capacity: usize,
    pub probe: String,
    pub primary_hash: String,
    pub secondary_hash: String,
    /// Capacities are rounded up to a prime below this bound.
    pub prime_limit: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            probe: "linear".to_string(),
            primary_hash: "sum".to_string(),
            secondary_hash: "length".to_string(),
            prime_limit: KNOWN_PRIME_LIMIT,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_probe(mut self, name: impl Into<String>) -> Self {
        self.probe = name.into();
        self
    }

    pub fn with_primary_hash(mut self, name: impl Into<String>) -> Self {
        self.primary_hash = name.into();
        self
    }

    pub fn with_secondary_hash(mut self, name: impl Into<String>) -> Self {
        self.secondary_hash = name.into();
        self
    }

    pub fn with_prime_limit(mut self, limit: usize) -> Self {
        self.prime_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let cfg = TableConfig::new()
            .with_capacity(5)
            .with_probe("double")
            .with_primary_hash("prime")
            .with_secondary_hash("sum")
            .with_prime_limit(100);
        assert_eq!(cfg.capacity, 5);
        assert_eq!(cfg.probe, "double");
        assert_eq!(cfg.primary_hash, "prime");
        assert_eq!(cfg.secondary_hash, "sum");
        assert_eq!(cfg.prime_limit, 100);

        let d = TableConfig::default();
        assert_eq!(d.capacity, DEFAULT_CAPACITY);
        assert_eq!(d.prime_limit, KNOWN_PRIME_LIMIT);
    }
}
