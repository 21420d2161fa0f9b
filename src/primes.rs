//! Capacity sizing: round a requested capacity up to a known prime.

/// Primes are known up to (but excluding) this bound.
pub const KNOWN_PRIME_LIMIT: usize = 5000;

/// Policy that turns a requested capacity into the capacity actually allocated.
pub trait CapacitySizer {
    /// Returns a capacity `>= requested`, or `None` if none is available.
    fn capacity_for(&self, requested: usize) -> Option<usize>;
}

/// Rounds up to the smallest prime below `limit`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KnownPrimes {
    pub limit: usize,
}

impl KnownPrimes {
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for KnownPrimes {
    fn default() -> Self {
        Self::new(KNOWN_PRIME_LIMIT)
    }
}

impl CapacitySizer for KnownPrimes {
    fn capacity_for(&self, requested: usize) -> Option<usize> {
        (requested.max(2)..self.limit).find(|&n| is_prime(n))
    }
}

/// Smallest known prime `>= requested`.
pub fn larger_prime(requested: usize) -> Option<usize> {
    KnownPrimes::default().capacity_for(requested)
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
