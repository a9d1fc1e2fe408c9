//! Meissel-Lehmer prime counting.
//!
//! π(n) is assembled from Legendre's partial sieve function phi(n, a), the
//! count of integers ≤ n with no prime factor among the first a primes, plus
//! correction terms over the k-almost-primes, so only the primes up to √n are
//! ever enumerated. Two memoization tiers back the recursion: dense
//! fixed-capacity tables for the small arguments the recursion revisits
//! constantly, and an unbounded map for large arguments that are rare but
//! expensive to recompute. Entries never go stale (the memoized functions are
//! pure given the prime table); arguments outside a dense tier's range are
//! simply never cached.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::roots::iroot;
use super::sieve::generate_primes;
use crate::error::Error;

/// Prime-table limit used by [`PrimeCounter::new`]; supports counts up to 10^16.
pub const DEFAULT_TABLE_LIMIT: u64 = 100_000_000;

// Bounds of the dense cache tiers. Arguments at or above them fall through to
// recomputation (phi) or to the associative large-n tier (π).
const PHI_CACHE_A: usize = 0xff;
const PHI_CACHE_N: usize = 0xffff;
const PI_CACHE_N: usize = 0xffff;

/// A Meissel-Lehmer prime counter owning its prime table and memoization
/// state.
///
/// The table is generated once at construction and shared read-only by every
/// count; the caches only ever gain entries. Nothing is process-wide, so one
/// counter per thread is safe.
pub struct PrimeCounter {
    table_limit: u64,
    primes: Vec<u64>,
    // Dense phi tier, flat-indexed a * PHI_CACHE_N + n; 0 means unset (phi is
    // never 0 for the cached argument range).
    phi_cache: Vec<u64>,
    // Dense π tier for n < PI_CACHE_N; 0 means unset.
    pi_cache: Vec<u64>,
    // π(n) for n beyond the table's largest prime: rare but expensive calls.
    large_pi_cache: BTreeMap<u64, u64>,
}

impl PrimeCounter {
    /// A counter backed by the default 10^8 prime table.
    ///
    /// Generation takes a moment and the table holds 5.76 million primes;
    /// where that is oversized, pick your own limit with
    /// [`with_table_limit`](`Self::with_table_limit`).
    pub fn new() -> Self {
        Self::with_table_limit(DEFAULT_TABLE_LIMIT)
    }

    /// A counter whose table holds every prime up to `table_limit`, able to
    /// count primes below `table_limit`².
    pub fn with_table_limit(table_limit: u64) -> Self {
        Self {
            table_limit,
            primes: generate_primes(table_limit),
            phi_cache: vec![0; PHI_CACHE_A * PHI_CACHE_N],
            pi_cache: vec![0; PI_CACHE_N],
            large_pi_cache: BTreeMap::new(),
        }
    }

    /// π(n): the number of primes less than or equal to `n`.
    ///
    /// Returns 0 for `n < 2` and [`Error::PrimeTableExhausted`] when √n
    /// exceeds the table limit, which is the point where the recursion's
    /// prime lookups would run off the table. Results are memoized, so
    /// repeated and overlapping queries on one counter get cheaper over time.
    pub fn count(&mut self, n: u64) -> Result<u64, Error> {
        if n < 2 {
            return Ok(0);
        }
        if self.primes.is_empty() || n.isqrt() > self.table_limit {
            return Err(Error::PrimeTableExhausted {
                n,
                table_limit: self.table_limit,
            });
        }
        Ok(self.lehmer_pi(n))
    }

    fn lehmer_pi(&mut self, n: u64) -> u64 {
        let largest = *self.primes.last().expect("the table is never empty here");
        if n > largest {
            if let Some(&pi) = self.large_pi_cache.get(&n) {
                return pi;
            }
        } else {
            if (n as usize) < PI_CACHE_N {
                let cached = self.pi_cache[n as usize];
                if cached != 0 {
                    return cached;
                }
            }
            let pi = self.primes.partition_point(|&p| p <= n) as u64;
            if (n as usize) < PI_CACHE_N {
                self.pi_cache[n as usize] = pi;
            }
            return pi;
        }

        let root = iroot(n, 4);
        let a = self.lehmer_pi(root);
        let pi = self.phi(n, a) + a - 1 - self.px(n, a, 2) - self.px(n, a, 3);
        self.large_pi_cache.insert(n, pi);
        pi
    }

    // Legendre's partial sieve function: integers in 1..=n untouched by the
    // first a primes.
    fn phi(&mut self, n: u64, a: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        if n < a {
            return 1;
        }
        if a == 0 {
            return n;
        }
        let cacheable = (a as usize) < PHI_CACHE_A && (n as usize) < PHI_CACHE_N;
        if cacheable {
            let cached = self.phi_cache[a as usize * PHI_CACHE_N + n as usize];
            if cached != 0 {
                return cached;
            }
        }
        let p = self.primes[a as usize - 1];
        let sum = self.phi(n, a - 1) - self.phi(n / p, a - 1);
        if cacheable {
            self.phi_cache[a as usize * PHI_CACHE_N + n as usize] = sum;
        }
        sum
    }

    // Count of x-almost-primes below n whose smallest prime factor lies past
    // the a-th prime: the correction terms of Lehmer's formula.
    fn px(&mut self, n: u64, a: u64, x: u64) -> u64 {
        if x == 0 {
            return 1;
        }
        if x == 1 {
            return self.lehmer_pi(n);
        }
        let b = self.lehmer_pi(iroot(n, x as u32));
        let mut sum = 0;
        if x == 2 {
            for i in a..b {
                let p = self.primes[i as usize];
                sum += self.lehmer_pi(n / p) - i;
            }
        } else {
            for i in a..b {
                let p = self.primes[i as usize];
                sum += self.px(n / p, i, x - 1);
            }
        }
        sum
    }
}

impl Default for PrimeCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrimeCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimeCounter")
            .field("table_limit", &self.table_limit)
            .field("primes", &self.primes.len())
            .field("large_pi_cache", &self.large_pi_cache.len())
            .finish_non_exhaustive()
    }
}
