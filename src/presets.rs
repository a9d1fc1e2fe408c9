use crate::hazmat::precomputed::{
    MILLER_RABIN_WITNESSES, QUICK_REJECTION_PRIMES, TRIAL_DIVISION_CUTOVER,
};
use crate::hazmat::{MillerRabin, Primality, PrimeCounter, trial_division};

// Counting bounds this small are cheapest answered by a table that covers
// them outright.
const DIRECT_COUNT_LIMIT: u64 = 0x10000;

/// Deterministic primality test for any `u64`.
///
/// Below 321,503,171 this trial-divides with a {2, 3, 5, 7, 11} wheel, where
/// the division loop beats the modular exponentiation setup. At and above the
/// cutover, multiples of the first eight primes are rejected
/// outright and the rest face Miller-Rabin with a witness set that is
/// deterministic for the whole 64-bit range. Returns `false` for `n < 2`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < TRIAL_DIVISION_CUTOVER {
        return trial_division(n);
    }
    if QUICK_REJECTION_PRIMES.iter().any(|&p| n % p == 0) {
        return false;
    }
    let mr = MillerRabin::new(n);
    for &witness in &MILLER_RABIN_WITNESSES {
        match mr.test(witness) {
            Primality::Composite => return false,
            Primality::Prime => return true,
            Primality::ProbablyPrime => {}
        }
    }
    true
}

/// π(n): the number of primes less than or equal to `n`, without enumerating
/// them.
///
/// Builds a throwaway [`PrimeCounter`] sized to √n (or to `n` itself for
/// small bounds), so a single call stays cheap; hold a counter yourself when
/// issuing many queries.
pub fn prime_count(n: u64) -> u64 {
    if n < 2 {
        return 0;
    }
    let table_limit = core::cmp::max(n.isqrt() + 1, core::cmp::min(n, DIRECT_COUNT_LIMIT));
    let mut counter = PrimeCounter::with_table_limit(table_limit);
    counter
        .count(n)
        .expect("the table limit covers the square root of n by construction")
}
