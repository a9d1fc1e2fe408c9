//! Segmented sieve of Eratosthenes with a 2-3-5 wheel.
//!
//! The naive sieve strikes multiples of every prime across one large array and
//! pays a cache miss for nearly every strike once the array outgrows L2.
//! Sieving fixed-size segments keeps the working set cache-resident; each base
//! prime carries the offset of its next unmarked multiple from one segment
//! into the next, so no multiple is ever recomputed from scratch. The
//! candidate scan steps through the {2, 3, 5} wheel, touching only positions
//! coprime to 30 without a modulus test.
//!
//! Layout after Kim Walisch's segmented sieve notes:
//! <https://github.com/kimwalisch/primesieve/wiki/Segmented-sieve-of-Eratosthenes>

use alloc::vec;
use alloc::vec::Vec;

use super::precomputed::SIEVE_WHEEL_INCREMENTS;

// Flags per segment, sized to stay resident in a 512 KiB L2 cache.
pub(crate) const SEGMENT_SIZE: usize = 524_288;

/// All primes up to and including `limit`, ascending and duplicate-free.
///
/// The output vector is pre-sized from the bound π(x) < 1.26 x / ln x, so
/// generation performs no reallocation, and its length is the exact count.
pub fn generate_primes(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }
    if limit < 3 {
        return vec![2];
    }
    if limit < 5 {
        return vec![2, 3];
    }

    let sqrt_limit = limit.isqrt();
    let mut base_candidate = vec![true; sqrt_limit as usize + 1];
    let mut segment = vec![true; SEGMENT_SIZE];
    let mut base_primes: Vec<u64> = Vec::new();
    let mut next_multiple: Vec<u64> = Vec::new();

    let mut primes = Vec::with_capacity(estimate_prime_count(limit));
    primes.extend_from_slice(&[2, 3, 5]);

    // Base-prime cursor, candidate cursor and its wheel phase survive across
    // segments.
    let mut a: u64 = 3;
    let mut n: u64 = 7;
    let mut phase = 0;

    let mut low: u64 = 0;
    while low <= limit {
        segment.fill(true);
        let high = core::cmp::min(low + SEGMENT_SIZE as u64 - 1, limit);

        // A base prime becomes relevant once its square enters the segment.
        while a * a <= high {
            if base_candidate[a as usize] {
                base_primes.push(a);
                next_multiple.push(a * a - low);
                let mut b = a * a;
                while b <= sqrt_limit {
                    base_candidate[b as usize] = false;
                    b += a;
                }
            }
            a += 2;
        }

        for (i, &p) in base_primes.iter().enumerate() {
            let mut j = next_multiple[i];
            while j < SEGMENT_SIZE as u64 {
                segment[j as usize] = false;
                j += 2 * p;
            }
            next_multiple[i] = j - SEGMENT_SIZE as u64;
        }

        while n <= high {
            if segment[(n - low) as usize] {
                primes.push(n);
            }
            n += SIEVE_WHEEL_INCREMENTS[phase];
            phase = (phase + 1) % SIEVE_WHEEL_INCREMENTS.len();
        }

        low += SEGMENT_SIZE as u64;
    }
    primes
}

// Upper estimate of π(limit) for pre-sizing, from π(x) < 1.26 x / ln x.
pub(crate) fn estimate_prime_count(limit: u64) -> usize {
    (1.26 * limit as f64 / libm::log(limit as f64)) as usize + 1
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::{SEGMENT_SIZE, estimate_prime_count, generate_primes};

    // Plain bool-array sieve used as ground truth.
    fn reference_sieve(limit: u64) -> Vec<u64> {
        let limit = limit as usize;
        if limit < 2 {
            return Vec::new();
        }
        let mut is_prime = vec![true; limit + 1];
        is_prime[0] = false;
        is_prime[1] = false;
        let mut p = 2;
        while p * p <= limit {
            if is_prime[p] {
                let mut multiple = p * p;
                while multiple <= limit {
                    is_prime[multiple] = false;
                    multiple += p;
                }
            }
            p += 1;
        }
        (2..=limit).filter(|&n| is_prime[n]).map(|n| n as u64).collect()
    }

    #[test]
    fn primes_below_thirty() {
        assert_eq!(generate_primes(30), [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn degenerate_limits() {
        assert_eq!(generate_primes(0), Vec::<u64>::new());
        assert_eq!(generate_primes(1), Vec::<u64>::new());
        assert_eq!(generate_primes(2), [2]);
        assert_eq!(generate_primes(3), [2, 3]);
        assert_eq!(generate_primes(4), [2, 3]);
        assert_eq!(generate_primes(5), [2, 3, 5]);
        assert_eq!(generate_primes(6), [2, 3, 5]);
        assert_eq!(generate_primes(7), [2, 3, 5, 7]);
    }

    #[test]
    fn matches_reference_below_one_million() {
        assert_eq!(generate_primes(1_000_000), reference_sieve(1_000_000));
    }

    #[test]
    fn limits_on_and_around_primes() {
        // A limit that is itself prime must be included; one below must not.
        for limit in [7, 28, 29, 30, 31, 96, 97, 7919, 7920] {
            assert_eq!(generate_primes(limit), reference_sieve(limit), "limit = {limit}");
        }
    }

    #[test]
    fn segment_boundaries() {
        let bound = SEGMENT_SIZE as u64;
        let reference = reference_sieve(2 * bound + 2);
        for limit in [bound - 2, bound - 1, bound, bound + 1, 2 * bound, 2 * bound + 1] {
            let cut = reference.partition_point(|&p| p <= limit);
            assert_eq!(generate_primes(limit), &reference[..cut], "limit = {limit}");
        }
    }

    #[test]
    fn repeated_generation_is_identical() {
        assert_eq!(generate_primes(100_000), generate_primes(100_000));
    }

    #[test]
    fn estimate_bounds_the_true_count() {
        for limit in [10, 100, 1000, 65_536, 1_000_000] {
            let actual = generate_primes(limit).len();
            assert!(estimate_prime_count(limit) >= actual, "limit = {limit}");
        }
    }

    proptest! {
        #[test]
        fn fuzzy_prefix_of_reference(limit in 0..60_000u64) {
            assert_eq!(generate_primes(limit), reference_sieve(limit));
        }
    }
}
