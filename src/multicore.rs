//! Prime generation that can parallelize across multiple cores.

use alloc::vec;
use alloc::vec::Vec;

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::hazmat::sieve::{self, SEGMENT_SIZE, estimate_prime_count};

// Residues coprime to 30 within one wheel period, in scan order, and the gap
// from each residue to the next. Rotations of the serial sieve's jump table:
// a segment may start anywhere in the period, so the scan needs every phase.
const WHEEL_RESIDUES: [u64; 8] = [1, 7, 11, 13, 17, 19, 23, 29];
const WHEEL_GAPS: [u64; 8] = [6, 4, 2, 4, 2, 4, 6, 2];

/// All primes up to and including `limit`, ascending: the same output as
/// [`generate_primes`](`crate::generate_primes`), with segments sieved in
/// parallel on the rayon thread pool.
///
/// Base primes up to √limit are sieved serially (they are a vanishing share
/// of the work); each segment then computes its own multiple offsets and
/// wheel phase independently, and the per-segment results are stitched back
/// in order.
pub fn generate_primes(limit: u64) -> Vec<u64> {
    if limit < 7 {
        return sieve::generate_primes(limit);
    }

    let base_primes = sieve::generate_primes(limit.isqrt());

    let mut segment_lows = Vec::new();
    let mut low = 0u64;
    while low <= limit {
        segment_lows.push(low);
        low += SEGMENT_SIZE as u64;
    }

    let chunks: Vec<Vec<u64>> = segment_lows
        .into_par_iter()
        .map(|low| {
            let high = core::cmp::min(low + SEGMENT_SIZE as u64 - 1, limit);
            sieve_segment(&base_primes, low, high)
        })
        .collect();

    let mut primes = Vec::with_capacity(estimate_prime_count(limit));
    primes.extend_from_slice(&[2, 3, 5]);
    for chunk in &chunks {
        primes.extend_from_slice(chunk);
    }
    primes
}

// Sieve [low, high] in isolation: strike odd multiples of the base primes,
// then scan the surviving wheel candidates.
fn sieve_segment(base_primes: &[u64], low: u64, high: u64) -> Vec<u64> {
    let mut flags = vec![true; (high - low + 1) as usize];
    for &p in base_primes {
        if p < 7 {
            continue; // the wheel scan already skips multiples of 2, 3 and 5
        }
        if p * p > high {
            break;
        }
        // First odd multiple of p inside the segment, but no earlier than p²
        // (smaller multiples belong to smaller base primes).
        let mut multiple = core::cmp::max(p * p, low.div_ceil(p) * p);
        if multiple % 2 == 0 {
            multiple += p;
        }
        while multiple <= high {
            flags[(multiple - low) as usize] = false;
            multiple += 2 * p;
        }
    }

    let mut primes = Vec::new();
    let period_start = low / 30 * 30;
    let first = WHEEL_RESIDUES.partition_point(|&r| period_start + r < low);
    let (mut n, mut phase) = if first == WHEEL_RESIDUES.len() {
        (period_start + 30 + WHEEL_RESIDUES[0], 0)
    } else {
        (period_start + WHEEL_RESIDUES[first], first)
    };
    while n <= high {
        if n >= 7 && flags[(n - low) as usize] {
            primes.push(n);
        }
        n += WHEEL_GAPS[phase];
        phase = (phase + 1) % WHEEL_GAPS.len();
    }
    primes
}
