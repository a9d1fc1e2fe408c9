//! Residue wheels: ascending integers coprime to a small prime basis, used to
//! skip guaranteed composites when sieving and trial-dividing.

use alloc::vec::Vec;

/// A wheel over a prime basis: the basis primes followed by every larger
/// integer coprime to their product, ascending, up to a coverage limit.
///
/// The first period `[0, D)` (D = the basis product) is computed once by trial
/// division. The offsets from any multiple of D to the following residues (the
/// spoke pattern) are the same in every period, so coverage grows by rotation:
/// one addition per residue instead of a re-sieve. Residues beyond the basis
/// are only guaranteed coprime to the basis, not prime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    residues: Vec<u64>,
    modulus: u64,
    basis_len: usize,
}

impl Wheel {
    /// Builds a wheel over `basis` covering candidates up to at least `limit`.
    ///
    /// The basis must hold at least two primes in ascending order (a one-prime
    /// basis has no spoke pattern to rotate). A `limit` of zero degenerates to
    /// the basis alone.
    pub fn new(basis: &[u64], limit: u64) -> Self {
        debug_assert!(basis.len() >= 2, "a one-prime basis cannot be rotated");
        debug_assert!(basis.windows(2).all(|pair| pair[0] < pair[1]));

        let modulus = basis.iter().product();
        let mut residues = basis.to_vec();
        if limit > 0 {
            let largest = *basis.last().expect("basis holds at least two primes");
            for candidate in largest + 1..modulus {
                if basis.iter().all(|&p| candidate % p != 0) {
                    residues.push(candidate);
                }
            }
        }
        let mut wheel = Self {
            residues,
            modulus,
            basis_len: basis.len(),
        };
        if limit > 0 {
            wheel.rotate(limit / wheel.modulus);
        }
        wheel
    }

    /// Rotates the wheel forward until it covers candidates up to at least
    /// `limit`. Already-covered limits are a no-op.
    pub fn extend_to(&mut self, limit: u64) {
        let target = limit / self.modulus;
        let covered = self.last_period();
        if target > covered {
            self.rotate(target - covered);
        }
    }

    /// The wheel's residues, ascending.
    pub fn residues(&self) -> &[u64] {
        &self.residues
    }

    /// The product of the basis primes; the wheel's period length.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// How many basis primes sit at the head of the residue list.
    pub fn basis_len(&self) -> usize {
        self.basis_len
    }

    fn last_period(&self) -> u64 {
        self.residues.last().map_or(0, |&r| r / self.modulus)
    }

    // Appends `rotations` whole periods by shifting the spoke pattern, which
    // is [1, r1, r2, ...] for the non-basis residues r of the first period.
    fn rotate(&mut self, rotations: u64) {
        if rotations == 0 {
            return;
        }
        let first_period_end = self.residues.partition_point(|&r| r <= self.modulus);
        let mut spokes = Vec::with_capacity(first_period_end - self.basis_len + 1);
        spokes.push(1);
        spokes.extend_from_slice(&self.residues[self.basis_len..first_period_end]);

        let mut period = self.last_period() + 1;
        self.residues.reserve(rotations as usize * spokes.len());
        for _ in 0..rotations {
            for &spoke in &spokes {
                self.residues.push(period * self.modulus + spoke);
            }
            period += 1;
        }
    }
}

/// One period of gaps between consecutive wheel candidates, starting at the
/// first candidate above the largest basis prime.
///
/// Cycling the gaps advances a trial divisor through every integer coprime to
/// the basis and no others; one full cycle advances by the wheel's modulus.
pub fn increments(basis: &[u64]) -> Vec<u64> {
    let modulus: u64 = basis.iter().product();
    let wheel = Wheel::new(basis, 2 * modulus);
    let residues = wheel.residues();
    let mut gaps = Vec::new();
    let mut i = wheel.basis_len();
    while residues[i] <= modulus + 1 {
        gaps.push(residues[i + 1] - residues[i]);
        i += 1;
    }
    gaps
}
