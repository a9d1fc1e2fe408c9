//! Overflow-safe modular multiplication and exponentiation on `u64`.

use core::num::NonZeroU64;

/// Computes `(a * b) % modulus` without intermediate overflow, for any modulus.
///
/// Operands are reduced into `[0, modulus)` first. When both reduced operands
/// fit in 32 bits the product fits a `u64` and a native multiply suffices;
/// otherwise the product is accumulated by binary long multiplication, with
/// every conditional add and doubling reduced before it can wrap.
pub fn mulmod(a: u64, b: u64, modulus: NonZeroU64) -> u64 {
    let m = modulus.get();
    let mut a = a % m;
    let mut b = b % m;
    if (a | b) < (1 << 32) {
        return a * b % m;
    }

    if b > a {
        core::mem::swap(&mut a, &mut b);
    }
    let mut r = 0;
    while b != 0 {
        if b & 1 == 1 {
            r = addmod(r, a, m);
        }
        b >>= 1;
        if b != 0 {
            a = addmod(a, a, m);
        }
    }
    r
}

// (x + y) % m for x, y already in [0, m). Written subtraction-first so the sum
// never has to exist as a u64.
const fn addmod(x: u64, y: u64, m: u64) -> u64 {
    if x >= m - y { x - (m - y) } else { x + y }
}

/// Computes `a^e % modulus` by squaring, without intermediate overflow.
///
/// `e == 0` returns `1 % modulus`. When the modulus fits in 32 bits every
/// intermediate product fits a `u64` and the loop uses plain multiplies;
/// otherwise it routes through [`mulmod`].
pub fn powmod(a: u64, e: u64, modulus: NonZeroU64) -> u64 {
    let m = modulus.get();
    let mut a = a % m;
    let mut e = e;
    let mut r = 1 % m;
    if m < (1 << 32) {
        while e != 0 {
            if e & 1 == 1 {
                r = r * a % m;
            }
            e >>= 1;
            a = a * a % m;
        }
    } else {
        while e != 0 {
            if e & 1 == 1 {
                r = mulmod(r, a, modulus);
            }
            e >>= 1;
            a = mulmod(a, a, modulus);
        }
    }
    r
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU64;

    use num_bigint::BigUint;
    use proptest::prelude::*;

    use super::{mulmod, powmod};

    fn nz(m: u64) -> NonZeroU64 {
        NonZeroU64::new(m).unwrap()
    }

    #[test]
    fn mulmod_small_operands() {
        assert_eq!(mulmod(7, 8, nz(100)), 56);
        assert_eq!(mulmod(7, 8, nz(10)), 6);
        assert_eq!(mulmod(0, 12345, nz(97)), 0);
        assert_eq!(mulmod(96, 96, nz(97)), 1);
    }

    #[test]
    fn mulmod_full_range() {
        // (M - 1)(M - 2) = (-1)(-2) = 2 (mod M)
        let m = u64::MAX;
        assert_eq!(mulmod(m - 1, m - 2, nz(m)), 2);
        // Largest 64-bit prime squared, minus-one times itself.
        let p = 18_446_744_073_709_551_557;
        assert_eq!(mulmod(p - 1, p - 1, nz(p)), 1);
    }

    #[test]
    fn powmod_edge_exponents() {
        assert_eq!(powmod(12345, 0, nz(97)), 1);
        assert_eq!(powmod(12345, 0, nz(1)), 0);
        assert_eq!(powmod(12345, 1, nz(97)), 12345 % 97);
        assert_eq!(powmod(2, 10, nz(10_000)), 1024);
    }

    #[test]
    fn powmod_fermat_little_theorem() {
        // a^(p-1) = 1 (mod p) across all three multiply paths:
        // 32-bit modulus, 63-bit modulus, full-width modulus.
        for p in [1_000_000_007, 2_305_843_009_213_693_951, 18_446_744_073_709_551_557] {
            assert_eq!(powmod(3, p - 1, nz(p)), 1, "p = {p}");
        }
        let m = u64::MAX;
        assert_eq!(powmod(m - 1, 3, nz(m)), m - 1);
    }

    proptest! {
        #[test]
        fn fuzzy_mulmod(a: u64, b: u64, m in 1..=u64::MAX) {
            let test = mulmod(a, b, nz(m));
            let reference = BigUint::from(a) * BigUint::from(b) % BigUint::from(m);
            assert_eq!(BigUint::from(test), reference);
        }

        #[test]
        fn fuzzy_powmod(a: u64, e: u64, m in 1..=u64::MAX) {
            let test = powmod(a, e, nz(m));
            let reference = BigUint::from(a).modpow(&BigUint::from(e), &BigUint::from(m));
            assert_eq!(BigUint::from(test), reference);
        }

        #[test]
        fn fuzzy_mulmod_commutes(a: u64, b: u64, m in 1..=u64::MAX) {
            assert_eq!(mulmod(a, b, nz(m)), mulmod(b, a, nz(m)));
        }
    }
}
