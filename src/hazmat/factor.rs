//! Trial-division primality, factorization and Euler's totient.
//!
//! All three share the wheel increment tables: a divisor that starts past the
//! wheel basis and advances by the table gaps visits only integers coprime to
//! the basis, skipping the bulk of guaranteed-composite candidates without a
//! modulus test.

use alloc::vec::Vec;

use super::precomputed::{
    FACTOR_WHEEL_BASIS, FACTOR_WHEEL_INCREMENTS, TRIAL_DIVISION_WHEEL_BASIS,
    TRIAL_DIVISION_WHEEL_INCREMENTS,
};

/// Primality by wheel-skipped trial division up to √n.
///
/// Correct for any `n` (`n < 2` returns `false`), but the cost grows with √n;
/// [`is_prime`](`crate::is_prime`) switches to Miller-Rabin where that wins.
pub fn trial_division(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &TRIAL_DIVISION_WHEEL_BASIS {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }
    let mut divisor: u64 = 13;
    let mut i = 0;
    while divisor.checked_mul(divisor).is_some_and(|sq| sq <= n) {
        if n % divisor == 0 {
            return false;
        }
        divisor += TRIAL_DIVISION_WHEEL_INCREMENTS[i];
        i += 1;
        if i == TRIAL_DIVISION_WHEEL_INCREMENTS.len() {
            i = 0;
        }
    }
    true
}

/// The prime factors of `n`, ascending, with multiplicity.
///
/// The product of the returned factors is exactly `n`; `n < 2` yields an
/// empty list. Factors of the wheel basis {2, 3, 5, 7} come out first, then
/// divisors advance from 11 by the wheel gaps until their square exceeds what
/// remains; a remainder above 1 is itself prime.
pub fn factorize(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }
    for &p in &FACTOR_WHEEL_BASIS {
        while n % p == 0 {
            factors.push(p);
            n /= p;
        }
    }
    let mut divisor: u64 = 11;
    let mut i = 0;
    while divisor.checked_mul(divisor).is_some_and(|sq| sq <= n) {
        while n % divisor == 0 {
            factors.push(divisor);
            n /= divisor;
        }
        divisor += FACTOR_WHEEL_INCREMENTS[i];
        i += 1;
        if i == FACTOR_WHEEL_INCREMENTS.len() {
            i = 0;
        }
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Euler's totient φ(n): the count of integers in `1..=n` coprime to `n`.
///
/// Computed from the factorization as n · Π (1 − 1/p) over the distinct prime
/// factors p, dividing before multiplying so the result never overflows.
/// `n < 2` yields 1.
pub fn euler_totient(n: u64) -> u64 {
    if n < 2 {
        return 1;
    }
    let mut numerator: u64 = 1;
    let mut denominator: u64 = 1;
    let mut previous = 0;
    for p in factorize(n) {
        if p == previous {
            continue;
        }
        numerator *= p - 1;
        denominator *= p;
        previous = p;
    }
    n / denominator * numerator
}
