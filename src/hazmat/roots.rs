//! Integer roots.

/// Floor of the `n`-th root of `x`.
///
/// Seeds from the floating-point root and corrects the seed with
/// overflow-checked integer powers, so the result is exact even where the
/// float approximation is off by a few. `n` must be nonzero; square roots are
/// cheaper through [`u64::isqrt`].
pub fn iroot(x: u64, n: u32) -> u64 {
    debug_assert!(n > 0, "the zeroth root is undefined");
    if n == 1 || x < 2 {
        return x;
    }
    let mut r = libm::pow(x as f64, 1.0 / f64::from(n)) as u64;
    while r.checked_pow(n).is_none_or(|p| p > x) {
        r -= 1;
    }
    while (r + 1).checked_pow(n).is_some_and(|p| p <= x) {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use num_integer::Roots;
    use proptest::prelude::*;

    use super::iroot;

    #[test]
    fn known_roots() {
        assert_eq!(iroot(0, 3), 0);
        assert_eq!(iroot(1, 5), 1);
        assert_eq!(iroot(81, 4), 3);
        assert_eq!(iroot(255, 4), 3);
        assert_eq!(iroot(256, 4), 4);
        assert_eq!(iroot(1_000_000_000_000, 4), 1000);
        assert_eq!(iroot(999_999_999_999, 4), 999);
        assert_eq!(iroot(u64::MAX, 2), u64::MAX.isqrt());
        assert_eq!(iroot(u64::MAX, 3), 2_642_245);
        assert_eq!(iroot(u64::MAX, 64), 1);
    }

    proptest! {
        #[test]
        fn fuzzy_iroot_matches_nth_root(x: u64, n in 2..=16u32) {
            assert_eq!(iroot(x, n), x.nth_root(n));
        }

        #[test]
        fn fuzzy_iroot_squares(x: u64) {
            assert_eq!(iroot(x, 2), x.isqrt());
        }

        #[test]
        fn fuzzy_iroot_brackets(x: u64, n in 2..=10u32) {
            let r = iroot(x, n);
            assert!(r.checked_pow(n).is_some_and(|p| p <= x));
            assert!((r + 1).checked_pow(n).is_none_or(|p| p > x));
        }
    }
}
