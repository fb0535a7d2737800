//! Property-based tests for Sturm root counting

use num_bigint::BigInt;
use num_rational::BigRational;
use oxicurve_math::{MathError, Polynomial, SturmSequence, count_roots, sign_changes};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Helper to create rational
fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Strategy for distinct integer roots
fn roots_strategy() -> impl Strategy<Value = BTreeSet<i64>> {
    prop::collection::btree_set(-8i64..8, 0..6)
}

/// Strategy for a half-integer interval `(lo + 1/2, hi + 1/2)` with `lo < hi`
fn interval_strategy() -> impl Strategy<Value = (i64, i64)> {
    (-10i64..10, 1i64..12).prop_map(|(lo, width)| (lo, lo + width))
}

/// `c * prod (t - r)^m` over the given roots
fn product_of_factors(roots: &BTreeSet<i64>, multiplicity: u32, scale: i64) -> Polynomial {
    roots
        .iter()
        .fold(Polynomial::constant(rat(scale, 1)), |acc, &r| {
            &acc * &Polynomial::linear_factor(&rat(r, 1)).pow(multiplicity)
        })
}

fn expected_count(roots: &BTreeSet<i64>, lo: i64, hi: i64) -> usize {
    roots.iter().filter(|&&r| lo < r && r <= hi).count()
}

#[cfg(test)]
mod known_roots_properties {
    use super::*;

    proptest! {
        /// Sturm counts exactly the roots inside the interval
        #[test]
        fn counts_simple_roots(
            roots in roots_strategy(),
            (lo, hi) in interval_strategy(),
            scale in prop::sample::select(vec![-3i64, -1, 1, 2, 5])
        ) {
            let f = product_of_factors(&roots, 1, scale);
            let count = count_roots(&f, &rat(2 * lo + 1, 2), &rat(2 * hi + 1, 2))
                .expect("count failed");
            prop_assert_eq!(count, expected_count(&roots, lo, hi));
        }

        /// Repeated roots are counted once
        #[test]
        fn counts_repeated_roots_once(
            roots in roots_strategy(),
            (lo, hi) in interval_strategy(),
            multiplicity in 2u32..4
        ) {
            let f = product_of_factors(&roots, multiplicity, 1);
            let count = count_roots(&f, &rat(2 * lo + 1, 2), &rat(2 * hi + 1, 2))
                .expect("count failed");
            prop_assert_eq!(count, expected_count(&roots, lo, hi));
        }

        /// Counts over adjacent intervals add up
        #[test]
        fn counts_are_additive(
            roots in roots_strategy(),
            (lo, hi) in interval_strategy(),
            split in 1i64..12
        ) {
            prop_assume!(lo + split < hi);
            let f = product_of_factors(&roots, 1, 1);
            let seq = SturmSequence::new(&f);

            let a = rat(2 * lo + 1, 2);
            let m = rat(2 * (lo + split) + 1, 2);
            let b = rat(2 * hi + 1, 2);

            let whole = seq.count_roots(&a, &b).expect("count failed");
            let left = seq.count_roots(&a, &m).expect("count failed");
            let right = seq.count_roots(&m, &b).expect("count failed");
            prop_assert_eq!(whole, left + right);
        }

        /// A root on the boundary is reported instead of counted
        #[test]
        fn endpoint_root_is_rejected(roots in roots_strategy(), width in 1i64..5) {
            prop_assume!(!roots.is_empty());
            let f = product_of_factors(&roots, 1, 1);
            let r = *roots.iter().next().expect("nonempty");

            let result = count_roots(&f, &rat(r, 1), &rat(r + width, 1));
            prop_assert_eq!(result, Err(MathError::EndpointIsRoot(rat(r, 1))));
        }

        /// Reversed bounds are rejected
        #[test]
        fn reversed_interval_is_rejected((lo, hi) in interval_strategy()) {
            let f = Polynomial::from_ints(&[1, 0, 1]);
            let result = count_roots(&f, &rat(hi, 1), &rat(lo, 1));
            let is_invalid = matches!(result, Err(MathError::InvalidInterval { .. }));
            prop_assert!(is_invalid);
        }
    }
}

#[cfg(test)]
mod sign_change_properties {
    use super::*;

    proptest! {
        /// Sign changes never exceed the number of gaps
        #[test]
        fn sign_changes_bounded(values in prop::collection::vec(-3i64..3, 0..10)) {
            let values: Vec<_> = values.into_iter().map(|v| rat(v, 1)).collect();
            prop_assert!(sign_changes(&values) <= values.len().saturating_sub(1));
        }

        /// Zeros do not affect the count
        #[test]
        fn zeros_are_transparent(values in prop::collection::vec(-3i64..3, 0..10)) {
            let with_zeros: Vec<_> = values.iter().map(|&v| rat(v, 1)).collect();
            let without: Vec<_> = with_zeros.iter().filter(|v| **v != rat(0, 1)).cloned().collect();
            prop_assert_eq!(sign_changes(&with_zeros), sign_changes(&without));
        }
    }
}
