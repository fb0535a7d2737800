//! Small helpers over [`BigRational`].

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};

/// Exact rational number used throughout the crate.
pub type Rational = BigRational;

/// Create a rational from an integer.
#[inline]
pub fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// Create the rational `numer / denom`, reduced to lowest terms.
///
/// # Panics
/// Panics if `denom` is zero.
#[inline]
pub fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Sign of a rational as `-1`, `0` or `1`.
#[inline]
pub fn sign(x: &BigRational) -> i8 {
    if x.is_positive() {
        1
    } else if x.is_negative() {
        -1
    } else {
        0
    }
}

/// `n!` as an arbitrary-precision integer.
pub fn factorial(n: usize) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * BigInt::from(k))
}

/// Factorials `0!, 1!, ..., n!`.
pub(crate) fn factorials(n: usize) -> Vec<BigInt> {
    let mut out = Vec::with_capacity(n + 1);
    let mut acc = BigInt::one();
    out.push(acc.clone());
    for k in 1..=n {
        acc *= BigInt::from(k);
        out.push(acc.clone());
    }
    out
}
