//! Dense univariate polynomials over Q.
//!
//! Coefficients are stored in increasing degree order,
//! `a_0 + a_1*t + a_2*t^2 + ...`, with no trailing zeros. The zero polynomial
//! has no coefficients and therefore no degree.
//!
//! Polynomials are immutable values: every operation returns a new one.

use crate::error::{MathError, MathResult};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A univariate polynomial in the parameter `t` with exact rational coefficients.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Polynomial {
    /// Coefficients in increasing degree order.
    coeffs: Vec<BigRational>,
}

impl Polynomial {
    /// Create a polynomial from coefficients in increasing degree order.
    pub fn new(coeffs: Vec<BigRational>) -> Self {
        let mut poly = Self { coeffs };
        poly.normalize();
        poly
    }

    /// Create a polynomial from integer coefficients in increasing degree order.
    pub fn from_ints(coeffs: &[i64]) -> Self {
        Self::new(
            coeffs
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    /// The zero polynomial.
    #[inline]
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial 1.
    #[inline]
    pub fn one() -> Self {
        Self {
            coeffs: vec![BigRational::one()],
        }
    }

    /// A constant polynomial.
    pub fn constant(c: BigRational) -> Self {
        Self::new(vec![c])
    }

    /// The polynomial `t`.
    pub fn identity() -> Self {
        Self {
            coeffs: vec![BigRational::zero(), BigRational::one()],
        }
    }

    /// The monic linear factor `t - root`.
    pub fn linear_factor(root: &BigRational) -> Self {
        Self {
            coeffs: vec![-root, BigRational::one()],
        }
    }

    /// Remove trailing zeros.
    fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    /// Returns true if this is the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true if this polynomial is a constant (including zero).
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree of the polynomial, `None` for the zero polynomial.
    #[inline]
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Coefficients in increasing degree order (empty for zero).
    #[inline]
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Coefficient of `t^k`.
    pub fn coeff(&self, k: usize) -> BigRational {
        self.coeffs.get(k).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Leading coefficient, `None` for the zero polynomial.
    #[inline]
    pub fn leading_coeff(&self) -> Option<&BigRational> {
        self.coeffs.last()
    }

    /// Evaluate at a rational point (Horner's method).
    pub fn eval(&self, x: &BigRational) -> BigRational {
        let mut result = BigRational::zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Composition `self(inner(t))`.
    ///
    /// This is evaluation at a formal symbol: the result is again a
    /// polynomial in `t`.
    pub fn compose(&self, inner: &Polynomial) -> Polynomial {
        let mut result = Polynomial::zero();
        for coeff in self.coeffs.iter().rev() {
            result = &(&result * inner) + &Polynomial::constant(coeff.clone());
        }
        result
    }

    /// Negate.
    pub fn neg(&self) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    /// Add two polynomials.
    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|k| match (self.coeffs.get(k), other.coeffs.get(k)) {
                (Some(a), Some(b)) => a + b,
                (Some(a), None) => a.clone(),
                (None, Some(b)) => b.clone(),
                (None, None) => BigRational::zero(),
            })
            .collect();
        Polynomial::new(coeffs)
    }

    /// Subtract two polynomials.
    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|k| match (self.coeffs.get(k), other.coeffs.get(k)) {
                (Some(a), Some(b)) => a - b,
                (Some(a), None) => a.clone(),
                (None, Some(b)) => -b,
                (None, None) => BigRational::zero(),
            })
            .collect();
        Polynomial::new(coeffs)
    }

    /// Multiply by a scalar.
    pub fn scale(&self, c: &BigRational) -> Polynomial {
        if c.is_zero() {
            return Polynomial::zero();
        }
        Polynomial {
            coeffs: self.coeffs.iter().map(|a| a * c).collect(),
        }
    }

    /// Multiply two polynomials.
    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }

        let mut coeffs = vec![BigRational::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial::new(coeffs)
    }

    /// Raise to a non-negative integer power.
    pub fn pow(&self, mut k: u32) -> Polynomial {
        let mut result = Polynomial::one();
        let mut base = self.clone();
        while k > 0 {
            if k & 1 == 1 {
                result = &result * &base;
            }
            k >>= 1;
            if k > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Formal derivative: coefficient `i * a_i` shifted down one place.
    pub fn derivative(&self) -> Polynomial {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * BigRational::from_integer(BigInt::from(i)))
            .collect();
        Polynomial::new(coeffs)
    }

    /// The `n`-th formal derivative (`n = 0` returns a copy).
    pub fn nth_derivative(&self, n: usize) -> Polynomial {
        let mut result = self.clone();
        for _ in 0..n {
            if result.is_zero() {
                break;
            }
            result = result.derivative();
        }
        result
    }

    /// Euclidean division: returns `(q, r)` with `self = q * divisor + r`
    /// and `deg r < deg divisor`.
    pub fn div_rem(&self, divisor: &Polynomial) -> MathResult<(Polynomial, Polynomial)> {
        let Some(divisor_deg) = divisor.degree() else {
            return Err(MathError::DivisionByZero(
                "polynomial division by the zero polynomial",
            ));
        };
        let divisor_lead = &divisor.coeffs[divisor_deg];

        if self.coeffs.len() <= divisor_deg {
            return Ok((Polynomial::zero(), self.clone()));
        }

        let mut rem = self.coeffs.clone();
        let mut quot = vec![BigRational::zero(); rem.len() - divisor_deg];

        for k in (0..quot.len()).rev() {
            let factor = &rem[k + divisor_deg] / divisor_lead;
            if factor.is_zero() {
                continue;
            }
            for (i, d) in divisor.coeffs.iter().enumerate() {
                rem[k + i] -= &factor * d;
            }
            quot[k] = factor;
        }

        rem.truncate(divisor_deg);
        Ok((Polynomial::new(quot), Polynomial::new(rem)))
    }

    /// Polynomial remainder `self mod divisor`.
    pub fn rem(&self, divisor: &Polynomial) -> MathResult<Polynomial> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Taylor coefficients at `at`: `p^(k)(at) / k!` for `k = 0..=deg`.
    ///
    /// Empty for the zero polynomial.
    pub fn taylor_coefficients(&self, at: &BigRational) -> Vec<BigRational> {
        let mut out = Vec::with_capacity(self.coeffs.len());
        let mut current = self.clone();
        let mut fact = BigInt::one();
        for k in 0..self.coeffs.len() {
            if k > 0 {
                fact *= BigInt::from(k);
                current = current.derivative();
            }
            out.push(current.eval(at) / BigRational::from_integer(fact.clone()));
        }
        out
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (k, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let abs = c.abs();
            if first {
                if c.is_negative() {
                    write!(f, "-")?;
                }
            } else if c.is_negative() {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            first = false;

            match k {
                0 => write!(f, "{}", abs)?,
                _ if abs.is_one() => {}
                _ => write!(f, "{}*", abs)?,
            }
            match k {
                0 => {}
                1 => write!(f, "t")?,
                _ => write!(f, "t^{}", k)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::neg(&self)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::neg(self)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        Polynomial::add(&self, &rhs)
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        Polynomial::add(self, rhs)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        Polynomial::sub(&self, &rhs)
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Self::Output {
        Polynomial::sub(self, rhs)
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        Polynomial::mul(&self, &rhs)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Self::Output {
        Polynomial::mul(self, rhs)
    }
}
