//! Real root counting with Sturm sequences.
//!
//! For a polynomial `f` the chain is
//!
//! ```text
//! p_0 = f,  p_1 = f',  p_{i+1} = -rem(p_{i-1}, p_i)
//! ```
//!
//! and the number of distinct real roots of `f` in `(a, b)` is
//! `V(a) - V(b)`, where `V(x)` counts sign changes of the chain evaluated at
//! `x`. Evaluation is exact, so zeros are detected exactly.
//!
//! ## References
//!
//! - "Algorithms in Real Algebraic Geometry" (Basu, Pollack, Roy, 2006)

use crate::error::{MathError, MathResult};
use crate::polynomial::Polynomial;
use crate::rational::sign;
use num_rational::BigRational;

/// Number of sign changes in a sequence of rationals.
///
/// Zero entries are skipped without updating the last seen sign, leading
/// zeros included; a trailing run of zeros contributes nothing.
pub fn sign_changes(values: &[BigRational]) -> usize {
    let mut last_sign = 0i8;
    let mut changes = 0;

    for value in values {
        let s = sign(value);
        if s == 0 {
            continue;
        }
        if last_sign != 0 && s != last_sign {
            changes += 1;
        }
        last_sign = s;
    }

    changes
}

/// The Sturm chain of a polynomial.
///
/// The chain is a pure function of `f`, so one sequence can answer any
/// number of interval queries.
#[derive(Debug, Clone)]
pub struct SturmSequence {
    chain: Vec<Polynomial>,
}

impl SturmSequence {
    /// Build the chain of `f`.
    ///
    /// Stops when a remainder vanishes or after a nonzero constant has been
    /// appended.
    pub fn new(f: &Polynomial) -> Self {
        let mut chain = vec![f.clone()];

        let derivative = f.derivative();
        if derivative.is_zero() {
            return Self { chain };
        }
        chain.push(derivative);

        while let [.., prev, last] = chain.as_slice() {
            if last.is_constant() {
                break;
            }
            // `last` is not constant, so the division cannot fail
            let Ok(rem) = prev.rem(last) else {
                break;
            };
            if rem.is_zero() {
                break;
            }
            chain.push(-rem);
        }

        Self { chain }
    }

    /// The polynomials of the chain, `f` first.
    #[inline]
    pub fn chain(&self) -> &[Polynomial] {
        &self.chain
    }

    /// Number of polynomials in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false: the chain starts with `f`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The polynomial the chain was built for.
    #[inline]
    pub fn polynomial(&self) -> &Polynomial {
        &self.chain[0]
    }

    /// Every chain polynomial evaluated at `x`.
    pub fn evaluate(&self, x: &BigRational) -> Vec<BigRational> {
        self.chain.iter().map(|p| p.eval(x)).collect()
    }

    /// `V(x)`: sign changes of the chain at `x`.
    pub fn variations_at(&self, x: &BigRational) -> usize {
        sign_changes(&self.evaluate(x))
    }

    /// Number of distinct real roots of `f` in the open interval `(a, b)`.
    ///
    /// Fails with [`MathError::InvalidInterval`] if `a >= b` and with
    /// [`MathError::EndpointIsRoot`] if `f` vanishes at either bound.
    pub fn count_roots(&self, a: &BigRational, b: &BigRational) -> MathResult<usize> {
        if a >= b {
            return Err(MathError::InvalidInterval {
                lower: a.clone(),
                upper: b.clone(),
            });
        }

        let at_a = self.evaluate(a);
        let at_b = self.evaluate(b);
        if sign(&at_a[0]) == 0 {
            return Err(MathError::EndpointIsRoot(a.clone()));
        }
        if sign(&at_b[0]) == 0 {
            return Err(MathError::EndpointIsRoot(b.clone()));
        }

        Ok(sign_changes(&at_a).saturating_sub(sign_changes(&at_b)))
    }
}

/// Number of distinct real roots of `f` in the open interval `(a, b)`.
pub fn count_roots(f: &Polynomial, a: &BigRational, b: &BigRational) -> MathResult<usize> {
    SturmSequence::new(f).count_roots(a, b)
}
