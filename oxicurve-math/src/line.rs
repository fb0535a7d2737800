//! Lines in implicit form and polygon edges.

use crate::error::{MathError, MathResult};
use crate::polynomial::Polynomial;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// A point of the plane with exact coordinates.
pub type Point = (BigRational, BigRational);

/// The line `a*x + b*y + c = 0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    a: BigRational,
    b: BigRational,
    c: BigRational,
}

impl Line {
    /// Create a line from its implicit coefficients.
    ///
    /// Fails if `a` and `b` are both zero.
    pub fn new(a: BigRational, b: BigRational, c: BigRational) -> MathResult<Self> {
        if a.is_zero() && b.is_zero() {
            return Err(MathError::invalid_input(
                "line coefficients of x and y are both zero",
            ));
        }
        Ok(Self { a, b, c })
    }

    /// The line through two distinct points, in canonical form.
    ///
    /// Integer coefficients are divided by their gcd, then the sign is fixed
    /// so that the `y` coefficient is positive (or, for vertical lines, the
    /// `x` coefficient).
    pub fn through(p: &Point, q: &Point) -> MathResult<Self> {
        if p == q {
            return Err(MathError::invalid_input(format!(
                "a line needs two distinct points, got ({}, {}) twice",
                p.0, p.1
            )));
        }

        let a = &q.1 - &p.1;
        let b = &p.0 - &q.0;
        let c = &q.0 * &p.1 - &q.1 * &p.0;

        let mut line = Self { a, b, c };
        line.reduce_integer_gcd();
        line.fix_sign();
        Ok(line)
    }

    fn reduce_integer_gcd(&mut self) {
        if !(self.a.is_integer() && self.b.is_integer() && self.c.is_integer()) {
            return;
        }
        let d = self
            .a
            .numer()
            .gcd(self.b.numer())
            .gcd(self.c.numer());
        if d > BigInt::one() {
            let d = BigRational::from_integer(d);
            self.a /= &d;
            self.b /= &d;
            self.c /= &d;
        }
    }

    fn fix_sign(&mut self) {
        if self.b.is_negative() || (self.b.is_zero() && self.a.is_negative()) {
            self.a = -&self.a;
            self.b = -&self.b;
            self.c = -&self.c;
        }
    }

    /// Coefficient of `x`.
    #[inline]
    pub fn a(&self) -> &BigRational {
        &self.a
    }

    /// Coefficient of `y`.
    #[inline]
    pub fn b(&self) -> &BigRational {
        &self.b
    }

    /// Constant term.
    #[inline]
    pub fn c(&self) -> &BigRational {
        &self.c
    }

    /// Value of `a*x + b*y + c`; zero exactly on the line.
    pub fn eval(&self, x: &BigRational, y: &BigRational) -> BigRational {
        &self.a * x + &self.b * y + &self.c
    }

    /// True if the point lies on the line.
    pub fn contains(&self, p: &Point) -> bool {
        self.eval(&p.0, &p.1).is_zero()
    }

    /// `a*x(t) + b*y(t) + c` for a parametrized curve `(x(t), y(t))`.
    pub fn substitute(&self, x: &Polynomial, y: &Polynomial) -> Polynomial {
        let linear = &x.scale(&self.a) + &y.scale(&self.b);
        &linear + &Polynomial::constant(self.c.clone())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*x + {}*y + {} = 0", self.a, self.b, self.c)
    }
}

/// The edge lines of a closed polygon, one per consecutive vertex pair.
///
/// The closing edge from the last vertex back to the first is included; a
/// vertex list that already repeats its first vertex at the end is accepted
/// as well.
pub fn polygon_edges(vertices: &[Point]) -> MathResult<Vec<Line>> {
    let open = match vertices {
        [first, rest @ .., last] if !rest.is_empty() && first == last => {
            &vertices[..vertices.len() - 1]
        }
        _ => vertices,
    };

    if open.len() < 3 {
        return Err(MathError::invalid_input(format!(
            "a polygon needs at least three vertices, got {}",
            open.len()
        )));
    }

    open.iter()
        .zip(open.iter().cycle().skip(1))
        .map(|(p, q)| Line::through(p, q))
        .collect()
}
