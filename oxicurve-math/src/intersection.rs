//! Curve-line intersection counting.
//!
//! Substituting `x(t)` and `y(t)` into `a*x + b*y + c` gives a single
//! polynomial in `t` whose roots are exactly the parameters where the curve
//! meets the line; Sturm's theorem counts them.

use crate::error::MathResult;
use crate::line::Line;
use crate::polynomial::Polynomial;
use crate::sturm::count_roots;
use num_rational::BigRational;

/// Number of parameters `t` in `(t0, t1)` where `(x(t), y(t))` lies on `line`.
///
/// The curve must not meet the line at `t0` or `t1`.
pub fn count_intersections(
    x: &Polynomial,
    y: &Polynomial,
    line: &Line,
    t0: &BigRational,
    t1: &BigRational,
) -> MathResult<usize> {
    count_roots(&line.substitute(x, y), t0, t1)
}

/// One intersection count per polygon edge line.
pub fn count_polygon_crossings(
    x: &Polynomial,
    y: &Polynomial,
    edges: &[Line],
    t0: &BigRational,
    t1: &BigRational,
) -> MathResult<Vec<usize>> {
    edges
        .iter()
        .map(|edge| count_intersections(x, y, edge, t0, t1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use crate::line::polygon_edges;
    use crate::rational::{rat, ratio};

    #[test]
    fn test_parabola_crosses_horizontal_line() {
        // (t, t^2) against y = 1 meets at t = ±1
        let x = Polynomial::identity();
        let y = Polynomial::from_ints(&[0, 0, 1]);
        let line = Line::new(rat(0), rat(1), rat(-1)).expect("line");

        assert_eq!(count_intersections(&x, &y, &line, &rat(-2), &rat(2)), Ok(2));
        assert_eq!(count_intersections(&x, &y, &line, &rat(0), &rat(2)), Ok(1));
        assert_eq!(
            count_intersections(&x, &y, &line, &rat(1), &rat(2)),
            Err(MathError::EndpointIsRoot(rat(1)))
        );
    }

    #[test]
    fn test_tangent_line_counts_once() {
        // (t, t^2) against y = 0 touches at t = 0 only
        let x = Polynomial::identity();
        let y = Polynomial::from_ints(&[0, 0, 1]);
        let line = Line::new(rat(0), rat(1), rat(0)).expect("line");
        assert_eq!(count_intersections(&x, &y, &line, &rat(-1), &rat(1)), Ok(1));
    }

    #[test]
    fn test_polygon_crossings() {
        // the diagonal (t, t) through the unit square from t = -1/2 to 3/2
        let x = Polynomial::identity();
        let y = Polynomial::identity();
        let square = vec![
            (rat(0), rat(0)),
            (rat(1), rat(0)),
            (rat(1), rat(1)),
            (rat(0), rat(1)),
        ];
        let edges = polygon_edges(&square).expect("edges");

        let counts = count_polygon_crossings(&x, &y, &edges, &ratio(-1, 2), &ratio(3, 2))
            .expect("crossings");
        assert_eq!(counts, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_curve_on_line_is_rejected() {
        // the curve lies on the line, so every endpoint is a root
        let x = Polynomial::identity();
        let y = Polynomial::identity();
        let line = Line::new(rat(1), rat(-1), rat(0)).expect("line");
        assert!(matches!(
            count_intersections(&x, &y, &line, &rat(0), &rat(1)),
            Err(MathError::EndpointIsRoot(_))
        ));
    }
}
