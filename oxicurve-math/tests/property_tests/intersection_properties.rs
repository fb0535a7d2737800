//! Property-based tests for curve-line intersection counting

use num_bigint::BigInt;
use num_rational::BigRational;
use oxicurve_math::{Curve, CurveNode, Line, Polynomial, count_intersections, polygon_edges};
use proptest::prelude::*;

/// Helper to create rational
fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

#[cfg(test)]
mod line_properties {
    use super::*;

    proptest! {
        /// The line through two points contains both
        #[test]
        fn line_contains_its_points(
            x1 in -10i64..10, y1 in -10i64..10,
            x2 in -10i64..10, y2 in -10i64..10
        ) {
            prop_assume!((x1, y1) != (x2, y2));
            let p = (rat(x1, 1), rat(y1, 1));
            let q = (rat(x2, 1), rat(y2, 1));
            let line = Line::through(&p, &q).expect("line");

            prop_assert!(line.contains(&p));
            prop_assert!(line.contains(&q));
            prop_assert_eq!(line, Line::through(&q, &p).expect("line"));
        }
    }
}

#[cfg(test)]
mod crossing_properties {
    use super::*;

    proptest! {
        /// A straight segment crosses a transversal line at most once
        #[test]
        fn segment_crosses_at_most_once(
            x0 in -5i64..5, y0 in -5i64..5,
            dx in -5i64..5, dy in -5i64..5,
            c in -20i64..20
        ) {
            prop_assume!((dx, dy) != (0, 0));
            let x = Polynomial::from_ints(&[x0, dx]);
            let y = Polynomial::from_ints(&[y0, dy]);
            prop_assume!(c % 3 != 0);
            // x + 2y + c/3 = 0 misses every integer point
            let line = Line::new(rat(1, 1), rat(2, 1), rat(c, 3)).expect("line");

            let count = count_intersections(&x, &y, &line, &rat(0, 1), &rat(1, 1))
                .expect("count failed");
            prop_assert!(count <= 1);

            let start = line.eval(&rat(x0, 1), &rat(y0, 1));
            let end = line.eval(&rat(x0 + dx, 1), &rat(y0 + dy, 1));
            let crosses = (start < rat(0, 1)) != (end < rat(0, 1));
            prop_assert_eq!(count == 1, crosses);
        }

        /// Curve queries agree with counting on the coordinate polynomials
        #[test]
        fn curve_matches_free_function(
            ys in prop::collection::vec(-4i64..4, 3),
            level in -4i64..4
        ) {
            let nodes: Vec<CurveNode> = ys
                .iter()
                .enumerate()
                .map(|(i, &y)| CurveNode::from_ints(i as i64, (i as i64, y), &[]))
                .collect();
            let mut curve = Curve::new(nodes).expect("curve");
            curve.interpolate().expect("interpolation failed");

            // horizontal line at a half-integer height avoids the integer nodes
            let line = Line::new(rat(0, 1), rat(2, 1), rat(-(2 * level + 1), 1)).expect("line");
            let (t0, t1) = (rat(-1, 2), rat(5, 2));

            let via_curve = curve.count_intersections(&line, &t0, &t1);
            let x = curve.x_poly().expect("x").clone();
            let y = curve.y_poly().expect("y").clone();
            prop_assert_eq!(via_curve, count_intersections(&x, &y, &line, &t0, &t1));
        }

        /// A polygon always has one edge line per vertex
        #[test]
        fn polygon_edge_count(n in 3usize..8) {
            // vertices on the parabola y = x^2 are never collinear
            let vertices: Vec<_> = (0..n as i64).map(|i| (rat(i, 1), rat(i * i, 1))).collect();
            let edges = polygon_edges(&vertices).expect("edges");
            prop_assert_eq!(edges.len(), n);
        }
    }
}
