//! Property-based tests for Hermite interpolation

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use oxicurve_math::{Node, Polynomial, ScalarCurve, interpolate, lagrange};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Helper to create rational
fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Strategy for small rationals
fn rational_strategy() -> impl Strategy<Value = BigRational> {
    (-20i64..20, 1i64..5).prop_map(|(n, d)| rat(n, d))
}

/// Strategy for nodes with distinct integer times and up to two derivatives each
fn nodes_strategy() -> impl Strategy<Value = Vec<Node>> {
    (
        prop::collection::btree_set(-8i64..8, 1..5),
        prop::collection::vec(
            (
                rational_strategy(),
                prop::collection::vec(rational_strategy(), 0..3),
            ),
            5,
        ),
    )
        .prop_map(|(times, data): (BTreeSet<i64>, _)| {
            times
                .into_iter()
                .zip(data)
                .map(|(t, (value, derivatives))| Node::new(rat(t, 1), value, derivatives))
                .collect::<Vec<_>>()
        })
}

/// Strategy for nodes without derivative constraints
fn plain_nodes_strategy() -> impl Strategy<Value = Vec<Node>> {
    nodes_strategy().prop_map(|nodes| {
        nodes
            .into_iter()
            .map(|n| Node::value_only(n.time, n.value))
            .collect::<Vec<_>>()
    })
}

fn constraint_total(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::constraint_count).sum()
}

#[cfg(test)]
mod constraint_properties {
    use super::*;

    proptest! {
        /// Every value and derivative constraint holds exactly
        #[test]
        fn interpolant_meets_constraints(nodes in nodes_strategy()) {
            let h = interpolate(&nodes).expect("interpolation failed");

            for node in &nodes {
                for k in 0..node.constraint_count() {
                    let expected = node.constraint(k).cloned().unwrap_or_else(BigRational::zero);
                    prop_assert_eq!(h.nth_derivative(k).eval(&node.time), expected);
                }
            }
        }

        /// Degree stays below the number of constraints
        #[test]
        fn interpolant_degree_bound(nodes in nodes_strategy()) {
            let h = interpolate(&nodes).expect("interpolation failed");
            let bound = constraint_total(&nodes) - 1;

            prop_assert!(h.degree().is_none_or(|d| d <= bound));
        }

        /// Node order does not change the interpolant
        #[test]
        fn interpolant_ignores_node_order(nodes in nodes_strategy()) {
            let mut reversed = nodes.clone();
            reversed.reverse();

            let a = interpolate(&nodes).expect("interpolation failed");
            let b = interpolate(&reversed).expect("interpolation failed");
            prop_assert_eq!(a, b);
        }
    }
}

#[cfg(test)]
mod classical_properties {
    use super::*;

    proptest! {
        /// Without derivatives Hermite and Lagrange coincide
        #[test]
        fn plain_nodes_match_lagrange(nodes in plain_nodes_strategy()) {
            let points: Vec<_> = nodes
                .iter()
                .map(|n| (n.time.clone(), n.value.clone()))
                .collect();

            let hermite = interpolate(&nodes).expect("interpolation failed");
            let classical = lagrange(&points).expect("lagrange failed");
            prop_assert_eq!(hermite, classical);
        }

        /// A single node yields its Taylor polynomial
        #[test]
        fn single_node_is_taylor(
            t in -5i64..5,
            value in rational_strategy(),
            derivatives in prop::collection::vec(rational_strategy(), 0..5)
        ) {
            let node = Node::new(rat(t, 1), value, derivatives);
            let h = interpolate(std::slice::from_ref(&node)).expect("interpolation failed");
            let taylor = h.taylor_coefficients(&node.time);

            let mut factorial = BigRational::from_integer(BigInt::from(1));
            for k in 0..node.constraint_count() {
                if k > 0 {
                    factorial *= rat(k as i64, 1);
                }
                let expected =
                    node.constraint(k).cloned().unwrap_or_else(BigRational::zero) / &factorial;
                let actual = taylor.get(k).cloned().unwrap_or_else(BigRational::zero);
                prop_assert_eq!(actual, expected);
            }
        }

        /// Interpolating samples of a polynomial recovers it
        #[test]
        fn samples_recover_polynomial(
            coeffs in prop::collection::vec(-10i64..10, 1..5),
            start in -5i64..5
        ) {
            let p = Polynomial::from_ints(&coeffs);
            let d = p.derivative();
            // two nodes with one derivative each pin down a cubic
            let nodes: Vec<Node> = (0..2)
                .map(|i| {
                    let t = rat(start + i, 1);
                    Node::new(t.clone(), p.eval(&t), vec![d.eval(&t)])
                })
                .collect();

            prop_assert_eq!(interpolate(&nodes).expect("interpolation failed"), p);
        }
    }
}

#[cfg(test)]
mod scalar_curve_properties {
    use super::*;

    proptest! {
        /// A scalar curve evaluates to its node values
        #[test]
        fn scalar_curve_passes_through_nodes(nodes in nodes_strategy()) {
            let mut curve = ScalarCurve::new(nodes.clone()).expect("nodes");
            curve.interpolate().expect("interpolation failed");

            for node in &nodes {
                prop_assert_eq!(curve.evaluate(&node.time).expect("evaluate"), node.value.clone());
            }
        }
    }
}
