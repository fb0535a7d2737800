//! OxiCurve Math - Exact Hermite Interpolation and Sturm Root Counting
//!
//! This crate provides the numeric core of OxiCurve:
//! - Dense univariate [`Polynomial`]s over arbitrary-precision rationals
//! - Hermite interpolation through confluent divided differences
//! - Sturm sequences counting distinct real roots in an open interval
//! - Curve-line intersection counting for parametrized plane curves
//!
//! Nothing is approximated: every coefficient, node and bound is a
//! [`num_rational::BigRational`].
//!
//! # Examples
//!
//! ## Interpolating with derivative constraints
//!
//! ```
//! use oxicurve_math::{Node, Polynomial, interpolate};
//!
//! // H(0) = 0, H'(0) = 1, H(1) = 1
//! let nodes = vec![Node::from_ints(0, 0, &[1]), Node::from_ints(1, 1, &[])];
//! let h = interpolate(&nodes).unwrap();
//! assert_eq!(h, Polynomial::from_ints(&[0, 1]));
//! ```
//!
//! ## Counting roots
//!
//! ```
//! use oxicurve_math::{Polynomial, count_roots};
//! use oxicurve_math::rational::rat;
//!
//! // (t - 1)(t - 2)(t - 3)
//! let f = Polynomial::from_ints(&[-6, 11, -6, 1]);
//! assert_eq!(count_roots(&f, &rat(0), &rat(10)), Ok(3));
//! ```
//!
//! ## Curves and lines
//!
//! ```
//! use oxicurve_math::{Curve, CurveNode, Line};
//! use oxicurve_math::rational::{rat, ratio};
//!
//! let mut curve = Curve::new(vec![
//!     CurveNode::from_ints(0, (0, 0), &[]),
//!     CurveNode::from_ints(1, (1, 2), &[]),
//!     CurveNode::from_ints(2, (2, 0), &[]),
//! ])
//! .unwrap();
//! curve.interpolate().unwrap();
//!
//! let line = Line::through(&(rat(0), rat(1)), &(rat(1), rat(1))).unwrap();
//! assert_eq!(curve.count_intersections(&line, &ratio(1, 10), &ratio(19, 10)), Ok(2));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod curve;
pub mod error;
pub mod interpolation;
pub mod intersection;
pub mod line;
pub mod polynomial;
pub mod rational;
pub mod sturm;

pub use curve::{Curve, ScalarCurve, TimedNode};
pub use error::{MathError, MathResult};
pub use interpolation::{
    ConfluentNodes, CurveNode, DividedDifferences, Node, interpolate, interpolate_curve,
    interpolate_maps, lagrange,
};
pub use intersection::{count_intersections, count_polygon_crossings};
pub use line::{Line, Point, polygon_edges};
pub use polynomial::Polynomial;
pub use rational::Rational;
pub use sturm::{SturmSequence, count_roots, sign_changes};
