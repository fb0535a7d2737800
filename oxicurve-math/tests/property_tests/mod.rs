//! Property-based tests for oxicurve-math
//!
//! This module contains property tests for:
//! - Hermite interpolation against its defining constraints
//! - Sturm root counting against polynomials with known roots
//! - Curve-line intersection counting

mod hermite_properties;
mod intersection_properties;
mod sturm_properties;
