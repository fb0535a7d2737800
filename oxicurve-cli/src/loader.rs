//! Node, curve and polygon file loading
//!
//! Every file is JSON. Rationals may be written as strings (`"2/3"`, `"-4"`,
//! `"1.25"`) or as plain JSON numbers; both are converted exactly. JSON
//! numbers are read from their literal text, never through `f64`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use oxicurve_math::{Curve, CurveNode, Line, MathError, Node, Polynomial, polygon_edges};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error type for input loading
#[derive(Error, Debug)]
pub enum LoadError {
    /// IO error when reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or unexpected file layout
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A rational literal that does not parse
    #[error("invalid rational literal '{0}'")]
    Rational(String),
    /// A value of the wrong shape (e.g. a line with two coefficients)
    #[error("invalid value: {0}")]
    Invalid(String),
    /// The loaded data was rejected by the math core
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// A rational as written in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RationalRepr {
    Text(String),
    Number(serde_json::Number),
}

impl RationalRepr {
    fn parse(&self) -> LoadResult<BigRational> {
        match self {
            Self::Text(s) => parse_rational(s),
            Self::Number(n) => parse_rational(&n.to_string()),
        }
    }
}

impl From<&BigRational> for RationalRepr {
    fn from(value: &BigRational) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct NodeFile {
    nodes: Vec<NodeRecord>,
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    time: RationalRepr,
    value: RationalRepr,
    #[serde(default)]
    derivatives: Vec<RationalRepr>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurveFile {
    curves: CurveCollection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum CurveCollection {
    Named(BTreeMap<String, CurveRecord>),
    List(Vec<CurveRecord>),
}

/// One curve; `x_poly`/`y_poly` hold previously interpolated coefficients
/// in increasing degree and are used instead of interpolating again.
#[derive(Debug, Serialize, Deserialize)]
struct CurveRecord {
    nodes: Vec<CurveNodeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x_poly: Option<Vec<RationalRepr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y_poly: Option<Vec<RationalRepr>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurveNodeRecord {
    time: RationalRepr,
    point: [RationalRepr; 2],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    derivatives: Vec<[RationalRepr; 2]>,
}

#[derive(Debug, Deserialize)]
struct PolygonFile {
    polygons: Vec<Vec<[RationalRepr; 2]>>,
}

/// Largest accepted decimal exponent, in absolute value.
pub const MAX_EXPONENT: u32 = 10_000;

/// Parse an exact rational: `a/b`, an integer, or a decimal with an optional
/// exponent (`1.25`, `-.5`, `3e-2`).
///
/// Exponents beyond [`MAX_EXPONENT`] are rejected.
pub fn parse_rational(text: &str) -> LoadResult<BigRational> {
    let s = text.trim();
    let invalid = || LoadError::Rational(text.to_string());

    if let Some((numer, denom)) = s.split_once('/') {
        let numer: BigInt = numer.trim().parse().map_err(|_| invalid())?;
        let denom: BigInt = denom.trim().parse().map_err(|_| invalid())?;
        if denom.is_zero() {
            return Err(invalid());
        }
        return Ok(BigRational::new(numer, denom));
    }

    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((m, e)) => {
            let exponent = e.parse::<i64>().map_err(|_| invalid())?;
            if exponent.unsigned_abs() > u64::from(MAX_EXPONENT) {
                return Err(invalid());
            }
            (m, exponent)
        }
        None => (s, 0),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let digits = match int_part {
        "" | "-" | "+" if frac_part.is_empty() => return Err(invalid()),
        "" | "-" | "+" => format!("{}0{}", int_part, frac_part),
        _ => format!("{}{}", int_part, frac_part),
    };
    let numer: BigInt = digits.parse().map_err(|_| invalid())?;

    let scale = exponent - i64::try_from(frac_part.len()).map_err(|_| invalid())?;
    let power = usize::try_from(scale.unsigned_abs()).map_err(|_| invalid())?;
    let factor = num_traits::pow(BigInt::from(10u32), power);
    Ok(if scale >= 0 {
        BigRational::from_integer(numer * factor)
    } else {
        BigRational::new(numer, factor)
    })
}

/// Parse a comma-separated list of rationals, e.g. `"1, -2/3, 0.5"`.
pub fn parse_rational_list(text: &str) -> LoadResult<Vec<BigRational>> {
    text.split(',').map(parse_rational).collect()
}

/// Parse `"a,b,c"` into the line `a*x + b*y + c = 0`.
pub fn parse_line(text: &str) -> LoadResult<Line> {
    match parse_rational_list(text)?.as_slice() {
        [a, b, c] => Ok(Line::new(a.clone(), b.clone(), c.clone())?),
        other => Err(LoadError::Invalid(format!(
            "a line needs three coefficients a,b,c, got {}",
            other.len()
        ))),
    }
}

/// Parse `"x1,y1,x2,y2"` into the canonical line through both points.
pub fn parse_line_through(text: &str) -> LoadResult<Line> {
    match parse_rational_list(text)?.as_slice() {
        [x1, y1, x2, y2] => Ok(Line::through(
            &(x1.clone(), y1.clone()),
            &(x2.clone(), y2.clone()),
        )?),
        other => Err(LoadError::Invalid(format!(
            "two points need four coordinates x1,y1,x2,y2, got {}",
            other.len()
        ))),
    }
}

fn parse_pair(pair: &[RationalRepr; 2]) -> LoadResult<(BigRational, BigRational)> {
    Ok((pair[0].parse()?, pair[1].parse()?))
}

/// Parse the content of a node file.
pub fn parse_nodes(json: &str) -> LoadResult<Vec<Node>> {
    let file: NodeFile = serde_json::from_str(json)?;
    file.nodes
        .iter()
        .map(|record| {
            Ok(Node::new(
                record.time.parse()?,
                record.value.parse()?,
                record
                    .derivatives
                    .iter()
                    .map(RationalRepr::parse)
                    .collect::<LoadResult<_>>()?,
            ))
        })
        .collect()
}

fn parse_polynomial(coeffs: &[RationalRepr]) -> LoadResult<Polynomial> {
    Ok(Polynomial::new(
        coeffs
            .iter()
            .map(RationalRepr::parse)
            .collect::<LoadResult<_>>()?,
    ))
}

fn build_curve(record: &CurveRecord) -> LoadResult<Curve> {
    let nodes = record
        .nodes
        .iter()
        .map(|n| {
            Ok(CurveNode::new(
                n.time.parse()?,
                parse_pair(&n.point)?,
                n.derivatives
                    .iter()
                    .map(parse_pair)
                    .collect::<LoadResult<_>>()?,
            ))
        })
        .collect::<LoadResult<Vec<_>>>()?;

    match (&record.x_poly, &record.y_poly) {
        (None, None) => Ok(Curve::new(nodes)?),
        (Some(x), Some(y)) => Ok(Curve::with_polynomials(
            nodes,
            parse_polynomial(x)?,
            parse_polynomial(y)?,
        )?),
        _ => Err(LoadError::Invalid(
            "x_poly and y_poly must be given together".to_string(),
        )),
    }
}

fn pair_repr(pair: &(BigRational, BigRational)) -> [RationalRepr; 2] {
    [RationalRepr::from(&pair.0), RationalRepr::from(&pair.1)]
}

fn poly_repr(poly: &Polynomial) -> Vec<RationalRepr> {
    poly.coeffs().iter().map(RationalRepr::from).collect()
}

fn curve_record(curve: &Curve) -> CurveRecord {
    CurveRecord {
        nodes: curve
            .nodes()
            .iter()
            .map(|n| CurveNodeRecord {
                time: RationalRepr::from(&n.time),
                point: pair_repr(&n.point),
                derivatives: n.derivatives.iter().map(pair_repr).collect(),
            })
            .collect(),
        x_poly: curve.x_poly().map(poly_repr),
        y_poly: curve.y_poly().map(poly_repr),
    }
}

/// Parse the content of a curve file into named curves.
///
/// Curves given as a list are named `curve0`, `curve1`, ... in file order;
/// named curves come back sorted by name.
pub fn parse_curves(json: &str) -> LoadResult<Vec<(String, Curve)>> {
    let file: CurveFile = serde_json::from_str(json)?;
    match &file.curves {
        CurveCollection::Named(map) => map
            .iter()
            .map(|(name, record)| Ok((name.clone(), build_curve(record)?)))
            .collect(),
        CurveCollection::List(list) => list
            .iter()
            .enumerate()
            .map(|(i, record)| Ok((format!("curve{}", i), build_curve(record)?)))
            .collect(),
    }
}

/// Parse the content of a polygon file into one edge list per polygon.
pub fn parse_polygons(json: &str) -> LoadResult<Vec<Vec<Line>>> {
    let file: PolygonFile = serde_json::from_str(json)?;
    file.polygons
        .iter()
        .map(|vertices| {
            let points = vertices
                .iter()
                .map(parse_pair)
                .collect::<LoadResult<Vec<_>>>()?;
            Ok(polygon_edges(&points)?)
        })
        .collect()
}

/// Render named curves as a curve file.
///
/// Rationals are written as exact strings. Interpolated curves keep their
/// polynomials, so loading the file again does not interpolate.
pub fn curves_to_json(curves: &[(String, Curve)]) -> LoadResult<String> {
    let file = CurveFile {
        curves: CurveCollection::Named(
            curves
                .iter()
                .map(|(name, curve)| (name.clone(), curve_record(curve)))
                .collect(),
        ),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Write named curves to a curve file.
pub fn save_curves(path: &Path, curves: &[(String, Curve)]) -> LoadResult<()> {
    fs::write(path, curves_to_json(curves)?)?;
    Ok(())
}

/// Load a node file.
pub fn load_nodes(path: &Path) -> LoadResult<Vec<Node>> {
    parse_nodes(&fs::read_to_string(path)?)
}

/// Load a curve file.
pub fn load_curves(path: &Path) -> LoadResult<Vec<(String, Curve)>> {
    parse_curves(&fs::read_to_string(path)?)
}

/// Load a polygon file.
pub fn load_polygons(path: &Path) -> LoadResult<Vec<Vec<Line>>> {
    parse_polygons(&fs::read_to_string(path)?)
}
