//! Output formatting and display utilities for OxiCurve CLI

use owo_colors::{OwoColorize, Stream};
use oxicurve_math::Polynomial;
use serde::Serialize;
use std::fmt::Write;

use crate::{Args, OutputFormat};

/// A polynomial as printed: rendered text plus exact coefficients
#[derive(Debug, Clone, Serialize)]
pub struct PolynomialReport {
    /// Rendering in the parameter `t`
    pub text: String,
    /// Degree, absent for the zero polynomial
    pub degree: Option<usize>,
    /// Coefficients in increasing degree, as exact rational strings
    pub coefficients: Vec<String>,
}

impl From<&Polynomial> for PolynomialReport {
    fn from(p: &Polynomial) -> Self {
        Self {
            text: p.to_string(),
            degree: p.degree(),
            coefficients: p.coeffs().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Result of the `interpolate` command
#[derive(Debug, Clone, Serialize)]
pub struct InterpolationReport {
    /// Number of nodes read
    pub nodes: usize,
    /// Number of value and derivative constraints
    pub constraints: usize,
    /// The interpolating polynomial
    pub polynomial: PolynomialReport,
}

/// A curve composed with a reparametrization
#[derive(Debug, Clone, Serialize)]
pub struct ReparametrizedReport {
    /// The reparametrization `r(t)`
    pub r: PolynomialReport,
    /// `x(r(t))`
    pub x: PolynomialReport,
    /// `y(r(t))`
    pub y: PolynomialReport,
}

/// Result of the `curve` command for one curve
#[derive(Debug, Clone, Serialize)]
pub struct CurveReport {
    /// Curve name
    pub name: String,
    /// `x(t)`
    pub x: PolynomialReport,
    /// `y(t)`
    pub y: PolynomialReport,
    /// Composition with `--reparametrize`, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reparametrized: Option<ReparametrizedReport>,
}

/// Result of the `roots` command
#[derive(Debug, Clone, Serialize)]
pub struct RootsReport {
    /// The polynomial examined
    pub polynomial: PolynomialReport,
    /// Lower bound
    pub from: String,
    /// Upper bound
    pub to: String,
    /// Length of the Sturm chain
    pub chain_length: usize,
    /// Distinct real roots in `(from, to)`
    pub count: usize,
}

/// Crossing counts of one curve against one target
#[derive(Debug, Clone, Serialize)]
pub struct TargetCrossings {
    /// `line` or `polygonN`
    pub target: String,
    /// Tested lines, one per polygon edge
    pub lines: Vec<String>,
    /// Crossings per line
    pub counts: Vec<usize>,
    /// Sum of `counts`
    pub total: usize,
}

/// Result of the `crossings` command for one curve
#[derive(Debug, Clone, Serialize)]
pub struct CrossingsReport {
    /// Curve name
    pub curve: String,
    /// Counts per target
    pub targets: Vec<TargetCrossings>,
}

/// Any command result
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// `interpolate`
    Interpolation(InterpolationReport),
    /// `curve`
    Curves(Vec<CurveReport>),
    /// `roots`
    Roots(RootsReport),
    /// `crossings`
    Crossings(Vec<CrossingsReport>),
}

/// Print a report in the selected format
pub fn print_report(args: &Args, report: &Report) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print!("{}", render_text(report, !args.no_color)),
    }
    Ok(())
}

fn label(text: &str, color: bool) -> String {
    if color {
        text.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    } else {
        text.to_string()
    }
}

fn count(n: usize, color: bool) -> String {
    if color {
        n.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    } else {
        n.to_string()
    }
}

/// Render a report as human-readable text
pub fn render_text(report: &Report, color: bool) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    match report {
        Report::Interpolation(r) => {
            let _ = writeln!(out, "{} = {}", label("H(t)", color), r.polynomial.text);
            let _ = writeln!(out, "{} nodes, {} constraints", r.nodes, r.constraints);
        }
        Report::Curves(curves) => {
            for c in curves {
                let _ = writeln!(out, "{}:", label(&c.name, color));
                let _ = writeln!(out, "  x(t) = {}", c.x.text);
                let _ = writeln!(out, "  y(t) = {}", c.y.text);
                if let Some(rep) = &c.reparametrized {
                    let _ = writeln!(out, "  r(t) = {}", rep.r.text);
                    let _ = writeln!(out, "  x(r(t)) = {}", rep.x.text);
                    let _ = writeln!(out, "  y(r(t)) = {}", rep.y.text);
                }
            }
        }
        Report::Roots(r) => {
            let _ = writeln!(
                out,
                "{} in ({}, {}): {}",
                label("roots", color),
                r.from,
                r.to,
                count(r.count, color)
            );
        }
        Report::Crossings(curves) => {
            for c in curves {
                let _ = writeln!(out, "{}:", label(&c.curve, color));
                for t in &c.targets {
                    if let ([line], [n]) = (t.lines.as_slice(), t.counts.as_slice()) {
                        let _ = writeln!(out, "  {}: {}", line, count(*n, color));
                        continue;
                    }
                    let _ = writeln!(out, "  {}: total {}", t.target, count(t.total, color));
                    for (line, n) in t.lines.iter().zip(&t.counts) {
                        let _ = writeln!(out, "    {}: {}", line, count(*n, color));
                    }
                }
            }
        }
    }
    out
}

/// Print an error message in red to stderr
pub(crate) fn eprintln_colored(args: &Args, text: &str) {
    if args.no_color {
        eprintln!("{}", text);
    } else {
        eprintln!("{}", text.if_supports_color(Stream::Stderr, |t| t.red()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynomial_report() {
        let p = Polynomial::from_ints(&[1, -1, 0, 2]);
        let report = PolynomialReport::from(&p);
        assert_eq!(report.text, "2*t^3 - t + 1");
        assert_eq!(report.degree, Some(3));
        assert_eq!(report.coefficients, vec!["1", "-1", "0", "2"]);
    }

    #[test]
    fn test_render_roots_plain() {
        let report = Report::Roots(RootsReport {
            polynomial: PolynomialReport::from(&Polynomial::from_ints(&[-6, 11, -6, 1])),
            from: "0".to_string(),
            to: "10".to_string(),
            chain_length: 4,
            count: 3,
        });
        assert_eq!(render_text(&report, false), "roots in (0, 10): 3\n");
    }

    #[test]
    fn test_render_polygon_crossings() {
        let report = Report::Crossings(vec![CrossingsReport {
            curve: "c".to_string(),
            targets: vec![TargetCrossings {
                target: "polygon0".to_string(),
                lines: vec!["l0".to_string(), "l1".to_string()],
                counts: vec![1, 2],
                total: 3,
            }],
        }]);
        let text = render_text(&report, false);
        assert!(text.contains("polygon0: total 3"));
        assert!(text.contains("    l1: 2"));
    }

    #[test]
    fn test_json_is_untagged() {
        let report = Report::Roots(RootsReport {
            polynomial: PolynomialReport::from(&Polynomial::identity()),
            from: "-1".to_string(),
            to: "1".to_string(),
            chain_length: 2,
            count: 1,
        });
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["polynomial"]["coefficients"][1], "1");
    }
}
