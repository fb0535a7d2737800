//! Subcommand execution

use anyhow::{Context, bail};
use num_rational::BigRational;
use oxicurve_math::{Curve, Line, Node, Polynomial, SturmSequence, interpolate};
use std::path::Path;
use tracing::{debug, info, trace};

use crate::format::{
    CrossingsReport, CurveReport, InterpolationReport, PolynomialReport, Report,
    ReparametrizedReport, RootsReport, TargetCrossings, print_report,
};
use crate::loader::{
    load_curves, load_nodes, load_polygons, parse_line, parse_line_through, parse_rational,
    parse_rational_list, save_curves,
};
use crate::{Args, Command};

/// Run the selected subcommand and print its report
pub fn run(args: &Args) -> anyhow::Result<()> {
    let report = match &args.command {
        Command::Interpolate { input } => run_interpolate(input)?,
        Command::Curve {
            input,
            name,
            reparametrize,
            save,
        } => run_curve(
            input,
            name.as_deref(),
            reparametrize.as_deref(),
            save.as_deref(),
        )?,
        Command::Roots { coeffs, from, to } => run_roots(coeffs, from, to)?,
        Command::Crossings {
            input,
            from,
            to,
            line,
            through,
            polygons,
        } => {
            let targets =
                crossing_targets(line.as_deref(), through.as_deref(), polygons.as_deref())?;
            run_crossings(input, from, to, &targets)?
        }
    };
    print_report(args, &report)
}

fn parse_bound(text: &str, what: &str) -> anyhow::Result<BigRational> {
    parse_rational(text).with_context(|| format!("invalid {} bound", what))
}

fn parse_polynomial(text: &str) -> anyhow::Result<Polynomial> {
    let coeffs = parse_rational_list(text).context("invalid polynomial coefficients")?;
    Ok(Polynomial::new(coeffs))
}

fn run_interpolate(input: &Path) -> anyhow::Result<Report> {
    let nodes = load_nodes(input)
        .with_context(|| format!("failed to load node file {}", input.display()))?;
    let constraints: usize = nodes.iter().map(Node::constraint_count).sum();
    info!(file = %input.display(), nodes = nodes.len(), constraints, "loaded node file");

    let poly = interpolate(&nodes).context("interpolation failed")?;
    debug!(degree = ?poly.degree(), "interpolated");
    trace!(polynomial = %poly);

    Ok(Report::Interpolation(InterpolationReport {
        nodes: nodes.len(),
        constraints,
        polynomial: PolynomialReport::from(&poly),
    }))
}

/// Interpolate a curve unless it was loaded with its polynomials.
fn ensure_interpolated(name: &str, curve: &mut Curve) -> anyhow::Result<()> {
    if curve.is_interpolated() {
        debug!(curve = %name, "using stored polynomials");
        return Ok(());
    }
    curve
        .interpolate()
        .with_context(|| format!("failed to interpolate curve '{}'", name))?;
    Ok(())
}

fn run_curve(
    input: &Path,
    name: Option<&str>,
    reparametrize: Option<&str>,
    save: Option<&Path>,
) -> anyhow::Result<Report> {
    let mut curves = load_curves(input)
        .with_context(|| format!("failed to load curve file {}", input.display()))?;
    info!(file = %input.display(), curves = curves.len(), "loaded curve file");

    if let Some(wanted) = name {
        curves.retain(|(n, _)| n == wanted);
        if curves.is_empty() {
            bail!("no curve named '{}' in {}", wanted, input.display());
        }
    }
    let r = reparametrize.map(parse_polynomial).transpose()?;

    for (curve_name, curve) in &mut curves {
        ensure_interpolated(curve_name, curve)?;
    }

    if let Some(path) = save {
        save_curves(path, &curves)
            .with_context(|| format!("failed to write curve file {}", path.display()))?;
        info!(file = %path.display(), curves = curves.len(), "saved curve file");
    }

    let mut reports = Vec::with_capacity(curves.len());
    for (curve_name, curve) in &curves {
        let (x, y) = coordinate_polynomials(curve)?;
        debug!(
            curve = %curve_name,
            x_degree = ?x.degree(),
            y_degree = ?y.degree(),
            "interpolated curve"
        );
        trace!(curve = %curve_name, x = %x, y = %y);

        let reparametrized = match &r {
            Some(r) => {
                let (xr, yr) = curve.reparametrize(r)?;
                Some(ReparametrizedReport {
                    r: PolynomialReport::from(r),
                    x: PolynomialReport::from(&xr),
                    y: PolynomialReport::from(&yr),
                })
            }
            None => None,
        };

        reports.push(CurveReport {
            name: curve_name.clone(),
            x: PolynomialReport::from(x),
            y: PolynomialReport::from(y),
            reparametrized,
        });
    }

    Ok(Report::Curves(reports))
}

fn coordinate_polynomials(curve: &Curve) -> anyhow::Result<(&Polynomial, &Polynomial)> {
    match (curve.x_poly(), curve.y_poly()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => bail!("curve has not been interpolated"),
    }
}

fn run_roots(coeffs: &str, from: &str, to: &str) -> anyhow::Result<Report> {
    let poly = parse_polynomial(coeffs)?;
    let a = parse_bound(from, "lower")?;
    let b = parse_bound(to, "upper")?;
    info!(polynomial = %poly, from = %a, to = %b, "counting roots");

    let sturm = SturmSequence::new(&poly);
    debug!(chain_length = sturm.len(), "built Sturm chain");
    for (i, p) in sturm.chain().iter().enumerate() {
        trace!(index = i, polynomial = %p);
    }

    let count = sturm.count_roots(&a, &b).context("root counting failed")?;

    Ok(Report::Roots(RootsReport {
        polynomial: PolynomialReport::from(&poly),
        from: a.to_string(),
        to: b.to_string(),
        chain_length: sturm.len(),
        count,
    }))
}

/// A named set of lines to count crossings against
struct CrossingTarget {
    label: String,
    lines: Vec<Line>,
}

fn crossing_targets(
    line: Option<&str>,
    through: Option<&str>,
    polygons: Option<&Path>,
) -> anyhow::Result<Vec<CrossingTarget>> {
    let single = |line: Line| {
        vec![CrossingTarget {
            label: "line".to_string(),
            lines: vec![line],
        }]
    };

    match (line, through, polygons) {
        (Some(text), _, _) => Ok(single(parse_line(text).context("invalid --line")?)),
        (_, Some(text), _) => Ok(single(
            parse_line_through(text).context("invalid --through")?,
        )),
        (_, _, Some(path)) => {
            let polygons = load_polygons(path)
                .with_context(|| format!("failed to load polygon file {}", path.display()))?;
            info!(file = %path.display(), polygons = polygons.len(), "loaded polygon file");
            Ok(polygons
                .into_iter()
                .enumerate()
                .map(|(i, lines)| CrossingTarget {
                    label: format!("polygon{}", i),
                    lines,
                })
                .collect())
        }
        (None, None, None) => bail!("one of --line, --through or --polygons is required"),
    }
}

fn run_crossings(
    input: &Path,
    from: &str,
    to: &str,
    targets: &[CrossingTarget],
) -> anyhow::Result<Report> {
    let t0 = parse_bound(from, "lower")?;
    let t1 = parse_bound(to, "upper")?;
    let curves = load_curves(input)
        .with_context(|| format!("failed to load curve file {}", input.display()))?;
    info!(
        file = %input.display(),
        curves = curves.len(),
        targets = targets.len(),
        "loaded curve file"
    );

    let mut reports = Vec::with_capacity(curves.len());
    for (name, mut curve) in curves {
        ensure_interpolated(&name, &mut curve)?;

        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            let counts = curve
                .count_polygon_crossings(&target.lines, &t0, &t1)
                .with_context(|| format!("curve '{}' against {}", name, target.label))?;
            debug!(curve = %name, target = %target.label, ?counts, "counted crossings");

            results.push(TargetCrossings {
                target: target.label.clone(),
                lines: target.lines.iter().map(ToString::to_string).collect(),
                total: counts.iter().sum(),
                counts,
            });
        }

        reports.push(CrossingsReport {
            curve: name,
            targets: results,
        });
    }

    Ok(Report::Crossings(reports))
}
