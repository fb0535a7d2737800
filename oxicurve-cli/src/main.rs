//! OxiCurve CLI - Command-line interface for exact Hermite curves

mod commands;
mod format;
mod loader;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use format::eprintln_colored;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CliConfig {
    /// Default verbosity level
    #[serde(default)]
    verbosity: Option<String>,
    /// Default output format
    #[serde(default)]
    format: Option<String>,
    /// Enable colors by default
    #[serde(default)]
    color: Option<bool>,
}

impl CliConfig {
    /// Load configuration from an explicit file
    fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Load configuration from the default locations, if any
    fn load() -> Self {
        let config_path = dirs::home_dir()
            .map(|mut p| {
                p.push(".oxicurverc");
                p
            })
            .filter(|p| p.exists())
            .or_else(|| {
                dirs::config_dir().map(|mut p| {
                    p.push("oxicurve");
                    p.push("config.yaml");
                    p
                })
            });

        if let Some(path) = config_path
            && path.exists()
            && let Ok(contents) = fs::read_to_string(&path)
            && let Ok(config) = serde_yaml::from_str(&contents)
        {
            return config;
        }

        Self::default()
    }

    /// Merge configuration with command-line arguments
    fn merge_with_args(&self, args: &mut Args) {
        // Only apply config if arg is not explicitly set
        if args.verbosity == Verbosity::Normal
            && let Some(ref v) = self.verbosity
        {
            match v.as_str() {
                "quiet" => args.verbosity = Verbosity::Quiet,
                "verbose" => args.verbosity = Verbosity::Verbose,
                "debug" => args.verbosity = Verbosity::Debug,
                "trace" => args.verbosity = Verbosity::Trace,
                _ => {}
            }
        }

        if args.format == OutputFormat::Text
            && let Some(ref f) = self.format
            && f == "json"
        {
            args.format = OutputFormat::Json;
        }

        if let Some(color) = self.color
            && !color
        {
            args.no_color = true;
        }
    }
}

/// Output format for results
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    /// No output except results
    Quiet,
    /// Minimal output
    Normal,
    /// Detailed output
    Verbose,
    /// Debug output
    Debug,
    /// Trace output
    Trace,
}

/// OxiCurve - exact Hermite interpolation and crossing counts
#[derive(Parser, Debug, Clone)]
#[command(name = "oxicurve")]
#[command(author = "COOLJAPAN OU (Team KitaSan)")]
#[command(version)]
#[command(about = "Exact Hermite interpolation, Sturm root counting and curve-line crossings")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value = "normal", global = true)]
    verbosity: Verbosity,

    /// Enable quiet mode (equivalent to --verbosity quiet)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: ~/.oxicurverc or <config dir>/oxicurve/config.yaml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Interpolate the 1-D nodes of a node file and print the polynomial
    Interpolate {
        /// Node file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Interpolate the curves of a curve file and print x(t), y(t)
    ///
    /// Curves stored with x_poly/y_poly are not interpolated again.
    Curve {
        /// Curve file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only this curve
        #[arg(long)]
        name: Option<String>,

        /// Also print the curve composed with the polynomial r(t), given by
        /// its coefficients "c0,c1,..." in increasing degree
        #[arg(long, value_name = "COEFFS")]
        reparametrize: Option<String>,

        /// Write the interpolated curves, polynomials included, to this file
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Count the distinct real roots of a polynomial in an open interval
    Roots {
        /// Coefficients "c0,c1,..." in increasing degree
        #[arg(long, allow_hyphen_values = true)]
        coeffs: String,

        /// Lower bound (exclusive)
        #[arg(long, allow_hyphen_values = true)]
        from: String,

        /// Upper bound (exclusive)
        #[arg(long, allow_hyphen_values = true)]
        to: String,
    },

    /// Count crossings of each curve with lines or polygon edges
    #[command(group(ArgGroup::new("target").required(true)))]
    Crossings {
        /// Curve file (JSON)
        #[arg(value_name = "CURVES")]
        input: PathBuf,

        /// Lower parameter bound (exclusive)
        #[arg(long, allow_hyphen_values = true)]
        from: String,

        /// Upper parameter bound (exclusive)
        #[arg(long, allow_hyphen_values = true)]
        to: String,

        /// Line "a,b,c" meaning a*x + b*y + c = 0
        #[arg(long, allow_hyphen_values = true, group = "target")]
        line: Option<String>,

        /// Line through two points "x1,y1,x2,y2"
        #[arg(long, allow_hyphen_values = true, group = "target")]
        through: Option<String>,

        /// Polygon file (JSON); every edge line is tested
        #[arg(long, value_name = "FILE", group = "target")]
        polygons: Option<PathBuf>,
    },
}

fn main() {
    let mut args = Args::parse();

    // Load configuration file and merge with args
    let config = match &args.config {
        Some(path) => match CliConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln_colored(&args, &format!("Error: {:#}", e));
                std::process::exit(1);
            }
        },
        None => CliConfig::load(),
    };
    config.merge_with_args(&mut args);

    // Determine verbosity level
    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else {
        args.verbosity
    };

    // Set up logging
    if verbosity >= Verbosity::Verbose {
        let level = match verbosity {
            Verbosity::Trace => Level::TRACE,
            Verbosity::Debug => Level::DEBUG,
            _ => Level::INFO,
        };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln_colored(&args, &format!("Failed to set tracing subscriber: {}", e));
            std::process::exit(1);
        }
    }

    if let Err(e) = commands::run(&args) {
        eprintln_colored(&args, &format!("Error: {:#}", e));
        std::process::exit(1);
    }
}
