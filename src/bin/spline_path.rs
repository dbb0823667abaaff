//! Prints the waypoints of one path segment.
//!
//! ```text
//! spline-path --current 5,7,13 --goal 1,9,0 --next 15,2,11 --order 2 --samples 30
//! spline-path --current 0.1,-0.475,0.425 --goal 0.3,-0.475,0.425 \
//!     --next 0.3,-0.475,0.525 --config robot.yaml --format json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::info;

use spline_path::{ControlPointSet, CurveConfig, CurveGenerator, CurveMode, MotionProfile, PathOptions};

#[derive(Debug, Parser)]
#[command(name = "spline-path", about = "Generate a smooth path through three control points")]
struct Args {
    /// Current end-effector position, `x,y,z`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    current: [f64; 3],

    /// Point the path bends toward, `x,y,z`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    goal: [f64; 3],

    /// Point after the goal, `x,y,z`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    next: [f64; 3],

    /// Number of waypoints; estimated from velocity and frequency when omitted.
    #[arg(long)]
    samples: Option<usize>,

    #[arg(long, value_enum, default_value_t = Mode::Bezier)]
    mode: Mode,

    /// Controller update rate (overrides the config file).
    #[arg(long)]
    frequency: Option<f64>,

    /// Travel speed (overrides the config file).
    #[arg(long)]
    velocity: Option<f64>,

    /// Spline order (overrides the config file).
    #[arg(long)]
    order: Option<usize>,

    /// Spline smoothness (overrides the config file).
    #[arg(long)]
    smoothness: Option<f64>,

    /// Maximum number of spline knots (overrides the config file).
    #[arg(long)]
    knot_estimate: Option<usize>,

    /// YAML file with `curve` and `motion` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Bezier,
    Spline,
}

impl From<Mode> for CurveMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Bezier => CurveMode::Bezier,
            Mode::Spline => CurveMode::Spline,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Contents of the `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    curve: CurveConfig,
    motion: MotionProfile,
}

impl Settings {
    fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(settings)
    }
}

fn parse_point(s: &str) -> Result<[f64; 3]> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid coordinate in `{s}`"))?;
    let [x, y, z] = coords.as_slice() else {
        bail!("expected three comma-separated coordinates, got `{s}`");
    };
    Ok([*x, *y, *z])
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for this crate.
    // Override with RUST_LOG (e.g. RUST_LOG=spline_path=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("spline_path=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(order) = args.order {
        settings.curve.order = order;
    }
    if let Some(smoothness) = args.smoothness {
        settings.curve.smoothness = smoothness;
    }
    if args.knot_estimate.is_some() {
        settings.curve.knot_estimate = args.knot_estimate;
    }
    if let Some(frequency) = args.frequency {
        settings.motion.frequency = frequency;
    }
    if let Some(velocity) = args.velocity {
        settings.motion.velocity = velocity;
    }

    let generator = CurveGenerator::new(settings.curve)?;
    let points = ControlPointSet::from_triples(args.current, args.goal, args.next)?;
    let mut options = PathOptions::from(settings.motion).with_mode(args.mode.into());
    if let Some(n) = args.samples {
        options = options.with_sample_count(n);
    }

    let path = generator.get_path(&points, &options)?;
    info!(waypoints = path.len(), mode = ?options.mode, "generated path");

    match args.format {
        Format::Text => {
            for p in &path {
                println!("{} {} {}", p.x, p.y, p.z);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&path.to_triples())?),
    }
    Ok(())
}
