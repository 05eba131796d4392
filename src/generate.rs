//! Sample file generation.
//!
//! Writes the space-delimited files the plot commands read: a makima curve
//! through each scenario's knots, or a 3-column surface sampled from a
//! small lattice.

use crate::error::{PlotError, Result};
use crate::overlay::Scenario;
use crate::spline::{GridInterpolator, Spline};
use crate::util::layout_config::{DataConfig, GenerateConfig};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const LATTICE_X: &[f64] = &[-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0];
const LATTICE_Y: &[f64] = &[0.0, 1.0];
const LATTICE_F: &[f64] = &[
    0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0,
];

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Two-column curve through a scenario's knots.
    Curve(Scenario),
    /// Three-column surface over the plateau lattice.
    Surface,
}

impl FromStr for Target {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" | "surface" => Ok(Target::Surface),
            other => other.parse().map(Target::Curve),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Curve(scenario) => write!(f, "{}", scenario),
            Target::Surface => f.write_str("manual"),
        }
    }
}

/// `(x, y)` samples of the scenario's spline over its sample range.
pub fn curve_samples(scenario: Scenario, step: f64) -> Result<Vec<(f64, f64)>> {
    let (x, y) = scenario.knots();
    let spline = Spline::from_xy(x, y)?;
    let (start, end) = scenario.sample_range();
    let steps = ((end - start) / step).round() as usize;
    Ok((0..steps)
        .map(|i| {
            let pos = i as f64 * step + start;
            (pos, spline.sample(pos))
        })
        .collect())
}

/// `[x, y, z]` samples, row-major with x varying fastest.
pub fn surface_samples(data: &DataConfig, config: &GenerateConfig) -> Result<Vec<[f64; 3]>> {
    let interp = GridInterpolator::new(LATTICE_X, LATTICE_Y, LATTICE_F)?;
    let mut samples = Vec::with_capacity(data.grid_columns * data.grid_rows);
    for yi in 0..data.grid_rows {
        let y = yi as f64 * config.surface_step + config.surface_y_start;
        for xi in 0..data.grid_columns {
            let x = xi as f64 * config.surface_step + config.surface_x_start;
            samples.push([x, y, interp.sample(x, y)]);
        }
    }
    Ok(samples)
}

/// Write `target`'s samples to `path`. Returns the number of rows written.
pub fn write_samples(
    target: Target,
    path: &Path,
    data: &DataConfig,
    config: &GenerateConfig,
) -> Result<usize> {
    let mut contents = String::new();
    let rows = match target {
        Target::Curve(scenario) => {
            let samples = curve_samples(scenario, config.curve_step)?;
            for (x, y) in &samples {
                contents.push_str(&format!("{} {}\n", x, y));
            }
            samples.len()
        },
        Target::Surface => {
            let samples = surface_samples(data, config)?;
            for [x, y, z] in &samples {
                contents.push_str(&format!("{} {} {}\n", x, y, z));
            }
            samples.len()
        },
    };

    std::fs::write(path, contents).map_err(|e| PlotError::file_open(path, e))?;
    info!("Wrote {} rows of {} samples to {}", rows, target, path.display());
    Ok(rows)
}
