//! Bicubic interpolation over a rectangular lattice.

use super::Spline;
use crate::error::{PlotError, Result};

/// Interpolates `f(x, y)` from samples on an `xs × ys` lattice.
///
/// Every lattice cell is a bicubic Hermite patch. The partial derivatives at
/// the nodes come from makima splines: `fx` from a spline along each lattice
/// row, `fy` from a spline along each lattice column. Cross derivatives are
/// zero. Outside the lattice the nearest edge patch is extended.
#[derive(Debug, Clone)]
pub struct GridInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    f: Vec<f64>,
    fx: Vec<f64>,
    fy: Vec<f64>,
}

impl GridInterpolator {
    /// `f` is row-major: `f[row * xs.len() + column]` is the value at
    /// `(xs[column], ys[row])`. Both axes must be strictly increasing.
    pub fn new(xs: &[f64], ys: &[f64], f: &[f64]) -> Result<Self> {
        if f.len() != xs.len() * ys.len() {
            return Err(PlotError::interpolation(format!(
                "lattice has {} values, expected {} x {} = {}",
                f.len(),
                xs.len(),
                ys.len(),
                xs.len() * ys.len()
            )));
        }
        for (axis, values) in [("x", xs), ("y", ys)] {
            if values.len() < 2 {
                return Err(PlotError::interpolation(format!(
                    "need at least 2 lattice {} values, got {}",
                    axis,
                    values.len()
                )));
            }
            if values.windows(2).any(|w| w[0] >= w[1]) {
                return Err(PlotError::interpolation(format!(
                    "lattice {} values must be strictly increasing",
                    axis
                )));
            }
        }

        let nx = xs.len();
        let row_splines = f
            .chunks(nx)
            .map(|row| Spline::from_xy(xs, row))
            .collect::<Result<Vec<_>>>()?;
        let column_splines = (0..nx)
            .map(|column| {
                let values: Vec<f64> = f.iter().skip(column).step_by(nx).copied().collect();
                Spline::from_xy(ys, &values)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut fx = Vec::with_capacity(f.len());
        let mut fy = Vec::with_capacity(f.len());
        for (row, &y) in ys.iter().enumerate() {
            for (column, &x) in xs.iter().enumerate() {
                fx.push(row_splines[row].derivative_1(x));
                fy.push(column_splines[column].derivative_1(y));
            }
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            f: f.to_vec(),
            fx,
            fy,
        })
    }

    /// Interpolated value at `(x, y)`. NaN coordinates give NaN.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let i = cell(&self.xs, x);
        let j = cell(&self.ys, y);
        let hx = self.xs[i + 1] - self.xs[i];
        let hy = self.ys[j + 1] - self.ys[j];
        let (u, v) = ((x - self.xs[i]) / hx, (y - self.ys[j]) / hy);

        let value_u = [h00(u), h01(u)];
        let slope_u = [h10(u) * hx, h11(u) * hx];
        let value_v = [h00(v), h01(v)];
        let slope_v = [h10(v) * hy, h11(v) * hy];

        let mut total = 0.0;
        for (dj, (wv, sv)) in value_v.iter().zip(slope_v.iter()).enumerate() {
            for (di, (wu, su)) in value_u.iter().zip(slope_u.iter()).enumerate() {
                let node = (j + dj) * self.xs.len() + i + di;
                total += self.f[node] * wu * wv
                    + self.fx[node] * su * wv
                    + self.fy[node] * wu * sv;
            }
        }
        total
    }
}

/// Index of the lattice cell holding `pos`, clamped to the edge cells.
fn cell(knots: &[f64], pos: f64) -> usize {
    knots
        .partition_point(|&k| k <= pos)
        .saturating_sub(1)
        .min(knots.len() - 2)
}

// Cubic Hermite basis on [0, 1].
fn h00(t: f64) -> f64 {
    (2.0 * t - 3.0) * t * t + 1.0
}

fn h01(t: f64) -> f64 {
    (3.0 - 2.0 * t) * t * t
}

fn h10(t: f64) -> f64 {
    ((t - 2.0) * t + 1.0) * t
}

fn h11(t: f64) -> f64 {
    (t - 1.0) * t * t
}
