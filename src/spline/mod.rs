//! Modified Akima (makima) spline interpolation.
//!
//! The spline is a chain of cubic segments. Knot derivatives are weighted
//! averages of neighbouring secant slopes, which keeps the curve from
//! overshooting on flat stretches. Outside the knots the curve continues as
//! a straight line.

mod grid;

pub use grid::GridInterpolator;

use crate::error::{PlotError, Result};

/// Cubic `a + b·dx + c·dx² + d·dx³` for one segment.
type Cubic = (f64, f64, f64, f64);

/// Piecewise-cubic interpolant through a set of knots.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    /// Knot positions, strictly increasing.
    x: Vec<f64>,
    /// One cubic per segment, `x.len() - 1` entries.
    coefficients: Vec<Cubic>,
}

impl Spline {
    /// Build a spline through `points`. Order does not matter.
    ///
    /// Needs at least two points with distinct, finite x values.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(PlotError::interpolation(format!(
                "need at least 2 points, got {}",
                points.len()
            )));
        }
        let mut points = points.to_vec();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(PlotError::interpolation("knots must be finite"));
        }
        if let Some(w) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(PlotError::interpolation(format!(
                "duplicate knot at x = {}",
                w[0].0
            )));
        }

        let secants: Vec<f64> = points
            .windows(2)
            .map(|w| (w[1].1 - w[0].1) / (w[1].0 - w[0].0))
            .collect();
        let x: Vec<f64> = points.iter().map(|p| p.0).collect();

        if secants.len() == 1 {
            return Ok(Self {
                x,
                coefficients: vec![(points[0].1, secants[0], 0.0, 0.0)],
            });
        }

        let m = extend_secants(&secants);
        let t: Vec<f64> = (0..points.len())
            .map(|i| knot_derivative(&m, i + 2))
            .collect();

        let coefficients = (0..points.len() - 1)
            .map(|i| {
                let h = x[i + 1] - x[i];
                let slope = m[i + 2];
                let a = points[i].1;
                let b = t[i];
                let c = (3.0 * slope - 2.0 * t[i] - t[i + 1]) / h;
                let d = (t[i] + t[i + 1] - 2.0 * slope) / (h * h);
                (a, b, c, d)
            })
            .collect();

        Ok(Self { x, coefficients })
    }

    /// Build a spline from separate x and y sequences of equal length.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PlotError::interpolation(format!(
                "{} x values but {} y values",
                x.len(),
                y.len()
            )));
        }
        let points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        Self::from_points(&points)
    }

    /// Knot positions.
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    /// Value at `pos`. Extrapolates linearly outside the knots.
    pub fn sample(&self, pos: f64) -> f64 {
        let ((a, b, c, d), origin) = self.segment(pos);
        let dx = pos - origin;
        a + b * dx + c * dx * dx + d * dx * dx * dx
    }

    /// First derivative at `pos`.
    pub fn derivative_1(&self, pos: f64) -> f64 {
        let ((_, b, c, d), origin) = self.segment(pos);
        let dx = pos - origin;
        b + 2.0 * c * dx + 3.0 * d * dx * dx
    }

    /// Second derivative at `pos`. Not continuous across knots.
    pub fn derivative_2(&self, pos: f64) -> f64 {
        let ((_, _, c, d), origin) = self.segment(pos);
        2.0 * c + 6.0 * d * (pos - origin)
    }

    /// Third derivative at `pos`. Piecewise constant.
    pub fn derivative_3(&self, pos: f64) -> f64 {
        let ((_, _, _, d), _) = self.segment(pos);
        6.0 * d
    }

    /// Cubic to evaluate at `pos` and the x it is expanded around.
    ///
    /// NaN falls to the first segment, so every evaluation returns NaN.
    fn segment(&self, pos: f64) -> (Cubic, f64) {
        let first = self.x[0];
        if pos.is_nan() {
            return (self.coefficients[0], first);
        }
        let last = self.x[self.x.len() - 1];

        if pos <= first {
            let (a, b, _, _) = self.coefficients[0];
            return ((a, b, 0.0, 0.0), first);
        }
        if pos >= last {
            let (a, b, c, d) = self.coefficients[self.coefficients.len() - 1];
            let h = last - self.x[self.x.len() - 2];
            let end_value = a + b * h + c * h * h + d * h * h * h;
            let end_slope = b + 2.0 * c * h + 3.0 * d * h * h;
            return ((end_value, end_slope, 0.0, 0.0), last);
        }

        // x[lower] < pos <= x[lower + 1]
        let lower = self.x.partition_point(|&k| k < pos) - 1;
        (self.coefficients[lower], self.x[lower])
    }
}

/// Pad the secant slopes with two linearly extrapolated slopes at each end.
fn extend_secants(secants: &[f64]) -> Vec<f64> {
    let n = secants.len();
    let head_1 = 2.0 * secants[0] - secants[1];
    let head_0 = 2.0 * head_1 - secants[0];
    let tail_1 = 2.0 * secants[n - 1] - secants[n - 2];
    let tail_2 = 2.0 * tail_1 - secants[n - 1];

    let mut m = Vec::with_capacity(n + 4);
    m.push(head_0);
    m.push(head_1);
    m.extend_from_slice(secants);
    m.push(tail_1);
    m.push(tail_2);
    m
}

/// Makima derivative at the knot whose left secant is `m[j - 1]`.
fn knot_derivative(m: &[f64], j: usize) -> f64 {
    let w1 = (m[j + 1] - m[j]).abs() + (m[j + 1] + m[j]).abs() / 2.0;
    let w2 = (m[j - 1] - m[j - 2]).abs() + (m[j - 1] + m[j - 2]).abs() / 2.0;
    let numerator = w1 * m[j - 1] + w2 * m[j];
    if numerator == 0.0 {
        0.0
    } else {
        numerator / (w1 + w2)
    }
}
