//! Literal reference datasets drawn over loaded data.
//!
//! Each [`Scenario`] names one set of knots. The 2D plot picks the scenario
//! from the input file name, and the sample generator interpolates the same
//! knots, so the markers land on the plotted curve.

use crate::chart::{Series, SeriesStyle};
use crate::error::{PlotError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Known overlay datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Irregularly spaced knots with flat stretches and bumps.
    General,
    /// A smoothed step from -1 to 1.
    Step,
    /// Two points; the spline is a straight line.
    Line,
    /// Three points.
    Basic,
}

const GENERAL_X: &[f64] = &[1.0, 2.0, 3.0, 4.0, 5.0, 5.5, 7.0, 8.0, 9.0, 9.5, 10.0];
const GENERAL_Y: &[f64] = &[0.0, 0.0, 0.0, 0.5, 0.4, 1.2, 1.2, 0.1, 0.0, 0.3, 0.6];
const STEP_X: &[f64] = &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
const STEP_Y: &[f64] = &[-1.0, -1.0, -1.0, 0.0, 1.0, 1.0, 1.0, 1.0];
const LINE_X: &[f64] = &[1.0, 2.0];
const LINE_Y: &[f64] = &[-1.0, -2.0];
const BASIC_X: &[f64] = &[1.0, 2.0, 3.0];
const BASIC_Y: &[f64] = &[3.0, 5.0, 2.0];

impl Scenario {
    /// Every scenario, in lookup order.
    pub const ALL: [Scenario; 4] = [
        Scenario::General,
        Scenario::Step,
        Scenario::Line,
        Scenario::Basic,
    ];

    /// Identifier, also the expected sample file name.
    pub fn name(self) -> &'static str {
        match self {
            Scenario::General => "general",
            Scenario::Step => "step",
            Scenario::Line => "line",
            Scenario::Basic => "basic",
        }
    }

    /// Pick the scenario from the final component of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        name.parse()
    }

    /// Knot coordinates.
    pub fn knots(self) -> (&'static [f64], &'static [f64]) {
        match self {
            Scenario::General => (GENERAL_X, GENERAL_Y),
            Scenario::Step => (STEP_X, STEP_Y),
            Scenario::Line => (LINE_X, LINE_Y),
            Scenario::Basic => (BASIC_X, BASIC_Y),
        }
    }

    /// The knots as a marker series.
    pub fn overlay(self) -> Series {
        let (x, y) = self.knots();
        Series {
            name: format!("{} knots", self.name()),
            x: x.to_vec(),
            y: y.to_vec(),
            style: SeriesStyle::Markers,
        }
    }

    /// Half-open x range the sample file covers.
    pub fn sample_range(self) -> (f64, f64) {
        match self {
            Scenario::General => (0.0, 11.5),
            Scenario::Step => (1.0, 8.0),
            Scenario::Line => (0.0, 3.0),
            Scenario::Basic => (0.0, 4.0),
        }
    }
}

impl FromStr for Scenario {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| PlotError::missing_overlay(s))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_file_name() {
        assert_eq!(
            Scenario::from_path(Path::new("testing/general")).unwrap(),
            Scenario::General
        );
        assert_eq!(Scenario::from_path(Path::new("step")).unwrap(), Scenario::Step);
        assert_eq!(
            Scenario::from_path(Path::new("/tmp/x/line")).unwrap(),
            Scenario::Line
        );
        assert_eq!(
            Scenario::from_path(Path::new("testing/basic")).unwrap(),
            Scenario::Basic
        );
    }

    #[test]
    fn unknown_name_fails_loudly() {
        let err = Scenario::from_path(Path::new("testing/manual")).unwrap_err();
        assert!(matches!(err, PlotError::MissingOverlay { ref name } if name == "manual"));
        assert!("General".parse::<Scenario>().is_err());
    }

    #[test]
    fn basic_overlay_is_the_literal_knots() {
        let overlay = Scenario::Basic.overlay();
        assert_eq!(overlay.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(overlay.y, vec![3.0, 5.0, 2.0]);
        assert_eq!(overlay.style, SeriesStyle::Markers);
    }

    #[test]
    fn every_scenario_has_matching_knot_lengths() {
        for scenario in Scenario::ALL {
            let (x, y) = scenario.knots();
            assert_eq!(x.len(), y.len(), "{scenario}");
            assert!(x.len() >= 2, "{scenario}");
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
    }
}
