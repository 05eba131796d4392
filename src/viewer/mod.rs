//! Chart viewer - view state for the interactive window.
//!
//! This module holds what the user can change while a chart is displayed:
//! the view mode, the surface camera angles and the theme. Rendering lives
//! in [`ui`], the camera math in [`projection`].

pub mod projection;
pub mod ui;

use crate::chart::Chart;
use crate::ui::Theme;
use crate::util::layout_config::SurfaceLayoutConfig;

/// View mode for the chart window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Line and marker series.
    #[default]
    Chart,
    /// Projected 3D surface wireframe.
    Surface,
    /// Top-down heatmap of the surface height.
    Heatmap,
}

impl ViewMode {
    /// Get the next view mode in cycle. 2D charts have a single view.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Chart => ViewMode::Chart,
            ViewMode::Surface => ViewMode::Heatmap,
            ViewMode::Heatmap => ViewMode::Surface,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Chart => "Chart",
            ViewMode::Surface => "Surface",
            ViewMode::Heatmap => "Heatmap",
        }
    }
}

/// State for the chart viewer.
#[derive(Debug, Clone)]
pub struct ViewerState {
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Camera azimuth in degrees, in `(-180, 180]`.
    pub azimuth: f64,
    /// Camera elevation in degrees, in `[-90, 90]`.
    pub elevation: f64,
    /// Current theme.
    pub theme: Theme,
    /// Status message to display inside the viewer.
    pub status_message: Option<String>,
    initial_angles: (f64, f64),
    rotation_step: f64,
}

impl ViewerState {
    /// Create the state for displaying `chart`.
    pub fn new(chart: &Chart, config: &SurfaceLayoutConfig) -> Self {
        let view_mode = if chart.surface().is_some() {
            ViewMode::Surface
        } else {
            ViewMode::Chart
        };
        Self {
            view_mode,
            azimuth: wrap_degrees(config.azimuth),
            elevation: config.elevation.clamp(-90.0, 90.0),
            theme: Theme::default(),
            status_message: None,
            initial_angles: (config.azimuth, config.elevation),
            rotation_step: config.rotation_step,
        }
    }

    /// Cycle view mode.
    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
    }

    /// Whether the camera keys apply to the current view.
    pub fn is_rotatable(&self) -> bool {
        self.view_mode == ViewMode::Surface
    }

    /// Rotate the camera around the vertical axis by `steps` key presses.
    pub fn rotate(&mut self, steps: f64) {
        if self.is_rotatable() {
            self.azimuth = wrap_degrees(self.azimuth + steps * self.rotation_step);
        }
    }

    /// Raise or lower the camera by `steps` key presses.
    pub fn tilt(&mut self, steps: f64) {
        if self.is_rotatable() {
            self.elevation = (self.elevation + steps * self.rotation_step).clamp(-90.0, 90.0);
        }
    }

    /// Restore the initial camera angles.
    pub fn reset_view(&mut self) {
        self.azimuth = wrap_degrees(self.initial_angles.0);
        self.elevation = self.initial_angles.1.clamp(-90.0, 90.0);
    }

    /// Switch to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }

    /// Set status message (displayed inside the viewer).
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Wrap an angle into `(-180, 180]`.
fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}
