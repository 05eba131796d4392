//! Tabplot - plot tabular numeric files in the terminal.
//!
//! Tabplot reads whitespace-delimited text files and draws them as charts:
//! two-column files as a line with reference markers on top, three-column
//! files as a 3D surface over a fixed grid.
//!
//! # Features
//!
//! - Plain-text table loading with line-accurate errors
//! - Line charts with literal overlay datasets
//! - Rotatable surface and heatmap views
//! - Makima spline sample generation
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```ignore
//! use tabplot::app;
//! use tabplot::util::PlotConfig;
//! use std::path::Path;
//!
//! let config = PlotConfig::default();
//! let chart = app::build_line_chart(Path::new("basic"), None, &config)?;
//! app::show(&chart, &config)?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod chart;
pub mod data;
pub mod error;
pub mod generate;
pub mod overlay;
pub mod spline;
pub mod ui;
pub mod util;
pub mod viewer;

pub use error::{PlotError, Result};
