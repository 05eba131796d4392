//! Utility functions.
//!
//! This module provides color mapping, number formatting and the fixed
//! layout configuration.

pub mod colormaps;
pub mod formatters;
pub mod layout_config;

pub use layout_config::PlotConfig;
