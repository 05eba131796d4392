//! Error types for tabplot.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tabplot operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while loading, shaping or rendering data.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Failed to open or read a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field could not be parsed as a number.
    #[error("{path}:{line}: not a number: {field:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        field: String,
    },

    /// A row has a different number of columns than the first row.
    #[error("{path}:{line}: expected {expected} columns, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The table does not have enough columns for the requested operation.
    #[error("Table has {found} columns, need at least {expected}")]
    MissingColumns { expected: usize, found: usize },

    /// Row count does not match the requested grid dimensions.
    #[error("Cannot reshape {found} rows into a grid of {columns} columns by {rows} rows")]
    Shape {
        columns: usize,
        rows: usize,
        found: usize,
    },

    /// A series was built from x and y sequences of different lengths.
    #[error("Series {name:?} has {x_len} x values but {y_len} y values")]
    SeriesLength {
        name: String,
        x_len: usize,
        y_len: usize,
    },

    /// No literal overlay series is known for this name.
    #[error("No overlay series for {name:?} (known: general, step, line, basic)")]
    MissingOverlay { name: String },

    /// Spline or grid interpolation input is invalid.
    #[error("Interpolation error: {0}")]
    Interpolation(String),

    /// Array layout error from ndarray.
    #[error("Array error: {0}")]
    Array(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    /// Create a FileOpen error.
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a MissingOverlay error.
    pub fn missing_overlay(name: impl Into<String>) -> Self {
        Self::MissingOverlay { name: name.into() }
    }

    /// Create an Interpolation error.
    pub fn interpolation(msg: impl Into<String>) -> Self {
        Self::Interpolation(msg.into())
    }

    /// Whether this is a parse failure (bad field or ragged row).
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::RaggedRow { .. })
    }
}

impl From<ndarray::ShapeError> for PlotError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Array(err.to_string())
    }
}
