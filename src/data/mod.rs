//! Data loading and representation.
//!
//! This module handles reading delimited numeric files into tables and
//! reshaping them into surface grids.

mod grid;
mod table;

pub use grid::{reshape_to_grid, Grid};
pub use table::Table;

use crate::error::Result;
use std::path::Path;

/// Free-function form of [`Table::load`].
pub fn load_table(path: &Path, delimiter: char) -> Result<Table> {
    Table::load(path, delimiter)
}
