//! Reshaping a three-column table into surface meshes.

use super::Table;
use crate::error::{PlotError, Result};
use ndarray::Array2;
use tracing::info;

/// X, Y and Z meshes of a surface, each `rows × columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// X coordinate of every mesh node.
    pub x: Array2<f64>,
    /// Y coordinate of every mesh node.
    pub y: Array2<f64>,
    /// Height of every mesh node.
    pub z: Array2<f64>,
}

impl Grid {
    /// Reinterpret columns 0, 1 and 2 of `table` as `rows` rows of `columns`
    /// values each, in row-major order.
    pub fn reshape(table: &Table, columns: usize, rows: usize) -> Result<Self> {
        table.require_columns(3)?;
        if columns * rows != table.nrows() {
            return Err(PlotError::Shape {
                columns,
                rows,
                found: table.nrows(),
            });
        }

        let mesh = |index: usize| -> Result<Array2<f64>> {
            Ok(Array2::from_shape_vec(
                (rows, columns),
                table.column(index).to_vec(),
            )?)
        };

        let grid = Self {
            x: mesh(0)?,
            y: mesh(1)?,
            z: mesh(2)?,
        };
        info!("Reshaped {} rows into {}x{} grid", table.nrows(), rows, columns);
        Ok(grid)
    }

    /// Number of mesh rows.
    pub fn rows(&self) -> usize {
        self.z.nrows()
    }

    /// Number of mesh columns.
    pub fn columns(&self) -> usize {
        self.z.ncols()
    }

    /// Finite minimum and maximum of X, Y and Z, in that order.
    ///
    /// Returns `None` for a mesh with no finite values.
    pub fn bounds(&self) -> Option<[(f64, f64); 3]> {
        Some([
            finite_range(&self.x)?,
            finite_range(&self.y)?,
            finite_range(&self.z)?,
        ])
    }
}

/// Free-function form of [`Grid::reshape`].
pub fn reshape_to_grid(table: &Table, columns: usize, rows: usize) -> Result<Grid> {
    Grid::reshape(table, columns, rows)
}

fn finite_range(values: &Array2<f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
    (min <= max).then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_rows(n: usize) -> Table {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| vec![i as f64, (i * 2) as f64, (i * 3) as f64])
            .collect();
        Table::from_rows(&rows).unwrap()
    }

    #[test]
    fn reshapes_5400_rows_into_90_by_60() {
        let table = table_with_rows(5400);
        let grid = Grid::reshape(&table, 60, 90).unwrap();
        assert_eq!(grid.x.dim(), (90, 60));
        assert_eq!(grid.y.dim(), (90, 60));
        assert_eq!(grid.z.dim(), (90, 60));
        assert_eq!(grid.rows(), 90);
        assert_eq!(grid.columns(), 60);

        let flat_x: Vec<f64> = grid.x.iter().copied().collect();
        let flat_y: Vec<f64> = grid.y.iter().copied().collect();
        let flat_z: Vec<f64> = grid.z.iter().copied().collect();
        assert_eq!(flat_x, table.column(0).to_vec());
        assert_eq!(flat_y, table.column(1).to_vec());
        assert_eq!(flat_z, table.column(2).to_vec());
    }

    #[test]
    fn row_major_layout() {
        let table = table_with_rows(6);
        let grid = Grid::reshape(&table, 3, 2).unwrap();
        assert_eq!(grid.x[[0, 2]], 2.0);
        assert_eq!(grid.x[[1, 0]], 3.0);
        assert_eq!(grid.z[[1, 2]], 15.0);
    }

    #[test]
    fn off_by_one_row_counts_are_shape_errors() {
        for n in [5399, 5401] {
            let err = Grid::reshape(&table_with_rows(n), 60, 90).unwrap_err();
            assert!(
                matches!(
                    err,
                    PlotError::Shape {
                        columns: 60,
                        rows: 90,
                        found
                    } if found == n
                ),
                "{n} rows: {err}"
            );
        }
    }

    #[test]
    fn two_column_table_cannot_be_reshaped() {
        let table = Table::from_rows(&[vec![1.0, 2.0]]).unwrap();
        assert!(matches!(
            reshape_to_grid(&table, 1, 1),
            Err(PlotError::MissingColumns { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn bounds_ignore_non_finite_values() {
        let table = Table::from_rows(&[
            vec![0.0, 1.0, f64::NAN],
            vec![2.0, -1.0, 4.0],
        ])
        .unwrap();
        let grid = Grid::reshape(&table, 2, 1).unwrap();
        let [x, y, z] = grid.bounds().unwrap();
        assert_eq!(x, (0.0, 2.0));
        assert_eq!(y, (-1.0, 1.0));
        assert_eq!(z, (4.0, 4.0));
    }
}
