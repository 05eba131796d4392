//! Delimited numeric table reader.

use crate::error::{PlotError, Result};
use ndarray::{Array2, ArrayView1};
use std::path::Path;
use tracing::{debug, info};

/// Parsed numeric rows from a delimited text file.
///
/// Every row has the same number of columns. Values are stored as a
/// `rows × columns` array in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    data: Array2<f64>,
}

impl Table {
    /// Read the file at `path`, splitting each line on `delimiter`.
    ///
    /// Blank lines are skipped. When `delimiter` is whitespace, runs of
    /// whitespace count as a single separator.
    pub fn load(path: &Path, delimiter: char) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| PlotError::file_open(path, e))?;
        let text = decode(bytes, path)?;
        let table = Self::parse(&text, delimiter, path)?;
        info!(
            "Loaded {} ({} rows x {} columns)",
            path.display(),
            table.nrows(),
            table.ncols()
        );
        Ok(table)
    }

    /// Parse already-read text. `source` is only used in error messages.
    pub fn parse(text: &str, delimiter: char, source: &Path) -> Result<Self> {
        let mut values = Vec::new();
        let mut ncols: Option<usize> = None;
        let mut nrows = 0;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = if delimiter.is_whitespace() {
                line.split_whitespace().collect()
            } else {
                line.split(delimiter).map(str::trim).collect()
            };

            match ncols {
                None => ncols = Some(fields.len()),
                Some(expected) if expected != fields.len() => {
                    return Err(PlotError::RaggedRow {
                        path: source.to_path_buf(),
                        line: line_no,
                        expected,
                        found: fields.len(),
                    });
                },
                Some(_) => {},
            }

            for field in fields {
                let value = field.parse::<f64>().map_err(|_| PlotError::Parse {
                    path: source.to_path_buf(),
                    line: line_no,
                    field: field.to_string(),
                })?;
                values.push(value);
            }
            nrows += 1;
        }

        let ncols = ncols.unwrap_or(0);
        debug!("Parsed {} values from {}", values.len(), source.display());
        let data = Array2::from_shape_vec((nrows, ncols), values)?;
        Ok(Self { data })
    }

    /// Build a table from equal-length rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * ncols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(PlotError::RaggedRow {
                    path: "<memory>".into(),
                    line: i + 1,
                    expected: ncols,
                    found: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((rows.len(), ncols), values)?;
        Ok(Self { data })
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }

    /// View of one column.
    ///
    /// # Panics
    /// Panics if `index >= self.ncols()`.
    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.column(index)
    }

    /// Rows as owned vectors, in file order.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Fail unless the table has at least `expected` columns.
    pub fn require_columns(&self, expected: usize) -> Result<()> {
        if self.ncols() < expected {
            return Err(PlotError::MissingColumns {
                expected,
                found: self.ncols(),
            });
        }
        Ok(())
    }
}

/// UTF-8 text of a file. Invalid bytes are reported as a parse error on the
/// line that holds them.
fn decode(bytes: Vec<u8>, source: &Path) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| {
        let bytes = err.as_bytes();
        let bad = err.utf8_error().valid_up_to();
        let start = bytes[..bad]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let end = bytes[bad..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |i| bad + i);
        PlotError::Parse {
            path: source.to_path_buf(),
            line: bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1,
            field: String::from_utf8_lossy(&bytes[start..end]).trim().to_string(),
        }
    })
}
