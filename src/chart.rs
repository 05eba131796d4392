//! Chart model: the draw commands queued for display.
//!
//! A [`Chart`] is built by the render operations and handed to the viewer.
//! It owns copies of everything it draws, so the caller's tables and series
//! are only borrowed while rendering.

use crate::data::{Grid, Table};
use crate::error::{PlotError, Result};
use tracing::debug;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesStyle {
    /// Points joined by a line.
    #[default]
    Line,
    /// Discrete markers, no connecting line.
    Markers,
}

/// A named x/y sequence pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend name.
    pub name: String,
    /// X values.
    pub x: Vec<f64>,
    /// Y values, same length as `x`.
    pub y: Vec<f64>,
    /// Draw style.
    pub style: SeriesStyle,
}

impl Series {
    /// Build a series, checking that `x` and `y` have the same length.
    pub fn new(
        name: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        style: SeriesStyle,
    ) -> Result<Self> {
        let name = name.into();
        if x.len() != y.len() {
            return Err(PlotError::SeriesLength {
                name,
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { name, x, y, style })
    }

    /// Line series from the first two columns of `table`.
    pub fn from_table(name: impl Into<String>, table: &Table) -> Result<Self> {
        table.require_columns(2)?;
        Self::new(
            name,
            table.column(0).to_vec(),
            table.column(1).to_vec(),
            SeriesStyle::Line,
        )
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, y)` pairs, in order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// Axis titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    /// X axis title.
    pub x: String,
    /// Y axis title.
    pub y: String,
    /// Z axis title (surfaces only).
    pub z: Option<String>,
}

impl AxisLabels {
    /// Labels for a 2D chart.
    pub fn xy(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: None,
        }
    }

    /// Labels for a surface.
    pub fn xyz(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: Some(z.into()),
        }
    }
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self::xy("x", "y")
    }
}

/// Explicit figure passed through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    title: String,
    series: Vec<Series>,
    surface: Option<Grid>,
    labels: AxisLabels,
}

impl Chart {
    /// Create an empty chart.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Queue the table's first two columns as a line, then every entry of
    /// `extra` as markers, and set the x/y axis labels.
    pub fn render_2d(&mut self, table: &Table, extra: &[Series], labels: AxisLabels) -> Result<()> {
        let data = Series::from_table(self.title.clone(), table)?;
        self.series.push(data);
        for overlay in extra {
            self.series.push(Series {
                style: SeriesStyle::Markers,
                ..overlay.clone()
            });
        }
        self.labels = labels;
        debug!(
            "Queued {} series on chart {:?}",
            self.series.len(),
            self.title
        );
        Ok(())
    }

    /// Queue a surface for the grid's meshes and label all three axes.
    pub fn render_surface(&mut self, grid: Grid, labels: AxisLabels) {
        debug!(
            "Queued {}x{} surface on chart {:?}",
            grid.rows(),
            grid.columns(),
            self.title
        );
        self.surface = Some(grid);
        self.labels = labels;
    }

    /// Chart title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Queued series, in draw order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Queued surface, if any.
    pub fn surface(&self) -> Option<&Grid> {
        self.surface.as_ref()
    }

    /// Axis labels.
    pub fn labels(&self) -> &AxisLabels {
        &self.labels
    }

    /// Finite `[min, max]` x and y bounds over all series.
    pub fn xy_bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let (x_min, x_max, y_min, y_max) = self
            .series
            .iter()
            .flat_map(|s| s.x.iter().zip(s.y.iter()))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(
                (
                    f64::INFINITY,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    f64::NEG_INFINITY,
                ),
                |(x0, x1, y0, y1), (&x, &y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            );
        (x_min <= x_max).then_some(([x_min, x_max], [y_min, y_max]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn basic_table() -> Table {
        Table::parse("1 3\n2 5\n3 2\n", ' ', Path::new("basic")).unwrap()
    }

    #[test]
    fn series_lengths_must_match() {
        let err = Series::new("bad", vec![1.0, 2.0], vec![1.0], SeriesStyle::Line).unwrap_err();
        assert!(matches!(err, PlotError::SeriesLength { x_len: 2, y_len: 1, .. }));
    }

    #[test]
    fn render_2d_queues_line_then_markers() {
        let table = basic_table();
        let overlay =
            Series::new("knots", vec![1.0, 2.0, 3.0], vec![3.0, 5.0, 2.0], SeriesStyle::Line)
                .unwrap();
        let mut chart = Chart::new("basic");
        chart
            .render_2d(&table, std::slice::from_ref(&overlay), AxisLabels::xy("x", "y"))
            .unwrap();

        let series = chart.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].style, SeriesStyle::Line);
        assert_eq!(series[0].points(), vec![(1.0, 3.0), (2.0, 5.0), (3.0, 2.0)]);
        assert_eq!(series[1].style, SeriesStyle::Markers);
        assert_eq!(series[1].points(), series[0].points());
        assert_eq!(chart.labels(), &AxisLabels::xy("x", "y"));
    }

    #[test]
    fn render_2d_leaves_inputs_untouched() {
        let table = basic_table();
        let extra = vec![
            Series::new("a", vec![0.0], vec![1.0], SeriesStyle::Line).unwrap(),
            Series::new("b", vec![2.0, 4.0], vec![1.0, 0.0], SeriesStyle::Markers).unwrap(),
        ];
        let table_before = table.clone();
        let extra_before = extra.clone();

        let mut chart = Chart::new("t");
        chart.render_2d(&table, &extra, AxisLabels::default()).unwrap();

        assert_eq!(table, table_before);
        assert_eq!(extra, extra_before);
    }

    #[test]
    fn render_2d_needs_two_columns() {
        let table = Table::parse("1\n2\n", ' ', Path::new("one")).unwrap();
        let mut chart = Chart::new("one");
        assert!(matches!(
            chart.render_2d(&table, &[], AxisLabels::default()),
            Err(PlotError::MissingColumns { expected: 2, found: 1 })
        ));
        assert!(chart.series().is_empty());
    }

    #[test]
    fn bounds_cover_all_series() {
        let table = basic_table();
        let extra =
            [Series::new("o", vec![-1.0], vec![10.0], SeriesStyle::Markers).unwrap()];
        let mut chart = Chart::new("t");
        chart.render_2d(&table, &extra, AxisLabels::default()).unwrap();
        assert_eq!(chart.xy_bounds(), Some(([-1.0, 3.0], [2.0, 10.0])));
    }

    #[test]
    fn render_surface_sets_three_labels() {
        let table =
            Table::from_rows(&[vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 2.0]]).unwrap();
        let grid = Grid::reshape(&table, 2, 1).unwrap();
        let mut chart = Chart::new("s");
        chart.render_surface(grid, AxisLabels::xyz("X Label", "Y Label", "Z Label"));
        assert!(chart.surface().is_some());
        assert_eq!(chart.labels().z.as_deref(), Some("Z Label"));
        assert_eq!(chart.xy_bounds(), None);
    }
}
