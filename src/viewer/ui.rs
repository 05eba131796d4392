//! Chart viewer - pure rendering layer.

use super::projection::{to_unit, Projection};
use super::{ViewMode, ViewerState};
use crate::chart::{Chart, SeriesStyle};
use crate::data::Grid;
use crate::ui::ThemeColors;
use crate::util::colormaps::{coolwarm, normalize};
use crate::util::formatters::{format_axis_label, format_number, format_stat_value};
use crate::util::layout_config::PlotConfig;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Axis, Block, Borders, Chart as ChartWidget, Dataset, GraphType, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Canvas half-extent of the surface view; the unit cube projects inside ±√3.
const SURFACE_EXTENT: f64 = 2.0;

/// Draw the whole viewer window.
pub fn draw_viewer(f: &mut Frame<'_>, chart: &Chart, state: &ViewerState, config: &PlotConfig) {
    let colors = ThemeColors::from_theme(state.theme);
    let area = f.area();

    let block = Block::default()
        .title(format!(" {} - {} ", chart.title(), state.view_mode.name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .style(Style::default().bg(colors.bg0));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let has_status = state.status_message.is_some();
    let mut constraints = vec![Constraint::Length(3)];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut chunk_idx = 0;
    draw_header(f, chunks[chunk_idx], chart, state, &colors);
    chunk_idx += 1;

    if has_status {
        draw_status(f, chunks[chunk_idx], state, &colors);
        chunk_idx += 1;
    }

    let content = chunks[chunk_idx];
    match (state.view_mode, chart.surface()) {
        (ViewMode::Surface, Some(grid)) => {
            draw_surface_view(f, content, chart, grid, state, config, &colors)
        },
        (ViewMode::Heatmap, Some(grid)) => {
            draw_heatmap_view(f, content, chart, grid, config, &colors)
        },
        _ => draw_chart_view(f, content, chart, config, &colors),
    }
    chunk_idx += 1;

    draw_footer(f, chunks[chunk_idx], state, &colors);
}

fn draw_header(
    f: &mut Frame<'_>,
    area: Rect,
    chart: &Chart,
    state: &ViewerState,
    colors: &ThemeColors,
) {
    let labels = chart.labels();
    let mut title_parts = vec![
        Span::styled(
            chart.title().to_string(),
            Style::default()
                .fg(colors.yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  x: {}  y: {}", labels.x, labels.y),
            Style::default().fg(colors.fg0),
        ),
    ];
    if let Some(ref z) = labels.z {
        title_parts.push(Span::styled(
            format!("  z: {}", z),
            Style::default().fg(colors.fg0),
        ));
    }

    let info = match chart.surface() {
        Some(grid) => {
            let z_range = grid
                .bounds()
                .map(|[_, _, (lo, hi)]| {
                    format!("  Z: [{}, {}]", format_stat_value(lo), format_stat_value(hi))
                })
                .unwrap_or_default();
            vec![
                Span::styled("Grid: ", Style::default().fg(colors.green)),
                Span::styled(
                    format!("{} x {}", grid.rows(), grid.columns()),
                    Style::default().fg(colors.fg0),
                ),
                Span::styled(
                    format!("  ({} points)", format_number(grid.rows() * grid.columns())),
                    Style::default().fg(colors.gray),
                ),
                Span::styled(z_range, Style::default().fg(colors.aqua)),
            ]
        },
        None => {
            let points: usize = chart.series().iter().map(|s| s.len()).sum();
            vec![
                Span::styled("Series: ", Style::default().fg(colors.green)),
                Span::styled(
                    chart.series().len().to_string(),
                    Style::default().fg(colors.fg0),
                ),
                Span::styled(
                    format!("  ({} points)", format_number(points)),
                    Style::default().fg(colors.gray),
                ),
            ]
        },
    };

    let mut lines = vec![Line::from(title_parts), Line::from(info)];
    if state.is_rotatable() {
        lines[1].spans.push(Span::styled(
            format!("  az {:.0}° el {:.0}°", state.azimuth, state.elevation),
            Style::default().fg(colors.gray),
        ));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(colors.bg2)),
    );

    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame<'_>, area: Rect, state: &ViewerState, colors: &ThemeColors) {
    if let Some(ref msg) = state.status_message {
        let paragraph = Paragraph::new(msg.as_str())
            .style(Style::default().fg(colors.yellow).bg(colors.bg1))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}

fn draw_no_data(f: &mut Frame<'_>, area: Rect, msg: &str, colors: &ThemeColors) {
    let para = Paragraph::new(msg.to_string())
        .style(Style::default().fg(colors.fg0))
        .alignment(Alignment::Center);
    f.render_widget(para, area);
}

fn draw_chart_view(
    f: &mut Frame<'_>,
    area: Rect,
    chart: &Chart,
    config: &PlotConfig,
    colors: &ThemeColors,
) {
    let Some(([x_lo, x_hi], [y_lo, y_hi])) = chart.xy_bounds() else {
        draw_no_data(f, area, "No data to display", colors);
        return;
    };

    let (x_min, x_max) = if x_hi - x_lo > 0.0 {
        (x_lo, x_hi)
    } else {
        (x_lo - 0.5, x_hi + 0.5)
    };
    let span = y_hi - y_lo;
    let padding = if span > 0.0 {
        span * config.chart.y_axis_padding_factor
    } else {
        0.5
    };
    let (y_min, y_max) = (y_lo - padding, y_hi + padding);

    let bins = (area.width as usize).saturating_sub(8).max(1);
    let points: Vec<Vec<(f64, f64)>> = chart
        .series()
        .iter()
        .map(|s| {
            let finite: Vec<(f64, f64)> = s
                .points()
                .into_iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            match s.style {
                SeriesStyle::Line => downsample(finite, bins),
                SeriesStyle::Markers => finite,
            }
        })
        .collect();

    let datasets: Vec<Dataset<'_>> = chart
        .series()
        .iter()
        .zip(points.iter())
        .map(|(s, pts)| {
            let dataset = Dataset::default().name(s.name.clone()).data(pts);
            match s.style {
                SeriesStyle::Line => dataset
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(colors.blue)),
                SeriesStyle::Markers => dataset
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(colors.red)),
            }
        })
        .collect();

    let labels = chart.labels();
    let x_axis = Axis::default()
        .title(labels.x.clone())
        .style(Style::default().fg(colors.fg0))
        .bounds([x_min, x_max])
        .labels(tick_labels(x_min, x_max));
    let y_axis = Axis::default()
        .title(labels.y.clone())
        .style(Style::default().fg(colors.fg0))
        .bounds([y_min, y_max])
        .labels(tick_labels(y_min, y_max));

    let widget = ChartWidget::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(widget, area);
}

fn tick_labels(min: f64, max: f64) -> Vec<String> {
    vec![
        format_axis_label(min),
        format_axis_label((min + max) / 2.0),
        format_axis_label(max),
    ]
}

/// Keep at most `bins` evenly spaced points, always including the last one.
fn downsample(series: Vec<(f64, f64)>, bins: usize) -> Vec<(f64, f64)> {
    if series.len() <= bins {
        return series;
    }
    let step = (series.len() as f64) / (bins as f64);
    let mut simple = Vec::with_capacity(bins + 1);
    let mut pos = 0.0;
    while (pos as usize) < series.len() {
        simple.push(series[pos as usize]);
        pos += step;
    }
    if let (Some(last), Some(kept)) = (series.last(), simple.last()) {
        if last != kept {
            simple.push(*last);
        }
    }
    simple
}

/// One projected mesh edge.
#[derive(Debug, Clone, Copy)]
struct Edge {
    from: (f64, f64),
    to: (f64, f64),
    depth: f64,
    color: Color,
}

/// Project every mesh edge, sorted far to near.
fn surface_edges(grid: &Grid, cam: &Projection, bounds: [(f64, f64); 3]) -> Vec<Edge> {
    let [xb, yb, zb] = bounds;
    let (rows, cols) = grid.z.dim();

    let node = |r: usize, c: usize| -> Option<([f64; 3], f64)> {
        let (x, y, z) = (grid.x[[r, c]], grid.y[[r, c]], grid.z[[r, c]]);
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return None;
        }
        let unit = [to_unit(x, xb), to_unit(y, yb), to_unit(z, zb)];
        Some((unit, normalize(z, zb.0, zb.1)))
    };

    let mut edges = Vec::with_capacity(rows * cols * 2);
    for r in 0..rows {
        for c in 0..cols {
            let Some((p, t)) = node(r, c) else {
                continue;
            };
            for (nr, nc) in [(r, c + 1), (r + 1, c)] {
                if nr >= rows || nc >= cols {
                    continue;
                }
                if let Some((q, u)) = node(nr, nc) {
                    edges.push(Edge {
                        from: cam.project(p),
                        to: cam.project(q),
                        depth: (cam.depth(p) + cam.depth(q)) / 2.0,
                        color: coolwarm((t + u) / 2.0),
                    });
                }
            }
        }
    }
    edges.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    edges
}

fn draw_surface_view(
    f: &mut Frame<'_>,
    area: Rect,
    chart: &Chart,
    grid: &Grid,
    state: &ViewerState,
    config: &PlotConfig,
    colors: &ThemeColors,
) {
    let Some(bounds) = grid.bounds() else {
        draw_no_data(f, area, "No finite data to display", colors);
        return;
    };
    let [xb, yb, zb] = bounds;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    draw_colorbar(f, chunks[0], zb, config.surface.colorbar_width, colors);

    let cam = Projection::new(state.azimuth, state.elevation);
    let edges = surface_edges(grid, &cam, bounds);

    // Base of the bounding box, and the vertical axis at its leftmost corner.
    let corners = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
    ];
    let mut frame_lines: Vec<((f64, f64), (f64, f64))> = (0..4)
        .map(|i| (cam.project(corners[i]), cam.project(corners[(i + 1) % 4])))
        .collect();
    let z_corner = corners
        .iter()
        .copied()
        .min_by(|a, b| cam.project(*a).0.total_cmp(&cam.project(*b).0))
        .unwrap_or(corners[0]);
    let z_top = [z_corner[0], z_corner[1], 1.0];
    frame_lines.push((cam.project(z_corner), cam.project(z_top)));

    // Canvas units per terminal column, for centering printed text.
    let per_char = 2.0 * SURFACE_EXTENT / f64::from(area.width.max(1));
    let centered = |p: [f64; 3], text: &str| -> (f64, f64) {
        let (x, y) = cam.project(p);
        (x - per_char * text.width() as f64 / 2.0, y)
    };
    let right_aligned = |p: [f64; 3], text: &str| -> (f64, f64) {
        let (x, y) = cam.project(p);
        (x - per_char * (text.width() + 1) as f64, y)
    };

    let labels = chart.labels();
    let z_title = labels.z.clone().unwrap_or_else(|| "z".to_string());
    let mut annotations: Vec<((f64, f64), String, Color)> = vec![
        (centered([0.0, -1.45, -1.0], &labels.x), labels.x.clone(), colors.yellow),
        (centered([1.45, 0.0, -1.0], &labels.y), labels.y.clone(), colors.yellow),
        (
            centered([z_corner[0], z_corner[1], 1.3], &z_title),
            z_title.clone(),
            colors.yellow,
        ),
    ];
    for (point, value) in [
        ([-1.0, -1.15, -1.0], xb.0),
        ([1.0, -1.15, -1.0], xb.1),
        ([1.15, -1.0, -1.0], yb.0),
        ([1.15, 1.0, -1.0], yb.1),
    ] {
        let text = format_axis_label(value);
        annotations.push((centered(point, &text), text, colors.green));
    }
    for (z, value) in [(-1.0, zb.0), (1.0, zb.1)] {
        let text = format_axis_label(value);
        let at = right_aligned([z_corner[0], z_corner[1], z], &text);
        annotations.push((at, text, colors.green));
    }

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2)),
        )
        .marker(Marker::Braille)
        .background_color(colors.bg0)
        .x_bounds([-SURFACE_EXTENT, SURFACE_EXTENT])
        .y_bounds([-SURFACE_EXTENT, SURFACE_EXTENT])
        .paint(|ctx| {
            for (from, to) in &frame_lines {
                ctx.draw(&CanvasLine {
                    x1: from.0,
                    y1: from.1,
                    x2: to.0,
                    y2: to.1,
                    color: colors.gray,
                });
            }
            ctx.layer();
            for edge in &edges {
                ctx.draw(&CanvasLine {
                    x1: edge.from.0,
                    y1: edge.from.1,
                    x2: edge.to.0,
                    y2: edge.to.1,
                    color: edge.color,
                });
            }
            ctx.layer();
            for ((x, y), text, color) in &annotations {
                ctx.print(*x, *y, Span::styled(text.clone(), Style::default().fg(*color)));
            }
        });

    f.render_widget(canvas, chunks[1]);
}

fn draw_heatmap_view(
    f: &mut Frame<'_>,
    area: Rect,
    chart: &Chart,
    grid: &Grid,
    config: &PlotConfig,
    colors: &ThemeColors,
) {
    let Some([_, _, zb]) = grid.bounds() else {
        draw_no_data(f, area, "No finite data to display", colors);
        return;
    };
    let (rows, cols) = grid.z.dim();
    let labels = chart.labels();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .title(format!(
            " {} over {} x {} ",
            labels.z.as_deref().unwrap_or("z"),
            labels.x,
            labels.y
        ))
        .title_style(Style::default().fg(colors.yellow));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 12 || inner.height < 4 {
        return;
    }

    let colorbar_area = Rect { height: 1, ..inner };
    draw_colorbar(f, colorbar_area, zb, config.surface.colorbar_width, colors);

    let left_margin = 8;
    let heatmap_area = Rect {
        x: inner.x + left_margin,
        y: inner.y + 1,
        width: inner.width.saturating_sub(left_margin),
        height: inner.height.saturating_sub(2),
    };

    let pixel_width = config.surface.pixel_width.max(1);
    let disp_rows = rows.min(heatmap_area.height as usize);
    let disp_cols = cols.min(heatmap_area.width as usize / pixel_width);
    if disp_rows == 0 || disp_cols == 0 {
        return;
    }
    let row_step = rows as f64 / disp_rows as f64;
    let col_step = cols as f64 / disp_cols as f64;

    // Highest y row at the top of the screen.
    let data_row = |y: usize| rows - 1 - ((y as f64 * row_step).floor() as usize).min(rows - 1);
    let data_col = |x: usize| ((x as f64 * col_step).floor() as usize).min(cols - 1);

    let buf = f.buffer_mut();
    for y in 0..disp_rows {
        let r = data_row(y);
        for px in 0..disp_cols {
            let val = grid.z[[r, data_col(px)]];
            for i in 0..pixel_width {
                let screen_x = heatmap_area.x + (px * pixel_width + i) as u16;
                let screen_y = heatmap_area.y + y as u16;
                if let Some(cell) = buf.cell_mut((screen_x, screen_y)) {
                    if val.is_finite() {
                        cell.set_char('█').set_fg(coolwarm(normalize(val, zb.0, zb.1)));
                    } else {
                        cell.set_char('·').set_fg(colors.gray);
                    }
                }
            }
        }
    }

    // Y-axis labels (left side)
    for y_pos in [0, disp_rows / 2, disp_rows - 1] {
        let label = format_axis_label(grid.y[[data_row(y_pos), 0]]);
        let label: String = label.chars().take(left_margin as usize - 1).collect();
        let start = heatmap_area.x.saturating_sub(label.width() as u16 + 1);
        put_text(buf, start, heatmap_area.y + y_pos as u16, &label, colors.green);
    }

    // X-axis labels (bottom)
    let x_label_y = heatmap_area.y + disp_rows as u16;
    if x_label_y < inner.y + inner.height {
        for x_pos in [0, disp_cols / 2, disp_cols - 1] {
            let label = format_axis_label(grid.x[[0, data_col(x_pos)]]);
            let screen_x = heatmap_area.x + (x_pos * pixel_width) as u16;
            let limit = heatmap_area.x + heatmap_area.width;
            let fitted: String = label
                .chars()
                .take(limit.saturating_sub(screen_x) as usize)
                .collect();
            put_text(buf, screen_x, x_label_y, &fitted, colors.green);
        }
    }
}

fn put_text(buf: &mut ratatui::buffer::Buffer, x: u16, y: u16, text: &str, color: Color) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = buf.cell_mut((x + i as u16, y)) {
            cell.set_char(ch).set_fg(color);
        }
    }
}

/// Coolwarm bar with the value range printed at both ends.
fn draw_colorbar(
    f: &mut Frame<'_>,
    area: Rect,
    (min_val, max_val): (f64, f64),
    width: usize,
    colors: &ThemeColors,
) {
    let min_label = format_axis_label(min_val);
    let max_label = format_axis_label(max_val);
    let reserved = min_label.width() + max_label.width() + 2;
    let bar_width = width.min((area.width as usize).saturating_sub(reserved));
    if bar_width == 0 || area.height == 0 {
        return;
    }

    let total = reserved + bar_width;
    let start = area.x + ((area.width as usize).saturating_sub(total) / 2) as u16;
    let bar_start = start + min_label.width() as u16 + 1;

    let buf = f.buffer_mut();
    put_text(buf, start, area.y, &min_label, colors.green);
    for i in 0..bar_width {
        let t = i as f64 / (bar_width.max(2) - 1) as f64;
        if let Some(cell) = buf.cell_mut((bar_start + i as u16, area.y)) {
            cell.set_char('█').set_fg(coolwarm(t));
        }
    }
    put_text(
        buf,
        bar_start + bar_width as u16 + 1,
        area.y,
        &max_label,
        colors.green,
    );
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, state: &ViewerState, colors: &ThemeColors) {
    let help = match state.view_mode {
        ViewMode::Chart => "T: Theme | q/Esc: Close",
        ViewMode::Surface => {
            "h/l: Azimuth | j/k: Elevation | r: Reset | Tab: Heatmap | T: Theme | q/Esc: Close"
        },
        ViewMode::Heatmap => "Tab: Surface | T: Theme | q/Esc: Close",
    };
    let paragraph = Paragraph::new(help)
        .style(Style::default().fg(colors.green))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
