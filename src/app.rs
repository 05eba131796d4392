//! Plot pipeline and the interactive chart window.
//!
//! Each command runs load, optional reshape, render and show in order. The
//! builders stop before the terminal is touched, so every data error is
//! reported on a normal screen.

use crate::chart::{AxisLabels, Chart};
use crate::data::{load_table, reshape_to_grid};
use crate::error::Result;
use crate::overlay::Scenario;
use crate::util::layout_config::PlotConfig;
use crate::viewer::{ui, ViewerState};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Load a two-column file and queue it with its overlay markers.
///
/// The overlay comes from `scenario`, or from the file name when `None`.
pub fn build_line_chart(
    path: &Path,
    scenario: Option<Scenario>,
    config: &PlotConfig,
) -> Result<Chart> {
    let table = load_table(path, config.data.delimiter)?;
    let scenario = match scenario {
        Some(s) => s,
        None => Scenario::from_path(path)?,
    };
    debug!("Using {} overlay for {}", scenario, path.display());

    let mut chart = Chart::new(chart_title(path));
    chart.render_2d(&table, &[scenario.overlay()], AxisLabels::xy("x", "y"))?;
    Ok(chart)
}

/// Load a three-column file, reshape it onto the fixed grid and queue the
/// surface.
pub fn build_surface_chart(path: &Path, config: &PlotConfig) -> Result<Chart> {
    let table = load_table(path, config.data.delimiter)?;
    let grid = reshape_to_grid(&table, config.data.grid_columns, config.data.grid_rows)?;

    let mut chart = Chart::new(chart_title(path));
    chart.render_surface(grid, AxisLabels::xyz("X Label", "Y Label", "Z Label"));
    Ok(chart)
}

fn chart_title(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Display `chart` and block until the user closes the window.
pub fn show(chart: &Chart, config: &PlotConfig) -> Result<()> {
    info!("Showing chart {:?}", chart.title());

    enable_raw_mode()?;
    let mut terminal = enter_or_restore(enter_terminal, restore_terminal)?;

    let mut state = ViewerState::new(chart, &config.surface);
    let res = run_viewer(&mut terminal, chart, &mut state, config);

    restore_terminal()?;
    terminal.show_cursor()?;

    info!("Chart window closed");
    res
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run `enter` with raw mode already on. If it fails, `restore` runs before
/// the error is returned.
fn enter_or_restore<T>(
    enter: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    enter().or_else(|err| {
        if let Err(restore_err) = restore() {
            warn!("Failed to restore terminal: {}", restore_err);
        }
        Err(err)
    })
}

fn run_viewer<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    chart: &Chart,
    state: &mut ViewerState,
    config: &PlotConfig,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw_viewer(f, chart, state, config))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(state, key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press. Returns `false` when the window should close.
pub fn handle_key(state: &mut ViewerState, key: KeyEvent) -> bool {
    debug!("Key {:?} in {} view", key.code, state.view_mode.name());
    match (key.modifiers, key.code) {
        // Close
        (_, KeyCode::Esc)
        | (KeyModifiers::NONE, KeyCode::Char('q'))
        | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return false,

        // Camera
        (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
            state.rotate(-1.0);
        },
        (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
            state.rotate(1.0);
        },
        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            state.tilt(1.0);
        },
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            state.tilt(-1.0);
        },
        (KeyModifiers::NONE, KeyCode::Char('r')) => {
            state.reset_view();
            state.set_status("View reset".to_string());
        },

        // View mode and theme
        (KeyModifiers::NONE, KeyCode::Tab) => {
            state.cycle_view_mode();
            state.set_status(format!("View: {}", state.view_mode.name()));
        },
        (_, KeyCode::Char('T')) => {
            state.cycle_theme();
            state.set_status(format!("Theme: {}", state.theme.name()));
        },

        _ => state.clear_status(),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SeriesStyle;
    use crate::data::{Grid, Table};
    use crate::error::PlotError;
    use crate::ui::Theme;
    use crate::viewer::ViewMode;
    use std::fs;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn surface_state() -> ViewerState {
        let table = Table::from_rows(&[vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 1.0]]).unwrap();
        let mut chart = Chart::new("s");
        chart.render_surface(Grid::reshape(&table, 2, 1).unwrap(), AxisLabels::default());
        ViewerState::new(&chart, &PlotConfig::default().surface)
    }

    #[test]
    fn failed_terminal_setup_restores_raw_mode() {
        let mut restored = false;
        let res: io::Result<()> = enter_or_restore(
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || {
                restored = true;
                Ok(())
            },
        );
        assert_eq!(res.unwrap_err().to_string(), "no tty");
        assert!(restored);

        let mut restored = false;
        let res = enter_or_restore(
            || Ok(7),
            || {
                restored = true;
                Ok(())
            },
        );
        assert_eq!(res.unwrap(), 7);
        assert!(!restored);
    }

    #[test]
    fn quit_keys_close_the_window() {
        let mut state = surface_state();
        assert!(!handle_key(&mut state, key(KeyCode::Char('q'))));
        assert!(!handle_key(&mut state, key(KeyCode::Esc)));
        assert!(!handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn camera_keys_move_the_surface() {
        let mut state = surface_state();
        assert!(handle_key(&mut state, key(KeyCode::Char('l'))));
        assert_eq!(state.azimuth, -55.0);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.elevation, 25.0);
        handle_key(&mut state, key(KeyCode::Char('r')));
        assert_eq!((state.azimuth, state.elevation), (-60.0, 30.0));
        assert_eq!(state.status_message.as_deref(), Some("View reset"));
    }

    #[test]
    fn tab_and_theme_report_status() {
        let mut state = surface_state();
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.view_mode, ViewMode::Heatmap);
        assert_eq!(state.status_message.as_deref(), Some("View: Heatmap"));

        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT),
        );
        assert_eq!(state.theme, Theme::GruvboxLight);

        handle_key(&mut state, key(KeyCode::Char('x')));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn line_chart_uses_overlay_from_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic");
        fs::write(&path, "1 3\n2 5\n3 2\n").unwrap();

        let chart = build_line_chart(&path, None, &PlotConfig::default()).unwrap();
        assert_eq!(chart.title(), "basic");
        let series = chart.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points(), vec![(1.0, 3.0), (2.0, 5.0), (3.0, 2.0)]);
        assert_eq!(series[1].style, SeriesStyle::Markers);
        assert_eq!(series[1].x, vec![1.0, 2.0, 3.0]);
        assert_eq!(series[1].y, vec![3.0, 5.0, 2.0]);
    }

    #[test]
    fn unknown_file_name_needs_explicit_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mystery");
        fs::write(&path, "1 3\n2 5\n").unwrap();

        let err = build_line_chart(&path, None, &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, PlotError::MissingOverlay { .. }));

        let chart =
            build_line_chart(&path, Some(Scenario::Line), &PlotConfig::default()).unwrap();
        assert_eq!(chart.series()[1].x, vec![1.0, 2.0]);
    }

    #[test]
    fn surface_chart_requires_the_full_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short");
        fs::write(&path, "0 0 0\n1 0 1\n").unwrap();

        let err = build_surface_chart(&path, &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, PlotError::Shape { found: 2, .. }));
    }
}
