//! Fixed configuration for loading, generating and drawing plots.

/// Input parsing and grid configuration.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Field separator for input tables.
    pub delimiter: char,
    /// Mesh columns (X steps) of a surface file.
    pub grid_columns: usize,
    /// Mesh rows (Y steps) of a surface file.
    pub grid_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            delimiter: ' ',
            grid_columns: 60,
            grid_rows: 90,
        }
    }
}

/// Configuration for sample file generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// X step for curve samples.
    pub curve_step: f64,
    /// X and Y step for surface samples.
    pub surface_step: f64,
    /// First X of the surface samples.
    pub surface_x_start: f64,
    /// First Y of the surface samples.
    pub surface_y_start: f64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            curve_step: 0.01,
            surface_step: 0.1,
            surface_x_start: -3.0,
            surface_y_start: -5.0,
        }
    }
}

/// Configuration for the 2D chart view.
#[derive(Debug, Clone)]
pub struct ChartLayoutConfig {
    /// Padding factor for Y-axis (0.15 = 15% margin).
    pub y_axis_padding_factor: f64,
}

impl Default for ChartLayoutConfig {
    fn default() -> Self {
        Self {
            y_axis_padding_factor: 0.15,
        }
    }
}

/// Configuration for the surface and heatmap views.
#[derive(Debug, Clone)]
pub struct SurfaceLayoutConfig {
    /// Initial azimuth in degrees.
    pub azimuth: f64,
    /// Initial elevation in degrees.
    pub elevation: f64,
    /// Degrees per rotation key press.
    pub rotation_step: f64,
    /// Terminal characters per heatmap pixel horizontally.
    pub pixel_width: usize,
    /// Width of colorbar in characters.
    pub colorbar_width: usize,
}

impl Default for SurfaceLayoutConfig {
    fn default() -> Self {
        Self {
            azimuth: -60.0,
            elevation: 30.0,
            rotation_step: 5.0,
            pixel_width: 2, // 2:1 aspect ratio correction
            colorbar_width: 40,
        }
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Default)]
pub struct PlotConfig {
    /// Input data configuration.
    pub data: DataConfig,
    /// Sample generation configuration.
    pub generate: GenerateConfig,
    /// 2D chart view.
    pub chart: ChartLayoutConfig,
    /// Surface views.
    pub surface: SurfaceLayoutConfig,
}
