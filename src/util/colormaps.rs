//! Color mapping functions for surface visualization.

use ratatui::style::Color;

/// Coolwarm stops at t = 0, 0.25, 0.5, 0.75, 1.
const COOLWARM: [(f64, f64, f64); 5] = [
    (59.0, 76.0, 192.0),
    (141.0, 176.0, 254.0),
    (221.0, 221.0, 221.0),
    (244.0, 154.0, 123.0),
    (180.0, 4.0, 38.0),
];

/// Coolwarm diverging colormap approximation.
///
/// `t` is clamped to `0.0..=1.0`; NaN maps to the midpoint.
pub fn coolwarm(t: f64) -> Color {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };

    let segments = (COOLWARM.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(COOLWARM.len() - 2);
    let local = pos - i as f64;

    let (r0, g0, b0) = COOLWARM[i];
    let (r1, g1, b1) = COOLWARM[i + 1];
    let lerp = |a: f64, b: f64| (a + (b - a) * local).round() as u8;

    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Normalize `value` into `0.0..=1.0` over `[min, max]`.
///
/// A degenerate range maps everything to the midpoint.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < 1e-10 {
        0.5
    } else {
        ((value - min) / range).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_blue_and_red() {
        assert_eq!(coolwarm(0.0), Color::Rgb(59, 76, 192));
        assert_eq!(coolwarm(1.0), Color::Rgb(180, 4, 38));
        assert_eq!(coolwarm(0.5), Color::Rgb(221, 221, 221));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(coolwarm(-3.0), coolwarm(0.0));
        assert_eq!(coolwarm(7.0), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), coolwarm(0.5));
    }

    #[test]
    fn normalize_handles_flat_range() {
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(-1.0, 0.0, 10.0), 0.0);
    }
}
