//! Orthographic camera for the surface view.

/// Camera looking at the origin from azimuth/elevation angles.
///
/// Azimuth is measured in the x-y plane from +x towards +y; elevation is
/// the angle above that plane.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    sin_az: f64,
    cos_az: f64,
    sin_el: f64,
    cos_el: f64,
}

impl Projection {
    /// Camera at `azimuth` and `elevation` degrees.
    pub fn new(azimuth: f64, elevation: f64) -> Self {
        let (sin_az, cos_az) = azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = elevation.to_radians().sin_cos();
        Self {
            sin_az,
            cos_az,
            sin_el,
            cos_el,
        }
    }

    /// Screen coordinates of `p`: right, then up.
    pub fn project(&self, p: [f64; 3]) -> (f64, f64) {
        let [x, y, z] = p;
        let along = x * self.cos_az + y * self.sin_az;
        let right = -x * self.sin_az + y * self.cos_az;
        let up = -along * self.sin_el + z * self.cos_el;
        (right, up)
    }

    /// Distance towards the camera; larger is nearer.
    pub fn depth(&self, p: [f64; 3]) -> f64 {
        let [x, y, z] = p;
        (x * self.cos_az + y * self.sin_az) * self.cos_el + z * self.sin_el
    }
}

/// Map `value` from `[min, max]` onto `[-1, 1]`. A flat range maps to 0.
pub fn to_unit(value: f64, (min, max): (f64, f64)) -> f64 {
    let range = max - min;
    if range.abs() < 1e-12 {
        0.0
    } else {
        2.0 * (value - min) / range - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-12 && (a.1 - b.1).abs() < 1e-12
    }

    #[test]
    fn side_view_shows_y_right_and_z_up() {
        let cam = Projection::new(0.0, 0.0);
        assert!(close(cam.project([0.0, 1.0, 0.0]), (1.0, 0.0)));
        assert!(close(cam.project([0.0, 0.0, 1.0]), (0.0, 1.0)));
        assert!(close(cam.project([1.0, 0.0, 0.0]), (0.0, 0.0)));
        assert!(cam.depth([1.0, 0.0, 0.0]) > cam.depth([-1.0, 0.0, 0.0]));
    }

    #[test]
    fn top_view_flattens_z() {
        let cam = Projection::new(0.0, 90.0);
        assert!(close(cam.project([0.0, 0.0, 1.0]), (0.0, 0.0)));
        assert!(close(cam.project([-1.0, 0.0, 0.0]), (0.0, 1.0)));
        assert!(cam.depth([0.0, 0.0, 1.0]) > cam.depth([0.0, 0.0, -1.0]));
    }

    #[test]
    fn unit_mapping() {
        assert_eq!(to_unit(-3.0, (-3.0, 3.0)), -1.0);
        assert_eq!(to_unit(3.0, (-3.0, 3.0)), 1.0);
        assert_eq!(to_unit(0.0, (-3.0, 3.0)), 0.0);
        assert_eq!(to_unit(7.0, (7.0, 7.0)), 0.0);
    }
}
