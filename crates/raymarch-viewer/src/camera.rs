use glam::Vec3;

/// Camera circling the origin in the X-Z plane at a fixed height.
///
/// The position is a pure function of the animation tick; the camera holds no
/// state of its own.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub radius: f32,
    pub height: f32,
    /// Ticks per radian.
    pub ticks_per_radian: f64,
    pub target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 4.0,
            height: 0.9,
            ticks_per_radian: 100.0,
            target: Vec3::ZERO,
        }
    }
}

impl OrbitCamera {
    /// Camera position at `tick`: `(r·sin(t/k), h, r·cos(t/k))`.
    pub fn position(&self, tick: f64) -> Vec3 {
        // Angle in f64 so long sessions do not lose precision.
        let angle = tick / self.ticks_per_radian;
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.radius * sin as f32,
            self.height,
            self.radius * cos as f32,
        )
    }

    pub fn look_at(&self) -> Vec3 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_positive_z() {
        let p = OrbitCamera::default().position(0.0);
        assert_eq!(p, Vec3::new(0.0, 0.9, 4.0));
    }

    #[test]
    fn stays_on_radius_four_circle() {
        let cam = OrbitCamera::default();
        for i in 0..2_000 {
            let p = cam.position(i as f64 * 0.5);
            assert!((p.x * p.x + p.z * p.z - 16.0).abs() < 1e-4, "tick {i}: {p}");
            assert_eq!(p.y, 0.9);
        }
    }

    #[test]
    fn quarter_turn_reaches_positive_x() {
        let p = OrbitCamera::default().position(100.0 * std::f64::consts::FRAC_PI_2);
        assert!((p.x - 4.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn looks_at_origin() {
        assert_eq!(OrbitCamera::default().look_at(), Vec3::ZERO);
    }
}
