//! Elliptic arc curve.

use std::f64::consts::TAU;

use kerf_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// An elliptic arc: `point(theta) = center + cos(theta) * vector0 +
/// sin(theta) * vector90`, swept from `start_angle` over `sweep` radians.
///
/// `vector0` and `vector90` are the axis vectors at angles 0 and 90
/// degrees; for a circle they are perpendicular with equal length, but the
/// parameterization does not require that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point3,
    pub vector0: Vector3,
    pub vector90: Vector3,
    pub start_angle: f64,
    pub sweep: f64,
}

impl Arc {
    pub fn new(
        center: Point3,
        vector0: Vector3,
        vector90: Vector3,
        start_angle: f64,
        sweep: f64,
    ) -> Self {
        Self {
            center,
            vector0,
            vector90,
            start_angle,
            sweep,
        }
    }

    /// Full circle of `radius` in the xy plane.
    pub fn circle_xy(center: Point3, radius: f64) -> Self {
        Self::new(
            center,
            Vector3::X * radius,
            Vector3::Y * radius,
            0.0,
            TAU,
        )
    }

    /// Angle at sweep fraction `f` in `[0, 1]`.
    pub fn angle_at(&self, f: f64) -> f64 {
        self.start_angle + f * self.sweep
    }

    pub fn point_at_angle(&self, theta: f64) -> Point3 {
        self.center + theta.cos() * self.vector0 + theta.sin() * self.vector90
    }

    /// Derivative with respect to the angle parameter.
    pub fn derivative_at_angle(&self, theta: f64) -> Vector3 {
        -theta.sin() * self.vector0 + theta.cos() * self.vector90
    }

    pub fn is_full_sweep(&self) -> bool {
        (self.sweep.abs() - TAU).abs() < 1e-12
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_math::DVec3;
    use std::f64::consts::PI;

    #[test]
    fn test_circle_points() {
        let arc = Arc::circle_xy(DVec3::ZERO, 2.0);
        let p0 = arc.point_at_angle(0.0);
        assert!((p0 - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-12);
        let p90 = arc.point_at_angle(PI / 2.0);
        assert!((p90 - DVec3::new(0.0, 2.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_derivative_matches_difference() {
        let arc = Arc::new(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(2.0, 0.5, 0.0),
            DVec3::new(-0.25, 1.5, 0.5),
            0.3,
            2.0,
        );
        let h = 1e-6;
        for &theta in &[0.0, 0.7, 2.1] {
            let numeric =
                (arc.point_at_angle(theta + h) - arc.point_at_angle(theta - h)) / (2.0 * h);
            assert!((arc.derivative_at_angle(theta) - numeric).length() < 1e-6);
        }
    }

    #[test]
    fn test_angle_at_fraction() {
        let arc = Arc::new(DVec3::ZERO, DVec3::X, DVec3::Y, 1.0, 2.0);
        assert!((arc.angle_at(0.0) - 1.0).abs() < 1e-14);
        assert!((arc.angle_at(1.0) - 3.0).abs() < 1e-14);
        assert!((arc.angle_at(0.5) - 2.0).abs() < 1e-14);
    }
}
