//! Line segment curve.

use kerf_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        self.start + t * (self.end - self.start)
    }

    /// Derivative with respect to the `[0, 1]` parameter (constant).
    pub fn derivative(&self) -> Vector3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.derivative().length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_math::DVec3;

    #[test]
    fn test_line_point_at() {
        let line = Line::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 4.0, 6.0));
        let p = line.point_at(0.5);
        assert!((p - DVec3::new(1.0, 2.0, 3.0)).length() < 1e-12);
    }

    #[test]
    fn test_line_endpoints() {
        let line = Line::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 5.0, 6.0));
        assert!((line.point_at(0.0) - line.start).length() < 1e-12);
        assert!((line.point_at(1.0) - line.end).length() < 1e-12);
    }

    #[test]
    fn test_line_length() {
        let line = Line::new(DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0));
        assert!((line.length() - 5.0).abs() < 1e-12);
    }
}
