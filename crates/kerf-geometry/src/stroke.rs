//! Stroke density options for curve discretization.

use kerf_math::Point3;
use serde::{Deserialize, Serialize};

/// Controls how densely curved primitives are split before quadrature.
///
/// Stroke parameters are always emitted as fractions of the local Bezier
/// segment (or sub-arc), never as global curve fractions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrokeOptions {
    /// Maximum tangent turning per stroke, in radians.
    pub angle_tolerance: f64,
    /// Maximum chord deviation; `0.0` disables the chord criterion.
    pub chord_tolerance: f64,
    /// Lower bound on the stroke count of any single segment.
    pub min_strokes: usize,
}

impl StrokeOptions {
    pub const DEFAULT_ANGLE_TOLERANCE: f64 = 0.1;

    pub fn new(angle_tolerance: f64) -> Self {
        Self {
            angle_tolerance,
            chord_tolerance: 0.0,
            min_strokes: 1,
        }
    }

    /// Stroke count for an arc sweeping `sweep` radians.
    pub fn arc_stroke_count(&self, sweep: f64) -> usize {
        let by_angle = (sweep.abs() / self.angle_tolerance).ceil() as usize;
        by_angle.max(self.min_strokes).max(1)
    }

    /// Stroke count for a Bezier segment, from the total turning of its
    /// control polygon.
    pub fn bezier_stroke_count(&self, poles: &[Point3]) -> usize {
        let mut turning = 0.0;
        let mut prev: Option<kerf_math::Vector3> = None;
        for w in poles.windows(2) {
            let edge = w[1] - w[0];
            if edge.length() < 1e-14 {
                continue;
            }
            if let Some(p) = prev {
                turning += p.angle_between(edge);
            }
            prev = Some(edge);
        }
        let by_angle = (turning / self.angle_tolerance).ceil() as usize;
        by_angle.max(self.min_strokes).max(1)
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANGLE_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_math::DVec3;
    use std::f64::consts::TAU;

    #[test]
    fn test_arc_stroke_count_default() {
        let options = StrokeOptions::default();
        // Full circle at 0.1 rad per stroke.
        assert_eq!(options.arc_stroke_count(TAU), 63);
        // Tiny sweeps still get one stroke.
        assert_eq!(options.arc_stroke_count(1e-6), 1);
        // Sign of the sweep does not matter.
        assert_eq!(options.arc_stroke_count(-TAU), 63);
    }

    #[test]
    fn test_straight_polygon_single_stroke() {
        let options = StrokeOptions::default();
        let poles = [
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(options.bezier_stroke_count(&poles), 1);
    }

    #[test]
    fn test_bent_polygon_strokes() {
        let options = StrokeOptions::default();
        // One right-angle turn: about PI/2 of turning.
        let poles = [
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        ];
        let n = options.bezier_stroke_count(&poles);
        assert!(n >= 15 && n <= 17, "expected ~16 strokes, got {}", n);
    }
}
