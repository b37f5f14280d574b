//! Polyline curve.

use kerf_math::Point3;
use serde::{Deserialize, Serialize};

use super::Line;

/// A polyline through an ordered point list; each consecutive pair is a
/// straight segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineString {
    pub points: Vec<Point3>,
}

impl LineString {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Iterate the consecutive segments.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }
}
