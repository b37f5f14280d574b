//! B-spline curves and their Bezier segment decomposition.

use kerf_core::{KerfError, Result};
use kerf_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::bezier::{
    evaluate_basis_functions, evaluate_derivative_basis_functions, MAX_BEZIER_CURVE_ORDER,
};

const KNOT_EQ_TOL: f64 = 1e-12;

/// One polynomial span of a B-spline curve in Bezier form.
///
/// `knot_range` is the source-curve knot interval the segment covers; the
/// segment itself is parameterized by the fraction `[0, 1]` of that
/// interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BezierSegment {
    pub poles: Vec<Point3>,
    pub knot_range: (f64, f64),
}

impl BezierSegment {
    pub fn order(&self) -> usize {
        self.poles.len()
    }

    /// Evaluate at segment fraction `f` in `[0, 1]`.
    pub fn point_at(&self, f: f64) -> Result<Point3> {
        let order = self.order();
        let mut basis = [0.0; MAX_BEZIER_CURVE_ORDER];
        if order > MAX_BEZIER_CURVE_ORDER {
            return Err(KerfError::UnsupportedOrder {
                order,
                max: MAX_BEZIER_CURVE_ORDER,
            });
        }
        evaluate_basis_functions(&mut basis, order, f)?;
        let mut p = Point3::ZERO;
        for (pole, &b) in self.poles.iter().zip(&basis) {
            p += *pole * b;
        }
        Ok(p)
    }

    /// Derivative with respect to the segment fraction at `f`.
    pub fn derivative_at(&self, f: f64) -> Result<Vector3> {
        let order = self.order();
        let mut basis = [0.0; MAX_BEZIER_CURVE_ORDER];
        if order > MAX_BEZIER_CURVE_ORDER {
            return Err(KerfError::UnsupportedOrder {
                order,
                max: MAX_BEZIER_CURVE_ORDER,
            });
        }
        evaluate_derivative_basis_functions(&mut basis, order, f)?;
        let mut d = Vector3::ZERO;
        for (pole, &b) in self.poles.iter().zip(&basis) {
            d += *pole * b;
        }
        Ok(d)
    }
}

/// A clamped B-spline curve defined by degree, knot vector, and control
/// points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BSplineCurve {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<Point3>,
}

impl BSplineCurve {
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<Point3>) -> Self {
        debug_assert!(
            knots.len() == control_points.len() + degree + 1,
            "Knot vector length must be n + p + 1, got {} knots for {} CPs with degree {}",
            knots.len(),
            control_points.len(),
            degree
        );
        Self {
            degree,
            knots,
            control_points,
        }
    }

    pub fn order(&self) -> usize {
        self.degree + 1
    }

    pub fn domain(&self) -> (f64, f64) {
        let p = self.degree;
        (self.knots[p], self.knots[self.knots.len() - p - 1])
    }

    /// Decompose the curve into Bezier segments by saturating every
    /// interior knot to full multiplicity (Boehm insertion), one segment
    /// per non-degenerate knot span.
    pub fn decompose_bezier(&self) -> Vec<BezierSegment> {
        let p = self.degree;
        let mut knots = self.knots.clone();
        let mut cps = self.control_points.clone();
        let (t0, t1) = self.domain();

        // Distinct interior knot values, in order.
        let mut interior: Vec<f64> = Vec::new();
        for &u in &self.knots {
            if u > t0 + KNOT_EQ_TOL && u < t1 - KNOT_EQ_TOL {
                if interior
                    .last()
                    .map_or(true, |&last| (u - last).abs() > KNOT_EQ_TOL)
                {
                    interior.push(u);
                }
            }
        }

        for &u in &interior {
            let multiplicity = knots
                .iter()
                .filter(|&&k| (k - u).abs() < KNOT_EQ_TOL)
                .count();
            for _ in multiplicity..p {
                insert_knot(p, &mut knots, &mut cps, u);
            }
        }

        // After saturation, segment j covers breakpoint j..j+1 with poles
        // starting at j * degree.
        let mut breakpoints = vec![t0];
        breakpoints.extend_from_slice(&interior);
        breakpoints.push(t1);

        let mut segments = Vec::with_capacity(breakpoints.len() - 1);
        for (j, range) in breakpoints.windows(2).enumerate() {
            if range[1] - range[0] <= KNOT_EQ_TOL {
                continue;
            }
            segments.push(BezierSegment {
                poles: cps[j * p..j * p + p + 1].to_vec(),
                knot_range: (range[0], range[1]),
            });
        }
        segments
    }

    /// Evaluate the curve at knot parameter `t` by locating the containing
    /// Bezier segment.
    pub fn point_at(&self, t: f64) -> Result<Point3> {
        let segments = self.decompose_bezier();
        let segment = segments
            .iter()
            .find(|s| t < s.knot_range.1)
            .or(segments.last())
            .ok_or_else(|| KerfError::DegenerateGeometry("empty B-spline curve".into()))?;
        let (a, b) = segment.knot_range;
        segment.point_at((t - a) / (b - a))
    }
}

/// Boehm single-knot insertion at value `u`, preserving the curve shape.
fn insert_knot(p: usize, knots: &mut Vec<f64>, cps: &mut Vec<Point3>, u: f64) {
    // Span index: knots[span] <= u < knots[span + 1].
    let mut span = p;
    while span + 1 < knots.len() - p && knots[span + 1] <= u {
        span += 1;
    }

    let mut new_cps = Vec::with_capacity(cps.len() + 1);
    new_cps.extend_from_slice(&cps[..=span - p]);
    for i in (span - p + 1)..=span {
        let denom = knots[i + p] - knots[i];
        let alpha = if denom.abs() < KNOT_EQ_TOL {
            0.0
        } else {
            (u - knots[i]) / denom
        };
        new_cps.push(cps[i - 1] * (1.0 - alpha) + cps[i] * alpha);
    }
    new_cps.extend_from_slice(&cps[span..]);

    *cps = new_cps;
    knots.insert(span + 1, u);
}
