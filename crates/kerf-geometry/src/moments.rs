//! Second-moment integration over curve primitive collections.
//!
//! Two accumulators fold curve primitives into a running
//! [`MomentProducts`] matrix: [`WireMomentAccumulator`] integrates
//! `sum( X X^T ds )` along the wire, and [`RotationalMomentAccumulator`]
//! additionally weights each differential by its distance from a rotation
//! axis, giving the products of the solid of revolution swept by the wire.

use kerf_core::{KerfError, Result, Tolerance};
use kerf_math::{DVec4, Frame, MomentProducts, Point3, Vector3};

use crate::curve::{Arc, BSplineCurve, BezierSegment, CurvePrimitive, Line, LineString};
use crate::quadrature::QuadratureRule;
use crate::stroke::StrokeOptions;

/// Gauss point count used by both accumulators unless overridden.
pub const DEFAULT_GAUSS_POINTS: usize = 7;

fn homogeneous_point(p: Point3) -> DVec4 {
    DVec4::new(p.x, p.y, p.z, 1.0)
}

fn homogeneous_vector(v: Vector3) -> DVec4 {
    DVec4::new(v.x, v.y, v.z, 0.0)
}

/// Accumulates unweighted wire moment products `sum( X X^T ds )` about the
/// world origin.
///
/// One instance owns one traversal; announce each primitive in turn, then
/// snapshot with [`try_get_products`](Self::try_get_products). Matrices
/// from independent accumulators may be summed afterward.
#[derive(Debug, Clone)]
pub struct WireMomentAccumulator {
    products: MomentProducts,
    gauss: QuadratureRule,
    options: StrokeOptions,
    tolerance: Tolerance,
}

impl WireMomentAccumulator {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_GAUSS_POINTS, StrokeOptions::default())
    }

    pub fn with_options(num_gauss_points: usize, options: StrokeOptions) -> Self {
        Self {
            products: MomentProducts::zero(),
            gauss: QuadratureRule::gauss(num_gauss_points),
            options,
            tolerance: Tolerance::default_precision(),
        }
    }

    /// Fold one primitive into the running products.
    ///
    /// Unsupported kinds contribute zero. The only failure is a B-spline
    /// whose order exceeds the evaluation maximum.
    pub fn announce(&mut self, primitive: &CurvePrimitive) -> Result<()> {
        match primitive {
            CurvePrimitive::Line(line) => {
                self.accumulate_line(line);
                Ok(())
            }
            CurvePrimitive::Arc(arc) => {
                self.accumulate_arc(arc);
                Ok(())
            }
            CurvePrimitive::LineString(ls) => {
                self.accumulate_linestring(ls, None);
                Ok(())
            }
            CurvePrimitive::BSpline(curve) => self.accumulate_bspline(curve),
            CurvePrimitive::Unsupported(_) => Ok(()),
        }
    }

    /// Snapshot of the accumulated products; zero if nothing was visited.
    pub fn try_get_products(&self) -> MomentProducts {
        self.products
    }

    /// Closed-form strip integral: with `U = [p0, 1]`, `V = [p1 - p0, 0]`,
    /// the products of `X(t) = U + t V` over `[0, 1]` are
    /// `L (U U^T + (U V^T + V U^T) / 2 + V V^T / 3)`.
    fn accumulate_line(&mut self, line: &Line) {
        let delta = line.derivative();
        let length = delta.length();
        if self.tolerance.is_zero(length) {
            return;
        }
        let u = homogeneous_point(line.start);
        let v = homogeneous_vector(delta);
        self.products.add_scaled_outer_product(u, length);
        self.products.add_symmetric_product_pair(u, v, 0.5 * length);
        self.products.add_scaled_outer_product(v, length / 3.0);
    }

    fn accumulate_arc(&mut self, arc: &Arc) {
        let strokes = self.options.arc_stroke_count(arc.sweep);
        let df = 1.0 / strokes as f64;
        for k in 0..strokes {
            let f0 = k as f64 * df;
            for (f, w) in self.gauss.map_to(f0, f0 + df) {
                let theta = arc.angle_at(f);
                let point = arc.point_at_angle(theta);
                // dX/df = sweep * dX/dtheta
                let tangent = arc.derivative_at_angle(theta) * arc.sweep;
                self.products.add_scaled_point(point, tangent.length() * w);
            }
        }
    }

    /// `_interval` is a sub-curve restriction that is accepted but not yet
    /// honored; partial line-string semantics are undefined upstream.
    fn accumulate_linestring(&mut self, ls: &LineString, _interval: Option<(f64, f64)>) {
        for segment in ls.segments() {
            self.accumulate_line(&segment);
        }
    }

    fn accumulate_bspline(&mut self, curve: &BSplineCurve) -> Result<()> {
        for segment in curve.decompose_bezier() {
            self.accumulate_bezier_segment(&segment)?;
        }
        Ok(())
    }

    fn accumulate_bezier_segment(&mut self, segment: &BezierSegment) -> Result<()> {
        let strokes = self.options.bezier_stroke_count(&segment.poles);
        let df = 1.0 / strokes as f64;
        for k in 0..strokes {
            let f0 = k as f64 * df;
            for (f, w) in self.gauss.map_to(f0, f0 + df) {
                let point = segment.point_at(f)?;
                let tangent = segment.derivative_at(f)?;
                self.products.add_scaled_point(point, tangent.length() * w);
            }
        }
        Ok(())
    }
}

impl Default for WireMomentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates rotational sweep moment products: each wire differential is
/// weighted by its planar distance from a rotation axis.
///
/// Geometry is mapped into a local frame whose z axis is the rotation
/// axis; the accumulated matrix is expressed in that frame and must be
/// read together with the frame
/// ([`products_and_frame`](Self::products_and_frame)).
#[derive(Debug, Clone)]
pub struct RotationalMomentAccumulator {
    products: MomentProducts,
    frame: Frame,
    gauss: QuadratureRule,
    options: StrokeOptions,
    tolerance: Tolerance,
}

impl RotationalMomentAccumulator {
    /// Fails with `DegenerateGeometry` when `axis_direction` has zero or
    /// near-zero length.
    pub fn new(axis_point: Point3, axis_direction: Vector3) -> Result<Self> {
        Self::with_options(
            axis_point,
            axis_direction,
            DEFAULT_GAUSS_POINTS,
            StrokeOptions::default(),
        )
    }

    pub fn with_options(
        axis_point: Point3,
        axis_direction: Vector3,
        num_gauss_points: usize,
        options: StrokeOptions,
    ) -> Result<Self> {
        let frame = Frame::from_z_direction(axis_point, axis_direction).ok_or_else(|| {
            KerfError::DegenerateGeometry("rotation axis direction has zero length".into())
        })?;
        Ok(Self {
            products: MomentProducts::zero(),
            frame,
            gauss: QuadratureRule::gauss(num_gauss_points),
            options,
            tolerance: Tolerance::default_precision(),
        })
    }

    /// The local-to-world frame the products are expressed against.
    pub fn local_to_world(&self) -> &Frame {
        &self.frame
    }

    pub fn announce(&mut self, primitive: &CurvePrimitive) -> Result<()> {
        match primitive {
            CurvePrimitive::Line(line) => {
                self.accumulate_line(line);
                Ok(())
            }
            CurvePrimitive::Arc(arc) => {
                self.accumulate_arc(arc);
                Ok(())
            }
            CurvePrimitive::LineString(ls) => {
                for segment in ls.segments() {
                    self.accumulate_line(&segment);
                }
                Ok(())
            }
            CurvePrimitive::BSpline(curve) => self.accumulate_bspline(curve),
            CurvePrimitive::Unsupported(_) => Ok(()),
        }
    }

    pub fn try_get_products(&self) -> MomentProducts {
        self.products
    }

    /// Snapshot of the local-frame products and the frame itself.
    pub fn products_and_frame(&self) -> (MomentProducts, Frame) {
        (self.products, self.frame)
    }

    fn add_weighted_sample(&mut self, local_point: Point3, arc_weight: f64) {
        let axis_distance = (local_point.x * local_point.x + local_point.y * local_point.y).sqrt();
        self.products
            .add_scaled_point(local_point, arc_weight * axis_distance);
    }

    /// The planar distance factor is not polynomial in the parameter, so
    /// lines integrate by quadrature here, unlike the wire closed form.
    fn accumulate_line(&mut self, line: &Line) {
        let p0 = self.frame.point_to_local(line.start);
        let p1 = self.frame.point_to_local(line.end);
        let delta = p1 - p0;
        let length = delta.length();
        if self.tolerance.is_zero(length) {
            return;
        }
        let samples: Vec<(f64, f64)> = self.gauss.map_to(0.0, 1.0).collect();
        for (t, w) in samples {
            self.add_weighted_sample(p0 + t * delta, length * w);
        }
    }

    fn accumulate_arc(&mut self, arc: &Arc) {
        let local = Arc::new(
            self.frame.point_to_local(arc.center),
            self.frame.vector_to_local(arc.vector0),
            self.frame.vector_to_local(arc.vector90),
            arc.start_angle,
            arc.sweep,
        );
        let strokes = self.options.arc_stroke_count(local.sweep);
        let df = 1.0 / strokes as f64;
        for k in 0..strokes {
            let f0 = k as f64 * df;
            let samples: Vec<(f64, f64)> = self.gauss.map_to(f0, f0 + df).collect();
            for (f, w) in samples {
                let theta = local.angle_at(f);
                let point = local.point_at_angle(theta);
                let tangent = local.derivative_at_angle(theta) * local.sweep;
                self.add_weighted_sample(point, tangent.length() * w);
            }
        }
    }

    fn accumulate_bspline(&mut self, curve: &BSplineCurve) -> Result<()> {
        for segment in curve.decompose_bezier() {
            // Map the segment poles into the axis frame before stroking.
            let local = BezierSegment {
                poles: segment
                    .poles
                    .iter()
                    .map(|p| self.frame.point_to_local(*p))
                    .collect(),
                knot_range: segment.knot_range,
            };
            let strokes = self.options.bezier_stroke_count(&local.poles);
            let df = 1.0 / strokes as f64;
            for k in 0..strokes {
                let f0 = k as f64 * df;
                let samples: Vec<(f64, f64)> = self.gauss.map_to(f0, f0 + df).collect();
                for (f, w) in samples {
                    let point = local.point_at(f)?;
                    let tangent = local.derivative_at(f)?;
                    self.add_weighted_sample(point, tangent.length() * w);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::UnsupportedKind;
    use kerf_math::DVec3;
    use std::f64::consts::TAU;

    #[test]
    fn test_empty_accumulator_is_zero() {
        let accumulator = WireMomentAccumulator::new();
        assert_eq!(accumulator.try_get_products(), MomentProducts::zero());
    }

    #[test]
    fn test_unsupported_kind_is_noop() {
        let mut accumulator = WireMomentAccumulator::new();
        for kind in [
            UnsupportedKind::PointString,
            UnsupportedKind::InterpolationCurve,
            UnsupportedKind::Spiral,
            UnsupportedKind::ChildVector,
            UnsupportedKind::AkimaCurve,
            UnsupportedKind::PartialCurve,
        ] {
            accumulator
                .announce(&CurvePrimitive::Unsupported(kind))
                .unwrap();
        }
        assert_eq!(accumulator.try_get_products(), MomentProducts::zero());
    }

    #[test]
    fn test_unit_line_products() {
        // Unit x-axis line: W = 1, integral x ds = 1/2, integral x^2 ds = 1/3.
        let mut accumulator = WireMomentAccumulator::new();
        accumulator
            .announce(&CurvePrimitive::Line(Line::new(
                DVec3::ZERO,
                DVec3::new(1.0, 0.0, 0.0),
            )))
            .unwrap();
        let m = accumulator.try_get_products();
        assert!((m.coff[3][3] - 1.0).abs() < 1e-14);
        assert!((m.coff[0][3] - 0.5).abs() < 1e-14);
        assert!((m.coff[0][0] - 1.0 / 3.0).abs() < 1e-14);
        assert!(m.coff[1][1].abs() < 1e-14);
        assert!(m.coff[2][2].abs() < 1e-14);
    }

    #[test]
    fn test_circle_length_and_inertia() {
        // Circle radius r about the origin: length 2 pi r, and
        // integral x^2 ds = integral y^2 ds = pi r^3.
        let r = 2.0;
        let mut accumulator = WireMomentAccumulator::new();
        accumulator
            .announce(&CurvePrimitive::Arc(Arc::circle_xy(DVec3::ZERO, r)))
            .unwrap();
        let m = accumulator.try_get_products();
        assert!((m.coff[3][3] - TAU * r).abs() < 1e-9);
        let expected = std::f64::consts::PI * r * r * r;
        assert!((m.coff[0][0] - expected).abs() < 1e-9);
        assert!((m.coff[1][1] - expected).abs() < 1e-9);
        // First moments vanish by symmetry.
        assert!(m.coff[0][3].abs() < 1e-9);
        assert!(m.coff[1][3].abs() < 1e-9);
    }

    #[test]
    fn test_collinear_bspline_matches_line() {
        // A quadratic B-spline along the x axis is the segment [0, 2].
        let curve = BSplineCurve::new(
            2,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![
                DVec3::ZERO,
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(2.0, 0.0, 0.0),
            ],
        );
        let mut accumulator = WireMomentAccumulator::new();
        accumulator.announce(&CurvePrimitive::BSpline(curve)).unwrap();
        let m = accumulator.try_get_products();
        assert!((m.coff[3][3] - 2.0).abs() < 1e-12);
        // integral x^2 dx over [0,2] = 8/3.
        assert!((m.coff[0][0] - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotational_degenerate_axis() {
        assert!(matches!(
            RotationalMomentAccumulator::new(DVec3::ZERO, DVec3::ZERO),
            Err(KerfError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_rotational_axis_parallel_line() {
        // A line parallel to the axis at distance d: every sample carries
        // weight d, so W = d * length.
        let d = 3.0;
        let h = 2.0;
        let mut accumulator =
            RotationalMomentAccumulator::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 1.0)).unwrap();
        accumulator
            .announce(&CurvePrimitive::Line(Line::new(
                DVec3::new(d, 0.0, 0.0),
                DVec3::new(d, 0.0, h),
            )))
            .unwrap();
        let (m, frame) = accumulator.products_and_frame();
        assert!((m.coff[3][3] - d * h).abs() < 1e-10);
        // Frame z is the rotation axis.
        assert!((frame.z_axis() - DVec3::Z).length() < 1e-14);
    }

    #[test]
    fn test_rotational_line_on_axis_is_zero() {
        let mut accumulator =
            RotationalMomentAccumulator::new(DVec3::ZERO, DVec3::Z).unwrap();
        accumulator
            .announce(&CurvePrimitive::Line(Line::new(
                DVec3::ZERO,
                DVec3::new(0.0, 0.0, 5.0),
            )))
            .unwrap();
        let m = accumulator.try_get_products();
        for i in 0..4 {
            for j in 0..4 {
                assert!(m.coff[i][j].abs() < 1e-12);
            }
        }
    }
}
