//! Curve primitives consumed by the moment integration engine.

mod arc;
mod bspline;
mod line;
mod linestring;

pub use arc::Arc;
pub use bspline::{BSplineCurve, BezierSegment};
pub use line::Line;
pub use linestring::LineString;

use serde::{Deserialize, Serialize};

/// Tagged union over the curve primitive kinds the moment engine handles.
///
/// Kinds outside the engine's scope travel through the `Unsupported` arm
/// and contribute exactly zero to any accumulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CurvePrimitive {
    Line(Line),
    Arc(Arc),
    LineString(LineString),
    BSpline(BSplineCurve),
    Unsupported(UnsupportedKind),
}

/// Primitive kinds the moment engine deliberately does not integrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsupportedKind {
    PointString,
    InterpolationCurve,
    Spiral,
    ChildVector,
    AkimaCurve,
    PartialCurve,
}
