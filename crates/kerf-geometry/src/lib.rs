//! Kerf geometry: Bezier patch evaluation and wire moment integration.

pub mod bezier;
pub mod curve;
pub mod moments;
pub mod quadrature;
pub mod stroke;

pub use curve::{Arc, BSplineCurve, CurvePrimitive, Line, LineString, UnsupportedKind};
pub use moments::{RotationalMomentAccumulator, WireMomentAccumulator};
pub use quadrature::QuadratureRule;
pub use stroke::StrokeOptions;
