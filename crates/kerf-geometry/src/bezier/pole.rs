use kerf_math::{DVec3, DVec4};

/// Control-point payload for tensor-product evaluation.
///
/// Implemented for exactly the three pole types the patch evaluators
/// handle: scalars, 3D points, and homogeneous 4D points.
pub trait Pole: Copy {
    const ZERO: Self;

    /// `self + other * factor`
    fn add_scaled(self, other: Self, factor: f64) -> Self;
}

impl Pole for f64 {
    const ZERO: Self = 0.0;

    fn add_scaled(self, other: Self, factor: f64) -> Self {
        self + other * factor
    }
}

impl Pole for DVec3 {
    const ZERO: Self = DVec3::ZERO;

    fn add_scaled(self, other: Self, factor: f64) -> Self {
        self + other * factor
    }
}

impl Pole for DVec4 {
    const ZERO: Self = DVec4::ZERO;

    fn add_scaled(self, other: Self, factor: f64) -> Self {
        self + other * factor
    }
}
