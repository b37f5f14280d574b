//! Bezier basis functions and tensor-product patch evaluation.

mod basis;
mod grid;
mod patch;
mod pole;

pub use basis::{
    evaluate_basis_functions, evaluate_derivative_basis_functions, MAX_BEZIER_CURVE_ORDER,
    MAX_BEZIER_ORDER,
};
pub use grid::{evaluate_grid, evaluate_grid_direct};
pub use patch::{evaluate_points, evaluate_points_with_partials};
pub use pole::Pole;
