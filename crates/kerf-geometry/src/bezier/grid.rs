//! Tensor-product grid evaluation over precomputed basis tables.

use kerf_core::{KerfError, Result};

use super::basis::MAX_BEZIER_ORDER;
use super::pole::Pole;

fn check_grid_orders(u_order: usize, v_order: usize) -> Result<()> {
    for order in [u_order, v_order] {
        if order == 0 || order > MAX_BEZIER_ORDER {
            return Err(KerfError::UnsupportedOrder {
                order,
                max: MAX_BEZIER_ORDER,
            });
        }
    }
    Ok(())
}

/// Evaluate a `u_order x v_order` pole grid at every combination of
/// precomputed u and v basis tables.
///
/// `u_basis` holds one contiguous `u_order`-wide table per u sample, and
/// `v_basis` likewise per v sample. `poles` is v-major, u-minor. The output
/// receives `u_points * v_points` values, v varying fastest.
///
/// For each u sample the grid is first collapsed along u into `v_order`
/// section poles, which every v sample then combines with its v table, so
/// the per-output cost stays O(u_order) amortized plus O(v_order). On
/// failure nothing is written to `out`.
pub fn evaluate_grid<T: Pole>(
    u_basis: &[f64],
    v_basis: &[f64],
    poles: &[T],
    u_order: usize,
    v_order: usize,
    out: &mut Vec<T>,
) -> Result<()> {
    check_grid_orders(u_order, v_order)?;
    debug_assert_eq!(u_basis.len() % u_order, 0);
    debug_assert_eq!(v_basis.len() % v_order, 0);
    debug_assert_eq!(poles.len(), u_order * v_order);

    let u_points = u_basis.len() / u_order;
    let v_points = v_basis.len() / v_order;

    out.clear();
    out.reserve(u_points * v_points);

    let mut section = [T::ZERO; MAX_BEZIER_ORDER];
    for iu in 0..u_points {
        let bu = &u_basis[iu * u_order..(iu + 1) * u_order];
        // Collapse along u once per u sample.
        for (j, section_pole) in section.iter_mut().take(v_order).enumerate() {
            let row = &poles[j * u_order..(j + 1) * u_order];
            let mut acc = T::ZERO;
            for (pole, &b) in row.iter().zip(bu) {
                acc = acc.add_scaled(*pole, b);
            }
            *section_pole = acc;
        }
        for iv in 0..v_points {
            let bv = &v_basis[iv * v_order..(iv + 1) * v_order];
            let mut acc = T::ZERO;
            for (section_pole, &b) in section.iter().take(v_order).zip(bv) {
                acc = acc.add_scaled(*section_pole, b);
            }
            out.push(acc);
        }
    }
    Ok(())
}

/// Direct double-sum reference evaluation of the same grid.
///
/// O(u_order * v_order) per sample; kept as the verification baseline for
/// [`evaluate_grid`], not for production sampling.
pub fn evaluate_grid_direct<T: Pole>(
    u_basis: &[f64],
    v_basis: &[f64],
    poles: &[T],
    u_order: usize,
    v_order: usize,
    out: &mut Vec<T>,
) -> Result<()> {
    check_grid_orders(u_order, v_order)?;
    let u_points = u_basis.len() / u_order;
    let v_points = v_basis.len() / v_order;

    out.clear();
    out.reserve(u_points * v_points);

    for iu in 0..u_points {
        let bu = &u_basis[iu * u_order..(iu + 1) * u_order];
        for iv in 0..v_points {
            let bv = &v_basis[iv * v_order..(iv + 1) * v_order];
            let mut acc = T::ZERO;
            for (j, &bvj) in bv.iter().enumerate() {
                for (i, &bui) in bu.iter().enumerate() {
                    acc = acc.add_scaled(poles[j * u_order + i], bui * bvj);
                }
            }
            out.push(acc);
        }
    }
    Ok(())
}
