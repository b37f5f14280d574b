//! Bernstein-Bezier basis function evaluation.

use kerf_core::{KerfError, Result};

/// Maximum supported Bezier order (degree + 1) for basis tables and grid
/// evaluation.
pub const MAX_BEZIER_ORDER: usize = 30;

/// Maximum order accepted by the curve/patch evaluation consumers.
pub const MAX_BEZIER_CURVE_ORDER: usize = 26;

fn check_order(order: usize) -> Result<()> {
    if order == 0 || order > MAX_BEZIER_ORDER {
        return Err(KerfError::UnsupportedOrder {
            order,
            max: MAX_BEZIER_ORDER,
        });
    }
    Ok(())
}

/// Binomial coefficient row C(degree, 0..=degree).
fn pascal_row(degree: usize) -> [f64; MAX_BEZIER_ORDER] {
    let mut row = [0.0; MAX_BEZIER_ORDER];
    row[0] = 1.0;
    for j in 1..=degree {
        row[j] = row[j - 1] * (degree - j + 1) as f64 / j as f64;
    }
    row
}

/// Evaluate the `order` Bernstein basis functions at `u`.
///
/// Writes into `values[..order]`. Parameters outside `[0, 1]` extrapolate;
/// they are not an error. Fails with `UnsupportedOrder` when `order`
/// exceeds [`MAX_BEZIER_ORDER`], writing nothing.
pub fn evaluate_basis_functions(values: &mut [f64], order: usize, u: f64) -> Result<()> {
    check_order(order)?;
    debug_assert!(values.len() >= order);

    let v = 1.0 - u;
    match order {
        // Low orders written out for speed.
        1 => {
            values[0] = 1.0;
        }
        2 => {
            values[1] = u;
            values[0] = v;
        }
        3 => {
            values[2] = u * u;
            values[1] = 2.0 * u * v;
            values[0] = v * v;
        }
        4 => {
            let uu = u * u;
            let vv = v * v;
            values[3] = uu * u;
            values[2] = 3.0 * uu * v;
            values[1] = 3.0 * u * vv;
            values[0] = vv * v;
        }
        // Higher orders from the power form B_i = C(d,i) u^i v^(d-i),
        // which beats the recurrence on multiply count.
        _ => {
            let degree = order - 1;
            let mut u_pow = [0.0; MAX_BEZIER_ORDER];
            let mut v_pow = [0.0; MAX_BEZIER_ORDER];
            u_pow[0] = 1.0;
            v_pow[0] = 1.0;
            for i in 1..order {
                u_pow[i] = u * u_pow[i - 1];
                v_pow[i] = v * v_pow[i - 1];
            }
            let binom = pascal_row(degree);
            for i in 0..order {
                values[i] = binom[i] * u_pow[i] * v_pow[degree - i];
            }
        }
    }
    Ok(())
}

/// Evaluate the first derivatives of the `order` Bernstein basis functions
/// at `u`.
///
/// Derivatives at `order` are scaled differences of the basis values at
/// `order - 1`.
pub fn evaluate_derivative_basis_functions(values: &mut [f64], order: usize, u: f64) -> Result<()> {
    check_order(order)?;
    debug_assert!(values.len() >= order);

    if order == 1 {
        values[0] = 0.0;
        return Ok(());
    }

    evaluate_basis_functions(values, order - 1, u)?;
    values[order - 1] = values[order - 2];
    for i in (1..order - 1).rev() {
        values[i] = values[i - 1] - values[i];
    }
    values[0] = -values[0];

    let degree = (order - 1) as f64;
    for value in values.iter_mut().take(order) {
        *value *= degree;
    }
    Ok(())
}
