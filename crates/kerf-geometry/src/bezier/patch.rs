//! Scattered-sample Bezier patch evaluation.
//!
//! Used when the requested (u, v) samples do not form a regular grid,
//! e.g. points along a clipped patch boundary.

use kerf_core::{KerfError, Result};

use super::basis::{
    evaluate_basis_functions, evaluate_derivative_basis_functions, MAX_BEZIER_CURVE_ORDER,
};
use super::pole::Pole;

fn check_patch_orders(u_order: usize, v_order: usize) -> Result<()> {
    for order in [u_order, v_order] {
        if order == 0 || order > MAX_BEZIER_CURVE_ORDER {
            return Err(KerfError::UnsupportedOrder {
                order,
                max: MAX_BEZIER_CURVE_ORDER,
            });
        }
    }
    Ok(())
}

fn collapse_u<T: Pole>(poles: &[T], u_order: usize, v_order: usize, bu: &[f64]) -> [T; MAX_BEZIER_CURVE_ORDER] {
    let mut section = [T::ZERO; MAX_BEZIER_CURVE_ORDER];
    for (j, section_pole) in section.iter_mut().take(v_order).enumerate() {
        let row = &poles[j * u_order..(j + 1) * u_order];
        let mut acc = T::ZERO;
        for (pole, &b) in row.iter().zip(bu) {
            acc = acc.add_scaled(*pole, b);
        }
        *section_pole = acc;
    }
    section
}

fn collapse_v<T: Pole>(section: &[T], v_order: usize, bv: &[f64]) -> T {
    let mut acc = T::ZERO;
    for (section_pole, &b) in section.iter().take(v_order).zip(bv) {
        acc = acc.add_scaled(*section_pole, b);
    }
    acc
}

/// Evaluate patch positions at an explicit list of (u, v) pairs.
///
/// `poles` is v-major, u-minor, `u_order * v_order` long. An empty sample
/// list yields an empty result, not an error.
pub fn evaluate_points<T: Pole>(
    uv: &[(f64, f64)],
    poles: &[T],
    u_order: usize,
    v_order: usize,
) -> Result<Vec<T>> {
    check_patch_orders(u_order, v_order)?;
    debug_assert_eq!(poles.len(), u_order * v_order);

    let mut bu = [0.0; MAX_BEZIER_CURVE_ORDER];
    let mut bv = [0.0; MAX_BEZIER_CURVE_ORDER];
    let mut f = Vec::with_capacity(uv.len());
    for &(u, v) in uv {
        evaluate_basis_functions(&mut bu, u_order, u)?;
        evaluate_basis_functions(&mut bv, v_order, v)?;
        let section = collapse_u(poles, u_order, v_order, &bu[..u_order]);
        f.push(collapse_v(&section, v_order, &bv[..v_order]));
    }
    Ok(f)
}

/// Evaluate patch positions and both first partials at an explicit list of
/// (u, v) pairs.
///
/// Returns `(f, dfdu, dfdv)`, each `uv.len()` long. The u-direction section
/// poles are shared between `f` and `dfdv` (both collapse along u with the
/// value basis); `dfdu` runs its own collapse with the u derivative basis.
pub fn evaluate_points_with_partials<T: Pole>(
    uv: &[(f64, f64)],
    poles: &[T],
    u_order: usize,
    v_order: usize,
) -> Result<(Vec<T>, Vec<T>, Vec<T>)> {
    check_patch_orders(u_order, v_order)?;
    debug_assert_eq!(poles.len(), u_order * v_order);

    let mut bu = [0.0; MAX_BEZIER_CURVE_ORDER];
    let mut bv = [0.0; MAX_BEZIER_CURVE_ORDER];
    let mut dbu = [0.0; MAX_BEZIER_CURVE_ORDER];
    let mut dbv = [0.0; MAX_BEZIER_CURVE_ORDER];

    let mut f = Vec::with_capacity(uv.len());
    let mut dfdu = Vec::with_capacity(uv.len());
    let mut dfdv = Vec::with_capacity(uv.len());

    for &(u, v) in uv {
        evaluate_basis_functions(&mut bu, u_order, u)?;
        evaluate_basis_functions(&mut bv, v_order, v)?;
        evaluate_derivative_basis_functions(&mut dbu, u_order, u)?;
        evaluate_derivative_basis_functions(&mut dbv, v_order, v)?;

        let section = collapse_u(poles, u_order, v_order, &bu[..u_order]);
        let section_du = collapse_u(poles, u_order, v_order, &dbu[..u_order]);

        f.push(collapse_v(&section, v_order, &bv[..v_order]));
        dfdu.push(collapse_v(&section_du, v_order, &bv[..v_order]));
        dfdv.push(collapse_v(&section, v_order, &dbv[..v_order]));
    }
    Ok((f, dfdu, dfdv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_math::{DVec3, DVec4};

    fn scrambled(i: usize) -> f64 {
        ((i * 2654435761) % 1000) as f64 / 250.0 - 2.0
    }

    fn point_grid(u_order: usize, v_order: usize) -> Vec<DVec3> {
        (0..u_order * v_order)
            .map(|i| DVec3::new(scrambled(i), scrambled(i + 3), scrambled(i + 11)))
            .collect()
    }

    #[test]
    fn test_corner_interpolation() {
        for (u_order, v_order) in [(2, 2), (3, 4), (5, 3), (7, 7)] {
            let poles = point_grid(u_order, v_order);
            let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
            let f = evaluate_points(&corners, &poles, u_order, v_order).unwrap();

            let expected = [
                poles[0],
                poles[u_order - 1],
                poles[(v_order - 1) * u_order],
                poles[v_order * u_order - 1],
            ];
            for (value, corner) in f.iter().zip(&expected) {
                assert!(
                    (*value - *corner).length() < 1e-12,
                    "orders ({}, {})",
                    u_order,
                    v_order
                );
            }
        }
    }

    #[test]
    fn test_constant_grid_scattered() {
        let p = DVec3::new(4.0, 5.0, -6.0);
        let poles = vec![p; 12];
        let uv = [(0.1, 0.9), (0.5, 0.5), (0.333, 0.25)];
        let (f, dfdu, dfdv) = evaluate_points_with_partials(&uv, &poles, 4, 3).unwrap();
        for k in 0..uv.len() {
            assert!((f[k] - p).length() < 1e-12);
            assert!(dfdu[k].length() < 1e-10);
            assert!(dfdv[k].length() < 1e-10);
        }
    }

    #[test]
    fn test_partials_against_finite_differences() {
        let u_order = 4;
        let v_order = 5;
        let poles = point_grid(u_order, v_order);
        let h = 1e-6;
        let samples = [(0.2, 0.7), (0.5, 0.5), (0.85, 0.15)];

        let (_, dfdu, dfdv) =
            evaluate_points_with_partials(&samples, &poles, u_order, v_order).unwrap();
        for (k, &(u, v)) in samples.iter().enumerate() {
            let stencil = [(u - h, v), (u + h, v), (u, v - h), (u, v + h)];
            let f = evaluate_points(&stencil, &poles, u_order, v_order).unwrap();
            let du = (f[1] - f[0]) / (2.0 * h);
            let dv = (f[3] - f[2]) / (2.0 * h);
            assert!((dfdu[k] - du).length() < 1e-5, "dfdu at {:?}", (u, v));
            assert!((dfdv[k] - dv).length() < 1e-5, "dfdv at {:?}", (u, v));
        }
    }

    #[test]
    fn test_scalar_and_homogeneous_payloads() {
        // Bilinear scalar patch z = u * v.
        let poles: Vec<f64> = vec![0.0, 0.0, 0.0, 1.0];
        let uv = [(0.25, 0.5), (1.0, 1.0)];
        let f = evaluate_points(&uv, &poles, 2, 2).unwrap();
        assert!((f[0] - 0.125).abs() < 1e-14);
        assert!((f[1] - 1.0).abs() < 1e-14);

        // Homogeneous poles with unit weights behave like points.
        let hpoles: Vec<DVec4> = vec![
            DVec4::new(0.0, 0.0, 0.0, 1.0),
            DVec4::new(1.0, 0.0, 0.0, 1.0),
            DVec4::new(0.0, 1.0, 0.0, 1.0),
            DVec4::new(1.0, 1.0, 0.0, 1.0),
        ];
        let fh = evaluate_points(&uv, &hpoles, 2, 2).unwrap();
        assert!((fh[0].x - 0.25).abs() < 1e-14);
        assert!((fh[0].y - 0.5).abs() < 1e-14);
        assert!((fh[0].w - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_empty_sample_list() {
        let poles = point_grid(3, 3);
        let f = evaluate_points::<DVec3>(&[], &poles, 3, 3).unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn test_order_cap_is_curve_order() {
        let order = MAX_BEZIER_CURVE_ORDER + 1;
        let poles = vec![0.0; order * 2];
        assert!(evaluate_points(&[(0.5, 0.5)], &poles, order, 2).is_err());
    }
}
