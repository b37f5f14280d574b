//! Symmetric 4x4 second-moment product matrices.
//!
//! A `MomentProducts` accumulates `sum( w * X * X^T )` over homogeneous
//! points `X = [x, y, z, 1]`, from which length, centroid, and inertia
//! of a wire (or swept solid) are derived.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::{DMat3, DVec3, DVec4, Frame, Point3, Vector3};

/// Accumulated second-moment products, row-major `coff[i][j]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentProducts {
    pub coff: [[f64; 4]; 4],
}

impl MomentProducts {
    pub fn zero() -> Self {
        Self {
            coff: [[0.0; 4]; 4],
        }
    }

    /// Add `scale * X * X^T` for the homogeneous point `X = [xyz, 1]`,
    /// writing the full symmetric pattern.
    pub fn add_scaled_point(&mut self, xyz: Point3, scale: f64) {
        let c = &mut self.coff;
        c[0][0] += xyz.x * xyz.x * scale;
        c[0][1] += xyz.x * xyz.y * scale;
        c[0][2] += xyz.x * xyz.z * scale;

        c[1][0] += xyz.y * xyz.x * scale;
        c[1][1] += xyz.y * xyz.y * scale;
        c[1][2] += xyz.y * xyz.z * scale;

        c[2][0] += xyz.z * xyz.x * scale;
        c[2][1] += xyz.z * xyz.y * scale;
        c[2][2] += xyz.z * xyz.z * scale;

        c[0][3] += xyz.x * scale;
        c[1][3] += xyz.y * scale;
        c[2][3] += xyz.z * scale;

        c[3][0] += xyz.x * scale;
        c[3][1] += xyz.y * scale;
        c[3][2] += xyz.z * scale;

        c[3][3] += scale;
    }

    /// Add `scale * U * U^T` for a homogeneous `U`.
    pub fn add_scaled_outer_product(&mut self, u: DVec4, scale: f64) {
        let ua = u.to_array();
        for i in 0..4 {
            for j in 0..4 {
                self.coff[i][j] += scale * ua[i] * ua[j];
            }
        }
    }

    /// Add `scale * (U * V^T + V * U^T)` for homogeneous `U`, `V`.
    pub fn add_symmetric_product_pair(&mut self, u: DVec4, v: DVec4, scale: f64) {
        let ua = u.to_array();
        let va = v.to_array();
        for i in 0..4 {
            for j in 0..4 {
                self.coff[i][j] += scale * (ua[i] * va[j] + va[i] * ua[j]);
            }
        }
    }

    /// Sandwich product `T * self * T^T` with the 4x4 homogeneous matrix of
    /// a rigid frame, mapping local-frame products into world coordinates.
    pub fn transformed(&self, frame: &Frame) -> MomentProducts {
        let mut t = [[0.0; 4]; 4];
        let r = frame.rotation;
        // glam matrices are column-major; t is row-major.
        for i in 0..3 {
            t[i][0] = r.col(0)[i];
            t[i][1] = r.col(1)[i];
            t[i][2] = r.col(2)[i];
            t[i][3] = frame.origin[i];
        }
        t[3][3] = 1.0;

        // ta = T * A
        let mut ta = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                let mut s = 0.0;
                for k in 0..4 {
                    s += t[i][k] * self.coff[k][j];
                }
                ta[i][j] = s;
            }
        }
        // result = ta * T^T
        let mut out = MomentProducts::zero();
        for i in 0..4 {
            for j in 0..4 {
                let mut s = 0.0;
                for k in 0..4 {
                    s += ta[i][k] * t[j][k];
                }
                out.coff[i][j] = s;
            }
        }
        out
    }

    /// Reduce accumulated wire products to length, centroid, and principal
    /// second moments about the centroid.
    ///
    /// `local_to_world` is the frame the products were accumulated in
    /// (identity for the unweighted wire case). Returns `None` when the
    /// accumulated length is zero.
    pub fn principal_wire_moments(&self, local_to_world: &Frame) -> Option<WireMoments> {
        let world = self.transformed(local_to_world);
        let length = world.coff[3][3];
        if length.abs() < 1e-14 {
            return None;
        }
        let moment1 = DVec3::new(world.coff[0][3], world.coff[1][3], world.coff[2][3]);
        let centroid = moment1 / length;

        // Shift second moments to the centroid: Q - M * C^T.
        let mut q = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                q[i][j] = world.coff[i][j] - moment1[i] * centroid[j];
            }
        }

        // Products to inertia tensor: negate off-diagonals, diagonal gets
        // the sum of the other two axis products.
        let (xx, yy, zz) = (q[0][0], q[1][1], q[2][2]);
        let mut tensor = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                tensor[i][j] = -q[i][j];
            }
        }
        tensor[0][0] = yy + zz;
        tensor[1][1] = xx + zz;
        tensor[2][2] = xx + yy;

        let (moments, axes) = jacobi_3x3(tensor);
        Some(WireMoments {
            length,
            centroid,
            principal_moments: moments,
            principal_axes: axes,
        })
    }
}

impl Default for MomentProducts {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for MomentProducts {
    type Output = MomentProducts;

    fn add(self, rhs: MomentProducts) -> MomentProducts {
        let mut out = self;
        out += rhs;
        out
    }
}

impl AddAssign for MomentProducts {
    fn add_assign(&mut self, rhs: MomentProducts) {
        for i in 0..4 {
            for j in 0..4 {
                self.coff[i][j] += rhs.coff[i][j];
            }
        }
    }
}

/// Length, centroid, and centroidal principal moments of a wire.
#[derive(Debug, Clone, Copy)]
pub struct WireMoments {
    pub length: f64,
    pub centroid: Point3,
    /// Principal second moments (eigenvalues of the inertia tensor).
    pub principal_moments: DVec3,
    /// Principal axis directions, one per column.
    pub principal_axes: DMat3,
}

/// Cyclic Jacobi eigensolver for a symmetric 3x3 matrix.
///
/// Returns `(eigenvalues, eigenvectors)` with eigenvectors as matrix
/// columns, paired with the eigenvalues in order.
fn jacobi_3x3(mut a: [[f64; 3]; 3]) -> (DVec3, DMat3) {
    let mut v = [[0.0; 3]; 3];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for _sweep in 0..50 {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off < 1e-30 {
            break;
        }
        for p in 0..2 {
            for q in (p + 1)..3 {
                if a[p][q].abs() < 1e-30 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..3 {
                    let akp = a[k][p];
                    let akq = a[k][q];
                    a[k][p] = c * akp - s * akq;
                    a[k][q] = s * akp + c * akq;
                }
                for k in 0..3 {
                    let apk = a[p][k];
                    let aqk = a[q][k];
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
                for vk in v.iter_mut() {
                    let vp = vk[p];
                    let vq = vk[q];
                    vk[p] = c * vp - s * vq;
                    vk[q] = s * vp + c * vq;
                }
            }
        }
    }

    let eigenvalues = DVec3::new(a[0][0], a[1][1], a[2][2]);
    let axes = DMat3::from_cols(
        Vector3::new(v[0][0], v[1][0], v[2][0]),
        Vector3::new(v[0][1], v[1][1], v[2][1]),
        Vector3::new(v[0][2], v[1][2], v[2][2]),
    );
    (eigenvalues, axes)
}
