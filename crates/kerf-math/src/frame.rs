use crate::{DMat3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid frame: an origin plus a right-handed orthonormal basis.
///
/// Used to express geometry in a local coordinate system, e.g. one whose
/// z axis is a rotation axis. Columns of `rotation` are the world-space
/// directions of the local x, y, z axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point3,
    pub rotation: DMat3,
}

impl Frame {
    pub fn identity() -> Self {
        Self {
            origin: Point3::ZERO,
            rotation: DMat3::IDENTITY,
        }
    }

    /// Build a frame at `origin` whose local z axis points along `z_dir`.
    ///
    /// The x and y axes are chosen perpendicular to `z_dir`; their rotation
    /// about z is arbitrary but deterministic. Returns `None` if `z_dir`
    /// has zero or near-zero length.
    pub fn from_z_direction(origin: Point3, z_dir: Vector3) -> Option<Self> {
        let len = z_dir.length();
        if len < 1e-14 {
            return None;
        }
        let z = z_dir / len;

        // Seed with whichever global axis is least aligned with z.
        let seed = if z.x.abs() <= z.y.abs() && z.x.abs() <= z.z.abs() {
            Vector3::X
        } else if z.y.abs() <= z.z.abs() {
            Vector3::Y
        } else {
            Vector3::Z
        };

        let x = seed.cross(z).normalize();
        let y = z.cross(x);

        Some(Self {
            origin,
            rotation: DMat3::from_cols(x, y, z),
        })
    }

    /// World direction of the local z axis.
    pub fn z_axis(&self) -> Vector3 {
        self.rotation.z_axis
    }

    /// Map a point from local coordinates into world coordinates.
    pub fn point_to_world(&self, p: Point3) -> Point3 {
        self.origin + self.rotation * p
    }

    /// Map a world point into this frame's local coordinates.
    pub fn point_to_local(&self, p: Point3) -> Point3 {
        self.rotation.transpose() * (p - self.origin)
    }

    /// Map a direction vector from local into world coordinates.
    pub fn vector_to_world(&self, v: Vector3) -> Vector3 {
        self.rotation * v
    }

    /// Map a world direction vector into local coordinates.
    pub fn vector_to_local(&self, v: Vector3) -> Vector3 {
        self.rotation.transpose() * v
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}
