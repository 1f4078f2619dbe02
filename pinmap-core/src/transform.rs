//! 3D transformation utilities

use crate::point::{Point3f, Vector3f};
use nalgebra::{Isometry3, Matrix4, Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Local transform of a scene node: translation, rotation and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform3D {
    pub position: Point3f,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3f,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            position: Point3f::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
        }
    }

    /// Create a pure translation
    pub fn from_position(position: Point3f) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transformation from translation and rotation
    pub fn from_position_rotation(position: Point3f, rotation: UnitQuaternion<f32>) -> Self {
        Self {
            position,
            rotation,
            ..Self::identity()
        }
    }

    /// Homogeneous matrix, applied as translate * rotate * scale
    pub fn to_homogeneous(&self) -> Matrix4<f32> {
        let isometry = Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation);
        isometry.to_homogeneous() * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        let homogeneous = self.to_homogeneous() * point.to_homogeneous();
        Point3f::from_homogeneous(homogeneous).unwrap_or(*point)
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Orientation of an object looking from `eye` towards `target`.
///
/// Follows the camera convention: the local -Z axis points at the target and
/// local +Y stays as close to `up` as possible. Degenerate inputs (coincident
/// points, view direction parallel to `up`) are nudged instead of producing NaN.
pub fn look_rotation(eye: &Point3f, target: &Point3f, up: &Vector3f) -> UnitQuaternion<f32> {
    let mut z = eye - target;
    if z.norm_squared() <= f32::EPSILON {
        z = Vector3f::z();
    }
    z.normalize_mut();

    let mut x = up.cross(&z);
    if x.norm_squared() <= f32::EPSILON {
        if (up.z.abs() - 1.0).abs() <= f32::EPSILON {
            z.x += 1.0e-4;
        } else {
            z.z += 1.0e-4;
        }
        z.normalize_mut();
        x = up.cross(&z);
    }
    x.normalize_mut();
    let y = z.cross(&x);

    let rotation = Rotation3::from_basis_unchecked(&[x, y, z]);
    UnitQuaternion::from_rotation_matrix(&rotation)
}
