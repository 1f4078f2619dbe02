//! Point types and related functionality

use nalgebra::{Point2, Point3, Vector2, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 2D point, used for screen-space pixel positions
pub type Point2f = Point2<f32>;

/// A 2D vector, used for horizontal (x, z) directions on the map plane
pub type Vector2f = Vector2<f32>;

/// World up axis. The map lies on the XZ plane.
pub const WORLD_UP: Vector3f = Vector3f::new(0.0, 1.0, 0.0);

/// Returns true if every coordinate of the point is finite
pub fn is_finite_point(point: &Point3f) -> bool {
    point.x.is_finite() && point.y.is_finite() && point.z.is_finite()
}

/// Horizontal (x, z) component of the vector from `from` to `to`
pub fn horizontal_offset(from: &Point3f, to: &Point3f) -> Vector2f {
    Vector2f::new(to.x - from.x, to.z - from.z)
}
