//! Camera utilities for 3D visualization

use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Translation3, UnitQuaternion};
use pinmap_core::{look_rotation, CameraRig, Point3f, Vector3f, WORLD_UP};

/// A perspective camera looking down its local -Z axis
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Point3<f32>, fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            orientation: UnitQuaternion::identity(),
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Create a camera at `position` already looking at `target`
    pub fn looking_at(position: Point3<f32>, target: &Point3<f32>) -> Self {
        let mut camera = Self {
            position,
            ..Self::default()
        };
        camera.orientation = look_rotation(&position, target, &WORLD_UP);
        camera
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
            .inverse()
            .to_homogeneous()
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Direction the camera is facing
    pub fn forward(&self) -> Vector3f {
        self.orientation * -Vector3f::z()
    }

    /// Project a world-space point to normalized device coordinates
    pub fn project(&self, point: &Point3f) -> Point3f {
        let clip = self.projection_matrix() * self.view_matrix() * point.to_homogeneous();
        if clip.w.abs() <= f32::EPSILON {
            return Point3f::new(clip.x, clip.y, clip.z);
        }
        Point3f::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
    }

    /// Update the aspect ratio from a canvas size, ignoring empty canvases
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }
}

impl CameraRig for Camera {
    fn position(&self) -> Point3f {
        self.position
    }

    fn set_position(&mut self, position: Point3f) {
        self.position = position;
    }

    fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: UnitQuaternion<f32>) {
        self.orientation = orientation;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 5.0),
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}
