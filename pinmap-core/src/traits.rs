//! Core traits for pinmap

use crate::point::{Point3f, WORLD_UP};
use crate::transform::look_rotation;
use nalgebra::UnitQuaternion;

/// Anything whose pose a camera motion can drive.
///
/// Position lives on the rig and orientation on the camera it carries, the
/// way a camera entity is usually split in a scene graph. Implementors only
/// store the values; all interpolation happens in the motion driver.
pub trait CameraRig {
    fn position(&self) -> Point3f;

    fn set_position(&mut self, position: Point3f);

    fn orientation(&self) -> UnitQuaternion<f32>;

    fn set_orientation(&mut self, orientation: UnitQuaternion<f32>);

    /// Orientation the rig would have when placed at `from` and looking at `target`
    fn look_orientation(&self, from: &Point3f, target: &Point3f) -> UnitQuaternion<f32> {
        look_rotation(from, target, &WORLD_UP)
    }

    /// Turn the rig towards `target` from where it stands
    fn look_at(&mut self, target: &Point3f) {
        let orientation = self.look_orientation(&self.position(), target);
        self.set_orientation(orientation);
    }
}
