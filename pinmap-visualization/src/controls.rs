//! Orbit-style user camera controls
//!
//! Controls are switched off while a camera motion runs and switched back on,
//! anchored at the new target, once it completes.

use crate::camera::Camera;
use pinmap_core::{CameraRig, Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// Constraints applied to orbiting in normal (non-debug) mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest angle from straight up, in radians
    pub max_polar_angle: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 40.0,
            max_polar_angle: 1.4,
        }
    }
}

/// Orbit controls anchored at a target point
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    enabled: bool,
    target: Point3f,
    /// `None` means unconstrained, used in debug mode
    limits: Option<OrbitLimits>,
}

impl OrbitControls {
    pub fn new(target: Point3f, limits: Option<OrbitLimits>) -> Self {
        Self {
            enabled: true,
            target,
            limits,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn target(&self) -> Point3f {
        self.target
    }

    pub fn limits(&self) -> Option<&OrbitLimits> {
        self.limits.as_ref()
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Re-enable the controls, orbiting around `target`
    pub fn enable_at(&mut self, target: Point3f) {
        self.target = target;
        self.enabled = true;
    }

    /// Rotate the camera around the target. Returns false when disabled.
    pub fn orbit(&self, camera: &mut Camera, horizontal: f32, vertical: f32) -> bool {
        if !self.enabled {
            return false;
        }

        let offset = camera.position - self.target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return false;
        }

        let mut theta = offset.x.atan2(offset.z) - horizontal;
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos() - vertical;
        phi = phi.clamp(1.0e-3, std::f32::consts::PI - 1.0e-3);
        if let Some(limits) = &self.limits {
            phi = phi.min(limits.max_polar_angle);
        }
        theta = theta.rem_euclid(std::f32::consts::TAU);

        let direction = Vector3f::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos());
        camera.set_position(self.target + direction * radius);
        camera.look_at(&self.target);
        true
    }

    /// Move the camera towards (`delta > 0`) or away from the target
    pub fn zoom(&self, camera: &mut Camera, delta: f32) -> bool {
        if !self.enabled {
            return false;
        }

        let offset = camera.position - self.target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return false;
        }

        let mut new_radius = (radius - delta).max(1.0e-2);
        if let Some(limits) = &self.limits {
            new_radius = new_radius.clamp(limits.min_distance, limits.max_distance);
        }
        camera.set_position(self.target + offset / radius * new_radius);
        true
    }
}
