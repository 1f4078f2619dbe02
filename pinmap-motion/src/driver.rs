//! Camera motion along flight paths
//!
//! The driver owns at most one [`Motion`] at a time. Requesting a new motion
//! drops the running one without calling its completion callback, so two
//! animations never fight over the same camera.
//!
//! Each tick, with `t` the eased progress:
//! 1. the rig is moved to `curve.point_at(t)`;
//! 2. the orientation looking at the target from there is computed;
//! 3. that orientation is blended with the precomputed end orientation,
//!    weighted by `t³` so it only matters near the end;
//! 4. the displayed orientation is slerped from the start orientation to the
//!    blend by `t`.

use crate::curve::QuadraticBezier3;
use crate::easing::Ease;
use crate::path::{build_curve_in_scene, PathOptions};
use crate::tween::Tween;
use nalgebra::UnitQuaternion;
use pinmap_core::{CameraRig, Point3f, Result, SceneGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Callback run once when a motion reaches its end
pub type OnComplete = Box<dyn FnOnce()>;

/// Distance units travelled per second by default
pub const DEFAULT_SPEED: f32 = 4.0;

/// Paths shorter than this complete without animating
pub const MIN_MOTION_LENGTH: f32 = 1.0e-4;

/// Timing parameters shared by every motion of a driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Duration is `curve length / speed`
    pub speed: f32,
    pub ease: Ease,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            ease: Ease::QuadInOut,
        }
    }
}

/// What a call into the driver left it doing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionStatus {
    Idle,
    Animating { progress: f32 },
    /// A motion finished during this call and its callback has run
    Completed,
}

/// Camera pose to come back to when leaving a zoomed-in view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultView {
    pub position: Point3f,
    pub target: Point3f,
}

impl DefaultView {
    pub fn new(position: Point3f, target: Point3f) -> Self {
        Self { position, target }
    }

    /// Capture the rig's live position, looking at `target`
    pub fn capture<R: CameraRig + ?Sized>(rig: &R, target: Point3f) -> Self {
        Self::new(rig.position(), target)
    }
}

/// Spherical linear interpolation along the shorter arc, falling back to
/// normalized lerp when both rotations are (nearly) identical
pub fn slerp(from: &UnitQuaternion<f32>, to: &UnitQuaternion<f32>, t: f32) -> UnitQuaternion<f32> {
    let to = if from.coords.dot(&to.coords) < 0.0 {
        UnitQuaternion::new_unchecked(-to.into_inner())
    } else {
        *to
    };
    from.try_slerp(&to, t, 1.0e-6).unwrap_or_else(|| from.nlerp(&to, t))
}

/// One in-flight camera animation
pub struct Motion {
    curve: QuadraticBezier3,
    look_at: Point3f,
    tween: Tween,
    start_orientation: UnitQuaternion<f32>,
    end_orientation: UnitQuaternion<f32>,
    on_complete: Option<OnComplete>,
}

impl Motion {
    fn new<R: CameraRig + ?Sized>(
        rig: &R,
        curve: QuadraticBezier3,
        look_at: Point3f,
        settings: &MotionSettings,
        on_complete: Option<OnComplete>,
    ) -> Self {
        let start_orientation = rig.orientation();
        let end_orientation = rig.look_orientation(&curve.point_at(1.0), &look_at);
        let length = curve.length();
        let duration = if settings.speed > 0.0 && length > MIN_MOTION_LENGTH {
            length / settings.speed
        } else {
            0.0
        };

        Self {
            curve,
            look_at,
            tween: Tween::new(duration, settings.ease),
            start_orientation,
            end_orientation,
            on_complete,
        }
    }

    pub fn curve(&self) -> &QuadraticBezier3 {
        &self.curve
    }

    pub fn look_at(&self) -> Point3f {
        self.look_at
    }

    pub fn start_orientation(&self) -> UnitQuaternion<f32> {
        self.start_orientation
    }

    pub fn end_orientation(&self) -> UnitQuaternion<f32> {
        self.end_orientation
    }

    /// Eased progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }

    pub fn duration(&self) -> f32 {
        self.tween.duration()
    }

    /// Write the pose for eased progress `t` into the rig
    fn apply<R: CameraRig + ?Sized>(&self, rig: &mut R, t: f32) {
        let position = self.curve.point_at(t);
        rig.set_position(position);

        let instant = rig.look_orientation(&position, &self.look_at);
        let target = slerp(&self.end_orientation, &instant, t * t * t);
        rig.set_orientation(slerp(&self.start_orientation, &target, t));
    }

    fn finish(mut self) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
    }
}

impl std::fmt::Debug for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Motion")
            .field("curve", &self.curve)
            .field("look_at", &self.look_at)
            .field("tween", &self.tween)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Drives one camera along flight paths, one motion at a time
#[derive(Debug, Default)]
pub struct CameraMotionDriver {
    settings: MotionSettings,
    motion: Option<Motion>,
}

impl CameraMotionDriver {
    pub fn new(settings: MotionSettings) -> Self {
        Self { settings, motion: None }
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    /// Eased progress of the active motion
    pub fn progress(&self) -> Option<f32> {
        self.motion.as_ref().map(Motion::progress)
    }

    /// Start moving `rig` along `curve` while turning it towards `look_at`.
    ///
    /// Any running motion is dropped first and its callback never runs. A
    /// curve of zero length completes before this returns.
    pub fn move_camera<R: CameraRig + ?Sized>(
        &mut self,
        rig: &mut R,
        curve: QuadraticBezier3,
        look_at: Point3f,
        on_complete: Option<OnComplete>,
    ) -> MotionStatus {
        if self.motion.take().is_some() {
            debug!("superseding active camera motion");
        }

        let motion = Motion::new(rig, curve, look_at, &self.settings, on_complete);
        debug!(
            length = motion.curve.length(),
            duration = motion.duration(),
            "starting camera motion"
        );

        if motion.tween.is_instant() {
            motion.apply(rig, 1.0);
            motion.finish();
            debug!("camera motion completed immediately");
            return MotionStatus::Completed;
        }

        self.motion = Some(motion);
        MotionStatus::Animating { progress: 0.0 }
    }

    /// Fly back to `default`, approaching it without offsets
    pub fn move_to_default<R: CameraRig + ?Sized>(
        &mut self,
        rig: &mut R,
        scene: &mut SceneGraph,
        default: &DefaultView,
        debug_path: bool,
        on_complete: Option<OnComplete>,
    ) -> Result<MotionStatus> {
        let options = PathOptions::new(0.0, 0.0).with_debug(debug_path);
        let curve = build_curve_in_scene(scene, rig.position(), default.position, &options)?;
        Ok(self.move_camera(rig, curve, default.target, on_complete))
    }

    /// Advance the active motion by `dt` seconds
    pub fn tick<R: CameraRig + ?Sized>(&mut self, rig: &mut R, dt: f32) -> MotionStatus {
        let Some(motion) = self.motion.as_mut() else {
            return MotionStatus::Idle;
        };

        let t = motion.tween.advance(dt);
        motion.apply(rig, t);

        if motion.tween.is_finished() {
            if let Some(motion) = self.motion.take() {
                motion.finish();
            }
            debug!("camera motion completed");
            return MotionStatus::Completed;
        }
        MotionStatus::Animating { progress: t }
    }

    /// Drop the active motion without running its callback
    pub fn cancel(&mut self) -> bool {
        self.motion.take().is_some()
    }
}
