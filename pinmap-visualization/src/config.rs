//! Viewer configuration
//!
//! Field names follow the attribute names content authors already write in
//! scene markup (`targetId`, `initialPosition`, ...). Points are `[x, y, z]`
//! arrays.

use crate::controller::MapController;
use crate::controls::OrbitLimits;
use crate::camera::Camera;
use crate::overlay::{OverlayLayer, Viewport};
use pinmap_core::{is_finite_point, Error, Point3f, Result, SceneGraph, SceneNode};
use pinmap_motion::{MotionSettings, PathOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options of the navigate-to-target behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveToTargetConfig {
    /// Anchor to fly to when the viewer starts, empty for none
    pub target_id: String,
    /// Draw flight paths and relax the orbit controls
    pub debug: bool,
    /// Default look-at point
    pub target: Point3f,
    /// Default camera position; the live camera position when absent
    pub initial_position: Option<Point3f>,
}

impl Default for MoveToTargetConfig {
    fn default() -> Self {
        Self {
            target_id: String::new(),
            debug: false,
            target: Point3f::origin(),
            initial_position: None,
        }
    }
}

/// Scene element ids and behaviour switches of the map controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapControllerConfig {
    pub camera_id: String,
    pub map_id: String,
    pub hemisphere_light_id: Option<String>,
    pub directional_light_id: Option<String>,
    pub sky_id: Option<String>,
    /// Build the debug panel
    pub debug: bool,
    pub navigation: MoveToTargetConfig,
    /// Path shape used when flying to an anchor
    pub approach: PathOptions,
    pub motion: MotionSettings,
    pub limits: OrbitLimits,
}

impl MapControllerConfig {
    /// Whether flight paths are drawn into the scene
    pub fn debug_paths(&self) -> bool {
        self.navigation.debug
    }
}

impl Default for MapControllerConfig {
    fn default() -> Self {
        Self {
            camera_id: "camera".to_string(),
            map_id: "map".to_string(),
            hemisphere_light_id: Some("hemisphere-light".to_string()),
            directional_light_id: Some("directional-light".to_string()),
            sky_id: None,
            debug: true,
            navigation: MoveToTargetConfig::default(),
            approach: PathOptions::new(1.0, 3.0),
            motion: MotionSettings::default(),
            limits: OrbitLimits::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    pub position: Point3f,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3f::new(0.0, 15.0, 15.0),
            fov: 80.0,
            near: 0.005,
            far: 10000.0,
        }
    }
}

impl CameraConfig {
    /// Reject parameters the perspective projection cannot be built from
    pub fn validate(&self) -> Result<()> {
        if !is_finite_point(&self.position) {
            return Err(Error::InvalidConfig(format!("camera position {:?} is not finite", self.position)));
        }
        validate_fov(self.fov)?;
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(Error::InvalidConfig(format!("camera near plane must be positive, got {}", self.near)));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(Error::InvalidConfig(format!(
                "camera far plane ({}) must lie beyond the near plane ({})",
                self.far, self.near
            )));
        }
        Ok(())
    }

    /// Camera looking at `target`, sized for `viewport`
    pub fn build(&self, target: &Point3f, viewport: &Viewport) -> Result<Camera> {
        self.validate()?;
        if !(viewport.width.is_finite() && viewport.width > 0.0 && viewport.height.is_finite() && viewport.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "viewport must have a positive size, got {}x{}",
                viewport.width, viewport.height
            )));
        }

        let mut camera = Camera::looking_at(self.position, target);
        camera.fov = self.fov.to_radians();
        camera.near = self.near;
        camera.far = self.far;
        camera.resize(viewport.width, viewport.height);
        Ok(camera)
    }
}

/// Vertical field of view in degrees, strictly between 0 and 180
pub fn validate_fov(degrees: f32) -> Result<()> {
    if degrees.is_finite() && degrees > 0.0 && degrees < 180.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("camera fov must be within (0, 180) degrees, got {degrees}")))
    }
}

/// A clickable pin: scene node, destination anchor and optional screen label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinConfig {
    pub id: String,
    pub target_id: String,
    #[serde(default)]
    pub label_id: Option<String>,
}

/// Everything needed to compose a viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub controller: MapControllerConfig,
    pub camera: CameraConfig,
    pub viewport: Viewport,
    /// Scene nodes, parents first
    pub scene: Vec<SceneNode>,
    /// Ids of the overlay elements available to pins
    pub elements: Vec<String>,
    pub pins: Vec<PinConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            controller: MapControllerConfig::default(),
            camera: CameraConfig::default(),
            viewport: Viewport::new(1280.0, 720.0),
            scene: Vec::new(),
            elements: Vec::new(),
            pins: Vec::new(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Resolve every id and assemble the controller. Fails on the first
    /// reference that does not resolve.
    pub fn build(self) -> Result<MapController> {
        let scene = SceneGraph::from_nodes(self.scene)?;
        let overlays = OverlayLayer::with_elements(self.elements);
        let camera = self.camera.build(&self.controller.navigation.target, &self.viewport)?;

        let mut controller = MapController::new(scene, camera, overlays, self.controller)?;
        for pin in &self.pins {
            controller.add_pin(&pin.id, &pin.target_id, pin.label_id.as_deref())?;
        }
        controller.start()?;
        Ok(controller)
    }
}
