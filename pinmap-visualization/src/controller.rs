//! Map scene controller
//!
//! Owns the scene, the camera and everything that moves it. Pin clicks become
//! camera flights; while a flight runs the orbit controls stay disabled and
//! come back, anchored at the flight's target, on the tick that completes it.

use crate::camera::Camera;
use crate::config::{validate_fov, MapControllerConfig};
use crate::controls::OrbitControls;
use crate::overlay::{OverlayLayer, TargetOverlay, Viewport};
use crate::panel::{Binding, DebugPanel, Folder, ParamValue};
use crate::shaders::GradientUniforms;
use pinmap_core::{Error, Light, NodeKind, Point3f, Result, SceneGraph};
use pinmap_motion::{build_curve_in_scene, CameraMotionDriver, DefaultView, MotionStatus, OnComplete};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

pub const HEMISPHERE_LIGHT_FOLDER: &str = "Hemisphere Light";
pub const DIRECTIONAL_LIGHT_FOLDER: &str = "Directional Light";
pub const SKY_FOLDER: &str = "Sky";
pub const CAMERA_FOLDER: &str = "Camera";

/// Binds a pin to the scene node the camera flies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    pub target_id: String,
}

/// A clickable pin and the label that follows it on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: String,
    pub anchor: AnchorRef,
    overlay: Option<TargetOverlay>,
}

impl Pin {
    pub fn overlay(&self) -> Option<&TargetOverlay> {
        self.overlay.as_ref()
    }
}

pub struct MapController {
    config: MapControllerConfig,
    scene: SceneGraph,
    camera: Camera,
    driver: CameraMotionDriver,
    controls: OrbitControls,
    default_view: DefaultView,
    pins: Vec<Pin>,
    overlays: OverlayLayer,
    panel: Option<DebugPanel>,
    sky: Option<GradientUniforms>,
    highlighted: Option<String>,
    /// Written by the completion callback of the active motion
    arrival: Rc<Cell<Option<Point3f>>>,
}

impl MapController {
    const CONTEXT: &'static str = "map-controller";
    const NAVIGATION_CONTEXT: &'static str = "move-to-target";

    /// Resolve every configured scene element and capture the default view.
    pub fn new(scene: SceneGraph, camera: Camera, overlays: OverlayLayer, config: MapControllerConfig) -> Result<Self> {
        scene.require(&config.camera_id, Self::CONTEXT)?;
        scene.require(&config.map_id, Self::CONTEXT)?;
        for id in [&config.hemisphere_light_id, &config.directional_light_id].into_iter().flatten() {
            light_of(&scene, id)?;
        }
        let sky = match &config.sky_id {
            Some(id) => {
                let node = scene.require(id, Self::CONTEXT)?;
                let uniforms = GradientUniforms::from_node(&node.kind)
                    .ok_or_else(|| Error::InvalidConfig(format!("scene node '{id}' is not a sky")))?;
                Some(uniforms)
            }
            None => None,
        };

        let default_view = DefaultView::new(
            config.navigation.initial_position.unwrap_or(camera.position),
            config.navigation.target,
        );
        let limits = if config.debug_paths() { None } else { Some(config.limits) };
        let controls = OrbitControls::new(default_view.target, limits);

        let mut controller = Self {
            driver: CameraMotionDriver::new(config.motion),
            config,
            scene,
            camera,
            controls,
            default_view,
            pins: Vec::new(),
            overlays,
            panel: None,
            sky,
            highlighted: None,
            arrival: Rc::new(Cell::new(None)),
        };
        if controller.config.debug {
            controller.panel = Some(controller.build_panel()?);
        }
        controller.sync_camera_node()?;

        info!(
            camera = %controller.config.camera_id,
            map = %controller.config.map_id,
            debug = controller.config.debug,
            "map controller ready"
        );
        Ok(controller)
    }

    fn build_panel(&self) -> Result<DebugPanel> {
        let mut panel = DebugPanel::new("Settings");

        if let Some(id) = &self.config.hemisphere_light_id {
            let light = light_of(&self.scene, id)?;
            panel.add_folder(
                Folder::new(HEMISPHERE_LIGHT_FOLDER)
                    .bind(Binding::new("intensity", ParamValue::Number(light.intensity)).with_step(0.1))
                    .bind(Binding::new("color", ParamValue::Color(light.color))),
            );
        }

        if let Some(id) = &self.config.directional_light_id {
            let light = light_of(&self.scene, id)?;
            let position = self.scene.require(id, Self::CONTEXT)?.transform.position;
            panel.add_folder(
                Folder::new(DIRECTIONAL_LIGHT_FOLDER)
                    .bind(Binding::new("position", ParamValue::Point(position)).with_step(0.1))
                    .bind(Binding::new("intensity", ParamValue::Number(light.intensity)).with_step(0.1))
                    .bind(Binding::new("color", ParamValue::Color(light.color)))
                    .bind(Binding::new("castShadow", ParamValue::Bool(light.cast_shadow)))
                    .bind(Binding::new("shadowBias", ParamValue::Number(light.shadow_bias)).with_step(0.00001))
                    .bind(Binding::new("shadowRadius", ParamValue::Number(light.shadow_radius))),
            );
        }

        if let Some(sky) = &self.sky {
            panel.add_folder(
                Folder::new(SKY_FOLDER)
                    .bind(Binding::new("topColor", ParamValue::Color(sky.top())))
                    .bind(Binding::new("bottomColor", ParamValue::Color(sky.bottom()))),
            );
        }

        panel.add_folder(
            Folder::new(CAMERA_FOLDER)
                .bind(Binding::new("fov", ParamValue::Number(self.camera.fov.to_degrees())).with_step(1.0)),
        );
        Ok(panel)
    }

    /// Fly to the configured start target, if any
    pub fn start(&mut self) -> Result<MotionStatus> {
        if self.config.navigation.target_id.is_empty() {
            return Ok(MotionStatus::Idle);
        }
        let target_id = self.config.navigation.target_id.clone();
        self.move_to_target(&target_id)
    }

    pub fn config(&self) -> &MapControllerConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene access for content changes. The camera node is
    /// rewritten from the camera on every tick.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn driver(&self) -> &CameraMotionDriver {
        &self.driver
    }

    pub fn default_view(&self) -> &DefaultView {
        &self.default_view
    }

    pub fn overlays(&self) -> &OverlayLayer {
        &self.overlays
    }

    pub fn panel(&self) -> Option<&DebugPanel> {
        self.panel.as_ref()
    }

    pub fn sky_uniforms(&self) -> Option<&GradientUniforms> {
        self.sky.as_ref()
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Register a pin flying to `target_id`, optionally labelled by an
    /// overlay element that follows the pin node.
    pub fn add_pin(&mut self, pin_id: &str, target_id: &str, label_id: Option<&str>) -> Result<()> {
        if self.pins.iter().any(|p| p.id == pin_id) {
            return Err(Error::InvalidConfig(format!("duplicate pin '{pin_id}'")));
        }
        self.scene.require(target_id, Self::NAVIGATION_CONTEXT)?;
        let overlay = match label_id {
            Some(label) => Some(TargetOverlay::new(&self.scene, &self.overlays, pin_id, label)?),
            None => {
                self.scene.require(pin_id, Self::CONTEXT)?;
                None
            }
        };

        debug!(pin = pin_id, target = target_id, "pin registered");
        self.pins.push(Pin {
            id: pin_id.to_string(),
            anchor: AnchorRef {
                target_id: target_id.to_string(),
            },
            overlay,
        });
        Ok(())
    }

    pub fn click_pin(&mut self, pin_id: &str) -> Result<MotionStatus> {
        let target_id = self
            .pins
            .iter()
            .find(|p| p.id == pin_id)
            .map(|p| p.anchor.target_id.clone())
            .ok_or_else(|| Error::missing(Self::CONTEXT, pin_id))?;
        info!(pin = pin_id, "pin clicked");
        self.move_to_target(&target_id)
    }

    /// Fly to the anchor `target_id`, stopping slightly above and in front
    /// of it.
    pub fn move_to_target(&mut self, target_id: &str) -> Result<MotionStatus> {
        self.scene.require(target_id, Self::NAVIGATION_CONTEXT)?;
        let target = self.scene.world_position(target_id)?;
        let options = self.config.approach.with_debug(self.config.debug_paths());
        let curve = build_curve_in_scene(&mut self.scene, self.camera.position, target, &options)?;

        info!(target = target_id, length = curve.length(), "moving camera to target");
        self.controls.disable();
        let on_complete = self.arrival_callback(target);
        let status = self.driver.move_camera(&mut self.camera, curve, target, Some(on_complete));
        self.settle()?;
        Ok(status)
    }

    /// Fly back to the default view
    pub fn move_to_default(&mut self) -> Result<MotionStatus> {
        info!("moving camera to default view");
        self.controls.disable();
        let default_view = self.default_view;
        let on_complete = self.arrival_callback(default_view.target);
        let status = self.driver.move_to_default(
            &mut self.camera,
            &mut self.scene,
            &default_view,
            self.config.debug_paths(),
            Some(on_complete),
        )?;
        self.settle()?;
        Ok(status)
    }

    /// Stop the running flight where it is and hand control back to the user
    pub fn cancel_motion(&mut self) -> bool {
        if !self.driver.cancel() {
            return false;
        }
        self.controls.enable_at(self.controls.target());
        true
    }

    fn arrival_callback(&self, target: Point3f) -> OnComplete {
        let arrival = self.arrival.clone();
        Box::new(move || arrival.set(Some(target)))
    }

    /// Apply completion side effects and mirror the camera into the scene
    fn settle(&mut self) -> Result<()> {
        if let Some(target) = self.arrival.take() {
            debug!(?target, "camera arrived, orbit controls re-enabled");
            self.controls.enable_at(target);
        }
        self.sync_camera_node()
    }

    fn sync_camera_node(&mut self) -> Result<()> {
        let node = self.scene.require_mut(&self.config.camera_id, Self::CONTEXT)?;
        node.transform.position = self.camera.position;
        node.transform.rotation = self.camera.orientation;
        Ok(())
    }

    /// Per-frame update: advance the flight, then reposition every overlay.
    pub fn tick(&mut self, dt: f32, viewport: &Viewport) -> Result<MotionStatus> {
        self.camera.resize(viewport.width, viewport.height);
        let status = self.driver.tick(&mut self.camera, dt);
        self.settle()?;

        for overlay in self.pins.iter().filter_map(|p| p.overlay.as_ref()) {
            overlay.tick(&self.scene, &self.camera, viewport, &mut self.overlays)?;
        }
        Ok(status)
    }

    /// Orbit input from the user, ignored during a flight
    pub fn orbit(&mut self, horizontal: f32, vertical: f32) -> bool {
        if self.driver.is_animating() {
            return false;
        }
        self.controls.orbit(&mut self.camera, horizontal, vertical)
    }

    /// Zoom input from the user, ignored during a flight
    pub fn zoom(&mut self, delta: f32) -> bool {
        if self.driver.is_animating() {
            return false;
        }
        self.controls.zoom(&mut self.camera, delta)
    }

    /// Highlight one map area, clearing the previous one
    pub fn highlight_area(&mut self, area_id: &str) -> Result<()> {
        let node = self.scene.require(area_id, Self::CONTEXT)?;
        if !matches!(node.kind, NodeKind::Area { .. }) {
            return Err(Error::InvalidData(format!("scene node '{area_id}' is not an area")));
        }

        self.clear_highlight();
        if let Some(node) = self.scene.get_mut(area_id) {
            node.kind = NodeKind::Area { highlighted: true };
        }
        self.highlighted = Some(area_id.to_string());
        Ok(())
    }

    pub fn clear_highlight(&mut self) {
        let Some(previous) = self.highlighted.take() else {
            return;
        };
        if let Some(node) = self.scene.get_mut(&previous) {
            if let NodeKind::Area { highlighted } = &mut node.kind {
                *highlighted = false;
            }
        }
    }

    /// Change a debug panel value and apply it to the scene
    pub fn set_debug_param(&mut self, folder: &str, key: &str, value: ParamValue) -> Result<()> {
        let panel = self
            .panel
            .as_mut()
            .ok_or_else(|| Error::InvalidConfig("debug panel is disabled".to_string()))?;
        if folder == CAMERA_FOLDER {
            validate_fov(expect_number(key, value)?)?;
        }
        panel.set(folder, key, value)?;

        match folder {
            HEMISPHERE_LIGHT_FOLDER => {
                let id = configured(&self.config.hemisphere_light_id, folder)?;
                apply_light_param(&mut self.scene, id, key, value)
            }
            DIRECTIONAL_LIGHT_FOLDER => {
                let id = configured(&self.config.directional_light_id, folder)?;
                if key == "position" {
                    self.scene.set_position(id, expect_point(key, value)?)
                } else {
                    apply_light_param(&mut self.scene, id, key, value)
                }
            }
            SKY_FOLDER => self.apply_sky_param(key, value),
            CAMERA_FOLDER => {
                self.camera.fov = expect_number(key, value)?.to_radians();
                Ok(())
            }
            _ => Err(Error::missing(Self::CONTEXT, folder)),
        }
    }

    fn apply_sky_param(&mut self, key: &str, value: ParamValue) -> Result<()> {
        let id = configured(&self.config.sky_id, SKY_FOLDER)?;
        let color = expect_color(key, value)?;
        let node = self.scene.require_mut(id, Self::CONTEXT)?;
        let NodeKind::Sky { top_color, bottom_color } = &mut node.kind else {
            return Err(Error::InvalidConfig(format!("scene node '{id}' is not a sky")));
        };
        match key {
            "topColor" => *top_color = color,
            "bottomColor" => *bottom_color = color,
            _ => return Err(Error::missing(SKY_FOLDER, key)),
        }
        self.sky = GradientUniforms::from_node(&node.kind);
        Ok(())
    }
}

impl std::fmt::Debug for MapController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapController")
            .field("camera", &self.camera)
            .field("driver", &self.driver)
            .field("controls", &self.controls)
            .field("pins", &self.pins.len())
            .field("highlighted", &self.highlighted)
            .finish()
    }
}

fn light_of(scene: &SceneGraph, id: &str) -> Result<Light> {
    match scene.require(id, MapController::CONTEXT)?.kind {
        NodeKind::Light(light) => Ok(light),
        _ => Err(Error::InvalidConfig(format!("scene node '{id}' is not a light"))),
    }
}

fn configured<'a>(id: &'a Option<String>, folder: &str) -> Result<&'a str> {
    id.as_deref()
        .ok_or_else(|| Error::InvalidConfig(format!("no scene node configured for '{folder}'")))
}

fn apply_light_param(scene: &mut SceneGraph, id: &str, key: &str, value: ParamValue) -> Result<()> {
    let node = scene.require_mut(id, MapController::CONTEXT)?;
    let NodeKind::Light(light) = &mut node.kind else {
        return Err(Error::InvalidConfig(format!("scene node '{id}' is not a light")));
    };
    match key {
        "intensity" => light.intensity = expect_number(key, value)?,
        "color" => light.color = expect_color(key, value)?,
        "castShadow" => {
            light.cast_shadow = value
                .as_bool()
                .ok_or_else(|| mismatch(key, value))?
        }
        "shadowBias" => light.shadow_bias = expect_number(key, value)?,
        "shadowRadius" => light.shadow_radius = expect_number(key, value)?,
        _ => return Err(Error::missing(id, key)),
    }
    Ok(())
}

fn mismatch(key: &str, value: ParamValue) -> Error {
    Error::InvalidData(format!("unexpected value {value:?} for '{key}'"))
}

fn expect_number(key: &str, value: ParamValue) -> Result<f32> {
    value.as_number().ok_or_else(|| mismatch(key, value))
}

fn expect_color(key: &str, value: ParamValue) -> Result<pinmap_core::Color> {
    value.as_color().ok_or_else(|| mismatch(key, value))
}

fn expect_point(key: &str, value: ParamValue) -> Result<Point3f> {
    value.as_point().ok_or_else(|| mismatch(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pinmap_core::{Color, SceneNode};

    fn scene() -> SceneGraph {
        SceneGraph::from_nodes([
            SceneNode::new("camera", NodeKind::Camera).with_position(Point3f::new(0.0, 15.0, 15.0)),
            SceneNode::new("map", NodeKind::Map),
            SceneNode::new("district", NodeKind::Area { highlighted: false }).with_parent("map"),
            SceneNode::new("harbour", NodeKind::Area { highlighted: false }).with_parent("map"),
            SceneNode::new("anchor-1", NodeKind::Anchor)
                .with_parent("map")
                .with_position(Point3f::new(10.0, 0.0, 0.0)),
            SceneNode::new("pin-1", NodeKind::Group)
                .with_parent("map")
                .with_position(Point3f::new(10.0, 0.5, 0.0)),
            SceneNode::new(
                "hemisphere-light",
                NodeKind::Light(Light::hemisphere(Color::WHITE, Color::BLUE, 0.6)),
            ),
            SceneNode::new("directional-light", NodeKind::Light(Light::directional(Color::WHITE, 0.8)))
                .with_position(Point3f::new(-1.0, 4.0, 2.0)),
            SceneNode::new(
                "sky",
                NodeKind::Sky {
                    top_color: Color::RED,
                    bottom_color: Color::BLUE,
                },
            ),
        ])
        .unwrap()
    }

    fn config() -> MapControllerConfig {
        MapControllerConfig {
            sky_id: Some("sky".to_string()),
            ..MapControllerConfig::default()
        }
    }

    fn controller() -> MapController {
        let camera = Camera::looking_at(Point3f::new(0.0, 15.0, 15.0), &Point3f::origin());
        let overlays = OverlayLayer::with_elements(["label-1"]);
        let mut controller = MapController::new(scene(), camera, overlays, config()).unwrap();
        controller.add_pin("pin-1", "anchor-1", Some("label-1")).unwrap();
        controller
    }

    fn run(controller: &mut MapController) {
        let viewport = Viewport::new(1280.0, 720.0);
        let mut frames = 0;
        while controller.is_animating() {
            controller.tick(1.0 / 60.0, &viewport).unwrap();
            frames += 1;
            assert!(frames < 100_000);
        }
    }

    #[test]
    fn test_missing_elements_fail_at_construction() {
        let overlays = OverlayLayer::new();
        let bad_camera = MapControllerConfig {
            camera_id: "nope".to_string(),
            ..config()
        };
        assert!(matches!(
            MapController::new(scene(), Camera::default(), overlays.clone(), bad_camera),
            Err(Error::MissingElement { .. })
        ));

        let not_a_light = MapControllerConfig {
            hemisphere_light_id: Some("map".to_string()),
            ..config()
        };
        assert!(matches!(
            MapController::new(scene(), Camera::default(), overlays, not_a_light),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_panel_folders() {
        let controller = controller();
        let panel = controller.panel().unwrap();
        let titles: Vec<_> = panel.folders().iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, [HEMISPHERE_LIGHT_FOLDER, DIRECTIONAL_LIGHT_FOLDER, SKY_FOLDER, CAMERA_FOLDER]);

        let directional = panel.folder(DIRECTIONAL_LIGHT_FOLDER).unwrap();
        assert_eq!(directional.get("shadowBias").unwrap().step, Some(0.00001));
        assert_eq!(directional.get("position").unwrap().value, ParamValue::Point(Point3f::new(-1.0, 4.0, 2.0)));
    }

    #[test]
    fn test_no_panel_without_debug() {
        let config = MapControllerConfig {
            debug: false,
            ..config()
        };
        let mut controller = MapController::new(scene(), Camera::default(), OverlayLayer::new(), config).unwrap();
        assert!(controller.panel().is_none());
        assert!(controller
            .set_debug_param(CAMERA_FOLDER, "fov", ParamValue::Number(60.0))
            .is_err());
    }

    #[test]
    fn test_hemisphere_edit_reaches_hemisphere_light() {
        let mut controller = controller();
        controller
            .set_debug_param(HEMISPHERE_LIGHT_FOLDER, "intensity", ParamValue::Number(1.5))
            .unwrap();

        let hemisphere = light_of(controller.scene(), "hemisphere-light").unwrap();
        let directional = light_of(controller.scene(), "directional-light").unwrap();
        assert_eq!(hemisphere.intensity, 1.5);
        assert_eq!(directional.intensity, 0.8);
    }

    #[test]
    fn test_directional_and_sky_edits() {
        let mut controller = controller();
        controller
            .set_debug_param(DIRECTIONAL_LIGHT_FOLDER, "position", ParamValue::Point(Point3f::new(3.0, 3.0, 3.0)))
            .unwrap();
        controller
            .set_debug_param(DIRECTIONAL_LIGHT_FOLDER, "castShadow", ParamValue::Bool(false))
            .unwrap();
        controller
            .set_debug_param(SKY_FOLDER, "topColor", ParamValue::Color(Color::WHITE))
            .unwrap();
        controller
            .set_debug_param(CAMERA_FOLDER, "fov", ParamValue::Number(60.0))
            .unwrap();

        let node = controller.scene().get("directional-light").unwrap();
        assert_eq!(node.transform.position, Point3f::new(3.0, 3.0, 3.0));
        assert!(!light_of(controller.scene(), "directional-light").unwrap().cast_shadow);
        assert_eq!(controller.sky_uniforms().unwrap().top(), Color::WHITE);
        assert_relative_eq!(controller.camera().fov, 60f32.to_radians());
    }

    #[test]
    fn test_controls_disabled_during_flight_and_anchored_after() {
        let mut controller = controller();
        let status = controller.click_pin("pin-1").unwrap();
        assert!(matches!(status, MotionStatus::Animating { .. }));
        assert!(!controller.controls().is_enabled());
        assert!(!controller.orbit(0.3, 0.0));

        run(&mut controller);
        assert!(controller.controls().is_enabled());
        assert_relative_eq!(controller.controls().target(), Point3f::new(10.0, 0.0, 0.0), epsilon = 1e-5);
        // Approach stops one unit up and three units back towards the start
        let end = controller.camera().position;
        assert_relative_eq!(end.y, 1.0, epsilon = 1e-4);
        assert!(end.x < 10.0);

        let node = controller.scene().get("camera").unwrap();
        assert_eq!(node.transform.position, end);
    }

    #[test]
    fn test_return_home() {
        let mut controller = controller();
        controller.click_pin("pin-1").unwrap();
        run(&mut controller);
        controller.move_to_default().unwrap();
        run(&mut controller);

        assert_relative_eq!(controller.camera().position, Point3f::new(0.0, 15.0, 15.0), epsilon = 1e-4);
        assert_eq!(controller.controls().target(), Point3f::origin());
    }

    #[test]
    fn test_return_home_from_home_is_immediate() {
        let mut controller = controller();
        let home = controller.camera().position;

        let status = controller.move_to_default().unwrap();
        assert_eq!(status, MotionStatus::Completed);
        assert!(!controller.is_animating());
        assert!(controller.controls().is_enabled());
        assert_eq!(controller.controls().target(), Point3f::origin());
        assert_relative_eq!(controller.camera().position, home, epsilon = 1e-6);
        assert_eq!(controller.tick(1.0 / 60.0, &Viewport::new(1280.0, 720.0)).unwrap(), MotionStatus::Idle);
    }

    #[test]
    fn test_fov_edit_out_of_range_rejected() {
        let mut controller = controller();
        let fov = controller.camera().fov;
        for degrees in [0.0, 180.0, -5.0] {
            assert!(controller.set_debug_param(CAMERA_FOLDER, "fov", ParamValue::Number(degrees)).is_err());
        }
        assert_eq!(controller.camera().fov, fov);
        controller.set_debug_param(CAMERA_FOLDER, "fov", ParamValue::Number(60.0)).unwrap();
        assert_relative_eq!(controller.camera().fov, 60f32.to_radians());
    }

    #[test]
    fn test_unknown_pin_and_target() {
        let mut controller = controller();
        assert!(controller.click_pin("pin-9").is_err());
        assert!(controller.move_to_target("anchor-9").is_err());
        assert!(controller.add_pin("pin-2", "anchor-9", None).is_err());
        assert!(controller.add_pin("pin-1", "anchor-1", None).is_err());
    }

    #[test]
    fn test_single_highlight() {
        let mut controller = controller();
        controller.highlight_area("district").unwrap();
        controller.highlight_area("harbour").unwrap();

        let highlighted: Vec<_> = controller
            .scene()
            .nodes()
            .filter(|n| matches!(n.kind, NodeKind::Area { highlighted: true }))
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(highlighted, ["harbour"]);
        assert_eq!(controller.highlighted(), Some("harbour"));

        assert!(controller.highlight_area("anchor-1").is_err());
        controller.clear_highlight();
        assert!(controller.highlighted().is_none());
    }

    #[test]
    fn test_cancel_hands_back_control() {
        let mut controller = controller();
        controller.click_pin("pin-1").unwrap();
        controller.tick(0.1, &Viewport::new(800.0, 600.0)).unwrap();
        assert!(controller.cancel_motion());
        assert!(controller.controls().is_enabled());
        assert!(!controller.cancel_motion());
    }
}
