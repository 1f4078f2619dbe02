//! Integration tests for pinmap-visualization
//!
//! These tests compose a full viewer from JSON and drive it frame by frame
//! through click, flight, arrival and the return to the default view.

use approx::assert_relative_eq;
use pinmap_core::{Error, NodeKind, Point3f, SceneGraph, SceneNode, Vector3f};
use pinmap_motion::{MotionStatus, DEBUG_LINE_NAME};
use pinmap_visualization::*;

const SCENE: &str = include_str!("../../demos/scene.json");

fn viewer() -> MapController {
    ViewerConfig::from_json_str(SCENE).unwrap().build().unwrap()
}

/// Tick until the running flight ends, returning the number of frames
fn fly(controller: &mut MapController, viewport: &Viewport) -> usize {
    let mut frames = 0;
    loop {
        let status = controller.tick(1.0 / 60.0, viewport).unwrap();
        frames += 1;
        assert!(frames < 100_000, "flight never completed");
        match status {
            MotionStatus::Completed => return frames,
            MotionStatus::Idle => panic!("no flight running"),
            MotionStatus::Animating { .. } => {}
        }
    }
}

#[test]
fn test_demo_scene_loads() {
    let controller = viewer();
    assert_eq!(controller.pins().len(), 2);
    assert!(controller.panel().is_some());
    assert_eq!(controller.sky_uniforms().unwrap().top(), pinmap_core::Color::RED);
    assert_eq!(controller.default_view().position, Point3f::new(0.0, 15.0, 15.0));
    assert!(controller.controls().is_enabled());
    assert!(!controller.is_animating());
}

#[test]
fn test_click_fly_arrive_and_return() {
    let mut controller = viewer();
    let viewport = Viewport::new(1280.0, 720.0);
    let anchor = Point3f::new(10.0, 0.0, 0.0);

    controller.click_pin("pin-old-town").unwrap();
    let length = controller.driver().motion().unwrap().curve().length();
    assert!(!controller.controls().is_enabled());

    let frames = fly(&mut controller, &viewport);
    let expected_frames = (length / 4.0 * 60.0).ceil() as usize;
    assert!((frames as i64 - expected_frames as i64).abs() <= 1);

    // Arrived above and in front of the anchor, looking at it
    let camera = controller.camera().clone();
    assert_relative_eq!(camera.position.y, 1.0, epsilon = 1e-4);
    let horizontal = Vector3f::new(camera.position.x - anchor.x, 0.0, camera.position.z - anchor.z);
    assert_relative_eq!(horizontal.norm(), 3.0, epsilon = 1e-3);
    assert_relative_eq!(camera.forward(), (anchor - camera.position).normalize(), epsilon = 1e-3);
    assert!(controller.controls().is_enabled());
    assert_eq!(controller.controls().target(), anchor);

    controller.move_to_default().unwrap();
    fly(&mut controller, &viewport);
    assert_relative_eq!(controller.camera().position, Point3f::new(0.0, 15.0, 15.0), epsilon = 1e-4);
    assert_relative_eq!(
        controller.camera().forward(),
        (Point3f::origin() - controller.camera().position).normalize(),
        epsilon = 1e-3
    );
    assert_eq!(controller.controls().target(), Point3f::origin());
}

#[test]
fn test_return_home_while_home_does_not_fly() {
    let mut controller = viewer();
    let home = controller.camera().position;

    assert_eq!(controller.move_to_default().unwrap(), MotionStatus::Completed);
    assert!(!controller.is_animating());
    assert!(controller.controls().is_enabled());
    assert_relative_eq!(controller.camera().position, home, epsilon = 1e-6);
}

#[test]
fn test_degenerate_camera_planes_fail_at_build() {
    let mut config = ViewerConfig::from_json_str(SCENE).unwrap();
    config.camera.near = 1.0;
    config.camera.far = 1.0;
    assert!(matches!(config.build(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_second_click_supersedes_first() {
    let mut controller = viewer();
    let viewport = Viewport::new(1280.0, 720.0);

    controller.click_pin("pin-old-town").unwrap();
    for _ in 0..20 {
        controller.tick(1.0 / 60.0, &viewport).unwrap();
    }
    controller.click_pin("pin-harbour").unwrap();
    fly(&mut controller, &viewport);

    assert_eq!(controller.controls().target(), Point3f::new(-8.0, 0.0, 4.0));
    assert!(!controller.is_animating());
    // One tick after arrival nothing else completes
    assert_eq!(controller.tick(1.0 / 60.0, &viewport).unwrap(), MotionStatus::Idle);
}

#[test]
fn test_labels_follow_pins() {
    let mut controller = viewer();
    let viewport = Viewport::new(1280.0, 720.0);

    controller.tick(0.0, &viewport).unwrap();
    let before = controller.overlays().get("label-old-town").unwrap().offset.unwrap();

    controller.click_pin("pin-old-town").unwrap();
    fly(&mut controller, &viewport);
    let after = controller.overlays().get("label-old-town").unwrap().offset.unwrap();

    // After arrival the pin sits close to the screen centre
    let center = viewport.center();
    assert!((after - center).norm() < (before - center).norm());
    assert!(controller
        .overlays()
        .get("label-harbour")
        .unwrap()
        .transform
        .starts_with("translate("));
}

#[test]
fn test_debug_paths_keep_single_line() {
    let mut config = ViewerConfig::from_json_str(SCENE).unwrap();
    config.controller.navigation.debug = true;
    let mut controller = config.build().unwrap();
    let viewport = Viewport::new(800.0, 600.0);

    controller.click_pin("pin-old-town").unwrap();
    fly(&mut controller, &viewport);
    controller.click_pin("pin-harbour").unwrap();
    fly(&mut controller, &viewport);

    let lines: Vec<_> = controller.scene().find_by_name(DEBUG_LINE_NAME).collect();
    assert_eq!(lines.len(), 1);
    match &lines[0].kind {
        NodeKind::Polyline { points, .. } => assert_eq!(points.len(), 31),
        other => panic!("unexpected node kind {other:?}"),
    }
    assert!(controller.controls().limits().is_none());
}

#[test]
fn test_start_target_flies_on_build() {
    let mut config = ViewerConfig::from_json_str(SCENE).unwrap();
    config.controller.navigation.target_id = "anchor-harbour".to_string();
    let mut controller = config.build().unwrap();
    assert!(controller.is_animating());

    fly(&mut controller, &Viewport::new(1280.0, 720.0));
    assert_eq!(controller.controls().target(), Point3f::new(-8.0, 0.0, 4.0));
}

#[test]
fn test_unresolved_ids_fail_fast() {
    let mut config = ViewerConfig::from_json_str(SCENE).unwrap();
    config.pins[0].label_id = Some("label-missing".to_string());
    let err = config.build().unwrap_err();
    assert!(matches!(err, Error::MissingElement { ref id, .. } if id == "label-missing"));

    let mut config = ViewerConfig::from_json_str(SCENE).unwrap();
    config.controller.navigation.target_id = "anchor-missing".to_string();
    assert!(matches!(config.build(), Err(Error::MissingElement { .. })));
}

#[test]
fn test_hand_built_scene() {
    let scene = SceneGraph::from_nodes([
        SceneNode::new("camera", NodeKind::Camera),
        SceneNode::new("map", NodeKind::Map),
        SceneNode::new("anchor", NodeKind::Anchor).with_position(Point3f::new(0.0, 0.0, -6.0)),
    ])
    .unwrap();
    let config = MapControllerConfig {
        hemisphere_light_id: None,
        directional_light_id: None,
        debug: false,
        ..MapControllerConfig::default()
    };
    let camera = Camera::looking_at(Point3f::new(0.0, 4.0, 8.0), &Point3f::origin());
    let mut controller = MapController::new(scene, camera, OverlayLayer::new(), config).unwrap();
    controller.add_pin("anchor", "anchor", None).unwrap();

    controller.click_pin("anchor").unwrap();
    fly(&mut controller, &Viewport::new(640.0, 480.0));
    assert_relative_eq!(controller.camera().position, Point3f::new(0.0, 1.0, -3.0), epsilon = 1e-4);

    // Orbit controls are limited outside debug mode
    assert!(controller.zoom(100.0));
    let distance = (controller.camera().position - Point3f::new(0.0, 0.0, -6.0)).norm();
    assert_relative_eq!(distance, 2.0, epsilon = 1e-4);
}
