//! Camera flight paths between two viewpoints
//!
//! A flight path is a quadratic Bézier whose control point is the angular
//! midpoint of both ends (seen from the world origin) pulled in towards the
//! origin, which bows the path into an arc over the map. The end point is
//! lifted and pulled back towards the start so the camera stops short of the
//! target instead of landing on it.

use crate::curve::{coincident, QuadraticBezier3};
use crate::spherical::angular_midpoint;
use pinmap_core::{horizontal_offset, is_finite_point, Color, NodeKind, Point3f, Result, SceneGraph, SceneNode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Name (and id) given to the debug path polyline
pub const DEBUG_LINE_NAME: &str = "debug_line";

/// Number of segments in the debug path polyline
pub const DEBUG_LINE_DIVISIONS: usize = 30;

/// Scale applied to the control point's radius by default
pub const DEFAULT_CONTROL_FACTOR: f32 = 0.5;

/// Shape parameters for a flight path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathOptions {
    /// Height added to the end point
    pub vertical_offset: f32,
    /// Horizontal distance the end point is pulled back towards the start
    pub lateral_radius: f32,
    /// Scale applied to the control point's radius
    pub control_factor: f32,
    /// Materialise the path as a polyline in the scene
    pub debug: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            vertical_offset: 0.0,
            lateral_radius: 0.0,
            control_factor: DEFAULT_CONTROL_FACTOR,
            debug: false,
        }
    }
}

impl PathOptions {
    pub fn new(vertical_offset: f32, lateral_radius: f32) -> Self {
        Self {
            vertical_offset,
            lateral_radius,
            ..Self::default()
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Build a flight path from `start` to `end`
///
/// # Example
/// ```rust
/// use pinmap_core::Point3f;
/// use pinmap_motion::build_curve;
///
/// let curve = build_curve(Point3f::new(0.0, 0.0, 0.0), Point3f::new(10.0, 0.0, 0.0), 1.0, 3.0);
/// let end = curve.end();
/// assert!((end.y - 1.0).abs() < 1e-6);
/// assert!((end.x - 7.0).abs() < 1e-5);
/// ```
pub fn build_curve(start: Point3f, end: Point3f, vertical_offset: f32, lateral_radius: f32) -> QuadraticBezier3 {
    build_curve_with(start, end, &PathOptions::new(vertical_offset, lateral_radius))
}

/// Build a flight path with explicit options. Ignores `options.debug`.
pub fn build_curve_with(start: Point3f, end: Point3f, options: &PathOptions) -> QuadraticBezier3 {
    let control = angular_midpoint(&start, &end, options.control_factor);
    let mut end_point = Point3f::new(end.x, end.y + options.vertical_offset, end.z);

    let back = horizontal_offset(&end_point, &start);
    let distance = back.norm();
    if distance > f32::EPSILON && distance.is_finite() {
        let direction = back / distance;
        end_point.x += direction.x * options.lateral_radius;
        end_point.z += direction.y * options.lateral_radius;
    } else if options.lateral_radius != 0.0 {
        warn!("start and end share a horizontal position, skipping lateral offset");
    }

    // Coincident ends would otherwise bow the path out towards the origin and back
    let control = if coincident(&start, &end_point) || !is_finite_point(&control) {
        start
    } else {
        control
    };
    debug!(?start, ?control, end = ?end_point, "built flight path");
    QuadraticBezier3::new(start, control, end_point)
}

/// Line strip node visualising `curve`
pub fn debug_polyline(curve: &QuadraticBezier3) -> SceneNode {
    SceneNode::new(
        DEBUG_LINE_NAME,
        NodeKind::Polyline {
            points: curve.points(DEBUG_LINE_DIVISIONS),
            color: Color::RED,
            opacity: 1.0,
        },
    )
    .with_name(DEBUG_LINE_NAME)
}

/// Build a flight path and, when `options.debug` is set, replace the scene's
/// debug polyline with one tracing the new path
pub fn build_curve_in_scene(
    scene: &mut SceneGraph,
    start: Point3f,
    end: Point3f,
    options: &PathOptions,
) -> Result<QuadraticBezier3> {
    let curve = build_curve_with(start, end, options);
    if options.debug {
        scene.replace_named(debug_polyline(&curve))?;
    }
    Ok(curve)
}
