//! Screen-space overlays glued to 3D anchors
//!
//! A [`TargetOverlay`] projects a scene node into pixel coordinates every
//! frame and writes the result as a CSS-style translation into an element of
//! the retained [`OverlayLayer`]. Nothing is cached between frames because the
//! camera and the node can both move independently.

use crate::camera::Camera;
use pinmap_core::{Error, Point2f, Point3f, Result, SceneGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Size of the render canvas in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2f {
        Point2f::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Convert normalized device coordinates to pixels, origin top-left, Y down
pub fn ndc_to_pixels(ndc: &Point3f, viewport: &Viewport) -> Point2f {
    Point2f::new(
        (ndc.x + 1.0) / 2.0 * viewport.width,
        (-ndc.y + 1.0) / 2.0 * viewport.height,
    )
}

/// A 2D element of the overlay layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayElement {
    pub id: String,
    /// Last pixel offset written
    pub offset: Option<Point2f>,
    /// Style transform, e.g. `translate(10px, 20px)`
    pub transform: String,
}

impl OverlayElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn translate(&mut self, offset: Point2f) {
        self.transform = format!("translate({}px, {}px)", offset.x, offset.y);
        self.offset = Some(offset);
    }
}

/// Retained UI layer holding overlay elements by id
#[derive(Debug, Clone, Default)]
pub struct OverlayLayer {
    elements: HashMap<String, OverlayElement>,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut layer = Self::new();
        for id in ids {
            layer.add(OverlayElement::new(id));
        }
        layer
    }

    pub fn add(&mut self, element: OverlayElement) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn get(&self, id: &str) -> Option<&OverlayElement> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut OverlayElement> {
        self.elements.get_mut(id).ok_or_else(|| Error::missing(TargetOverlay::CONTEXT, id))
    }
}

/// Keeps an overlay element positioned over a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOverlay {
    node_id: String,
    element_id: String,
}

impl TargetOverlay {
    const CONTEXT: &'static str = "move-pin";

    /// Bind `element_id` to `node_id`. Both must already exist.
    pub fn new(scene: &SceneGraph, layer: &OverlayLayer, node_id: &str, element_id: &str) -> Result<Self> {
        scene.require(node_id, Self::CONTEXT)?;
        if !layer.contains(element_id) {
            return Err(Error::missing(Self::CONTEXT, element_id));
        }
        Ok(Self {
            node_id: node_id.to_string(),
            element_id: element_id.to_string(),
        })
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Project the node and move the element there. Returns the pixel offset.
    pub fn tick(
        &self,
        scene: &SceneGraph,
        camera: &Camera,
        viewport: &Viewport,
        layer: &mut OverlayLayer,
    ) -> Result<Point2f> {
        let world = scene.world_position(&self.node_id)?;
        let pixels = ndc_to_pixels(&camera.project(&world), viewport);
        layer.require_mut(&self.element_id)?.translate(pixels);
        Ok(pixels)
    }
}
