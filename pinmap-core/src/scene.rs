//! Retained scene graph addressed by string ids
//!
//! The map viewer resolves everything it touches (camera rig, lights, pins'
//! anchors, overlay targets) through this graph. Lookups that the caller
//! relies on go through [`SceneGraph::require`], which turns a missing id into
//! a fatal [`Error::MissingElement`].

use crate::error::{Error, Result};
use crate::light::{Color, Light};
use crate::point::Point3f;
use crate::transform::Transform3D;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// What a scene node represents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "type")]
pub enum NodeKind {
    Group,
    Camera,
    Map,
    /// Destination viewpoint a pin points at
    Anchor,
    /// Region of the map that can be highlighted
    Area { highlighted: bool },
    Light(Light),
    /// Gradient sky dome
    Sky { top_color: Color, bottom_color: Color },
    /// Line strip, used for path visualisation
    Polyline { points: Vec<Point3f>, color: Color, opacity: f32 },
}

/// A node in the scene graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub transform: Transform3D,
    pub kind: NodeKind,
}

impl SceneNode {
    /// Create a root node at the origin
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            parent: None,
            transform: Transform3D::identity(),
            kind,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_position(mut self, position: Point3f) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }
}

/// Scene graph container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: HashMap<String, SceneNode>,
}

impl SceneGraph {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from nodes listed parents-first
    pub fn from_nodes(nodes: impl IntoIterator<Item = SceneNode>) -> Result<Self> {
        let mut scene = Self::new();
        for node in nodes {
            scene.insert(node)?;
        }
        Ok(scene)
    }

    /// Number of nodes in the scene
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node. Ids are unique and the parent must already exist.
    pub fn insert(&mut self, node: SceneNode) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(Error::InvalidData(format!("duplicate scene node id '{}'", node.id)));
        }
        if let Some(parent) = &node.parent {
            if !self.nodes.contains_key(parent) {
                return Err(Error::missing(format!("scene node '{}'", node.id), parent.clone()));
            }
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Remove a node and all of its descendants
    pub fn remove(&mut self, id: &str) -> Option<SceneNode> {
        let removed = self.nodes.remove(id)?;
        let children: Vec<String> = self
            .nodes
            .values()
            .filter(|n| n.parent.as_deref() == Some(id))
            .map(|n| n.id.clone())
            .collect();
        for child in children {
            self.remove(&child);
        }
        Some(removed)
    }

    /// Insert `node`, first removing every node that carries the same name
    pub fn replace_named(&mut self, node: SceneNode) -> Result<()> {
        if let Some(name) = node.name.clone() {
            let stale: Vec<String> = self
                .nodes
                .values()
                .filter(|n| n.name.as_deref() == Some(name.as_str()))
                .map(|n| n.id.clone())
                .collect();
            if !stale.is_empty() {
                debug!(name = %name, count = stale.len(), "replacing named scene nodes");
            }
            for id in stale {
                self.remove(&id);
            }
        }
        self.remove(&node.id);
        self.insert(node)
    }

    pub fn get(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Look up a node the caller cannot work without
    pub fn require(&self, id: &str, context: &str) -> Result<&SceneNode> {
        self.nodes.get(id).ok_or_else(|| Error::missing(context, id))
    }

    pub fn require_mut(&mut self, id: &str, context: &str) -> Result<&mut SceneNode> {
        self.nodes.get_mut(id).ok_or_else(|| Error::missing(context, id))
    }

    /// All nodes with the given name
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SceneNode> + 'a {
        self.nodes.values().filter(move |n| n.name.as_deref() == Some(name))
    }

    /// Iterate over all nodes in unspecified order
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes.values_mut()
    }

    /// World matrix of a node, composed along its parent chain. Parents can be
    /// rewritten through [`SceneGraph::get_mut`], so a chain longer than the
    /// graph itself is reported as a cycle.
    pub fn world_matrix(&self, id: &str) -> Result<Matrix4<f32>> {
        let mut node = self.require(id, "scene")?;
        let mut matrix = node.transform.to_homogeneous();
        let mut depth = 0;
        while let Some(parent) = &node.parent {
            depth += 1;
            if depth > self.nodes.len() {
                return Err(Error::InvalidData(format!("parent cycle at scene node '{id}'")));
            }
            node = self.require(parent, "scene")?;
            matrix = node.transform.to_homogeneous() * matrix;
        }
        Ok(matrix)
    }

    /// World-space position of a node's origin
    pub fn world_position(&self, id: &str) -> Result<Point3f> {
        let matrix = self.world_matrix(id)?;
        Ok(Point3f::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]))
    }

    /// Set a node's local position
    pub fn set_position(&mut self, id: &str, position: Point3f) -> Result<()> {
        self.require_mut(id, "scene")?.transform.position = position;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_scene() -> SceneGraph {
        SceneGraph::from_nodes([
            SceneNode::new("map", NodeKind::Map).with_position(Point3f::new(10.0, 0.0, 0.0)),
            SceneNode::new("district", NodeKind::Area { highlighted: false })
                .with_parent("map")
                .with_position(Point3f::new(1.0, 2.0, 3.0)),
            SceneNode::new("anchor", NodeKind::Anchor)
                .with_parent("district")
                .with_position(Point3f::new(0.0, 1.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_world_position_composes_parents() {
        let scene = sample_scene();
        let p = scene.world_position("anchor").unwrap();
        assert_relative_eq!(p, Point3f::new(11.0, 3.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_parent_cycle_is_error() {
        let mut scene = sample_scene();
        scene.get_mut("map").unwrap().parent = Some("anchor".to_string());
        assert!(matches!(scene.world_position("anchor"), Err(Error::InvalidData(_))));

        let mut scene = sample_scene();
        scene.get_mut("district").unwrap().parent = Some("district".to_string());
        assert!(matches!(scene.world_matrix("district"), Err(Error::InvalidData(_))));
        assert!(scene.world_matrix("map").is_ok());
    }

    #[test]
    fn test_require_missing_is_fatal_error() {
        let scene = sample_scene();
        let err = scene.require("nope", "move-to-target").unwrap_err();
        assert!(matches!(err, Error::MissingElement { ref id, .. } if id == "nope"));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_orphans() {
        let mut scene = sample_scene();
        assert!(scene.insert(SceneNode::new("map", NodeKind::Group)).is_err());
        assert!(scene.insert(SceneNode::new("pin", NodeKind::Group).with_parent("ghost")).is_err());
    }

    #[test]
    fn test_remove_drops_descendants() {
        let mut scene = sample_scene();
        assert!(scene.remove("district").is_some());
        assert!(scene.get("anchor").is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_replace_named_keeps_single_node() {
        let mut scene = sample_scene();
        let line = |id: &str| {
            SceneNode::new(id, NodeKind::Polyline { points: vec![], color: Color::RED, opacity: 1.0 })
                .with_name("debug_line")
        };
        scene.replace_named(line("debug_line")).unwrap();
        scene.replace_named(line("debug_line")).unwrap();
        scene.replace_named(line("other_line")).unwrap();
        assert_eq!(scene.find_by_name("debug_line").count(), 1);
        assert!(scene.get("other_line").is_some());
        assert!(scene.get("debug_line").is_none());
    }
}
