//! Core data structures and traits for pinmap
//!
//! This crate provides the fundamental types shared by the map viewer:
//! points, transforms, the id-addressed scene graph, light parameters,
//! the camera rig trait and the common error type.

pub mod point;
pub mod transform;
pub mod light;
pub mod scene;
pub mod traits;
pub mod error;

pub use point::*;
pub use transform::*;
pub use light::*;
pub use scene::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
