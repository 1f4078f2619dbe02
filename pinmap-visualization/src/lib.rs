//! Visualization and scene control for the map viewer
//!
//! This crate provides everything between the motion driver and the host
//! rendering engine:
//! - Perspective camera and orbit controls
//! - Screen overlays that follow scene nodes
//! - The gradient sky shader and its uniform block
//! - The debug panel parameter model
//! - The map controller and its JSON configuration

pub mod camera;
pub mod controls;
pub mod overlay;
pub mod shaders;
pub mod panel;
pub mod controller;
pub mod config;

pub use camera::*;
pub use controls::*;
pub use overlay::*;
pub use shaders::*;
pub use panel::*;
pub use controller::*;
pub use config::*;
