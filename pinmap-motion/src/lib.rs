//! # pinmap Motion
//!
//! Camera flight paths and the machinery that moves a camera along them.
//!
//! This crate provides the quadratic Bézier curves used as flight paths,
//! the path builder that shapes them into an arc over the map, easing
//! curves, a frame-driven tween, and the camera motion driver that
//! interpolates position and orientation tick by tick.

pub mod curve;
pub mod spherical;
pub mod path;
pub mod easing;
pub mod tween;
pub mod driver;

// Re-export commonly used items
pub use curve::*;
pub use spherical::*;
pub use path::*;
pub use easing::*;
pub use tween::*;
pub use driver::*;
