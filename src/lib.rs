//! # pinmap
//!
//! Interactive 3D map viewer core for Rust.
//!
//! This is the umbrella crate that provides convenient access to all pinmap functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, transforms, lights, the id-addressed scene graph and errors
//! - **Motion**: Bézier flight paths, easing, tweens and the camera motion driver
//! - **Visualization**: Camera, orbit controls, screen overlays, the sky shader,
//!   the debug panel model and the map controller
//!
//! ## Quick Start
//!
//! ```rust
//! use pinmap::prelude::*;
//!
//! let target = Point3f::new(10.0, 0.0, 0.0);
//! let mut camera = Camera::looking_at(Point3f::new(0.0, 10.0, 20.0), &Point3f::origin());
//!
//! // Arc over the map, ending one unit up and three units short of the target
//! let curve = build_curve(camera.position, target, 1.0, 3.0);
//!
//! let mut driver = CameraMotionDriver::default();
//! driver.move_camera(&mut camera, curve, target, None);
//! while driver.is_animating() {
//!     driver.tick(&mut camera, 1.0 / 60.0);
//! }
//! assert!((camera.position.y - 1.0).abs() < 1e-4);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables motion and visualization
//! - `motion`: Flight paths and the motion driver
//! - `visualization`: Camera, overlays, shaders and the map controller (implies `motion`)

// Re-export core functionality
pub use pinmap_core::*;

// Re-export sub-crates
#[cfg(feature = "motion")]
pub use pinmap_motion as motion;

#[cfg(feature = "visualization")]
pub use pinmap_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use pinmap_core::*;

    #[cfg(feature = "motion")]
    pub use pinmap_motion::*;

    #[cfg(feature = "visualization")]
    pub use pinmap_visualization::*;
}
