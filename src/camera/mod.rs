//! Camera system for the splat viewer.
//!
//! Provides the orbit controller with rotation, panning, zoom and eased
//! fly-to tweens, plus a pointer-follow camera for parallax scenes.

/// Orbit/pan/zoom controller driven by input events and a per-frame update.
pub mod controller;
/// Host camera seam and a plain glam camera.
pub mod core;
/// Pointer-chasing camera.
pub mod follow;
/// Spherical orbit parameters and their bounds.
pub mod orbit;
/// Timed position/target blends.
pub mod tween;

pub use controller::OrbitController;
pub use core::{CameraHandle, SceneCamera};
pub use follow::PointerFollow;
pub use orbit::{OrbitLimits, OrbitState};
pub use tween::{CameraTween, TweenSample};
