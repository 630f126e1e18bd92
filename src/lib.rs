// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera controls, annotations and viewer state for gaussian-splat
//! web widgets.
//!
//! Splatview is the interaction core of a splat viewer: it turns pointer
//! and wheel input into an orbiting camera, flies the camera to annotation
//! markers, and tracks the widget's lazy start-up and asset status. The
//! host engine owns rendering and the scene graph; splatview only writes
//! the host camera through [`camera::CameraHandle`].
//!
//! # Key entry points
//!
//! - [`camera::OrbitController`] - orbit/pan/zoom controller with fly-to
//!   tweens and an idempotent per-frame `update()`
//! - [`binding::ControlsBinding`] - attaches a controller to an input
//!   surface and a frame source, with idempotent teardown
//! - [`viewer::SplatViewer`] - lazy widget start-up, asset status, markers
//!   and the info panel
//! - [`options::Options`] - TOML-loadable configuration
//!
//! # Hosts
//!
//! Native hosts feed [`input::EventBus`] and [`input::FrameSignal`] from
//! their event loop (the `viewer` feature adds a `winit` adapter). Browser
//! hosts enable the `web` feature for a canvas surface and a
//! `requestAnimationFrame` frame source.

pub mod annotation;
pub mod binding;
pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod util;
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use binding::{ControlsBinding, SharedController};
pub use camera::{CameraHandle, OrbitController, SceneCamera};
pub use error::SplatViewError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use viewer::{AssetStatus, SplatViewer};
