//! Shared utilities: easing curves and time sources.

/// Millisecond clocks for tween timing.
pub mod clock;
/// Easing curves for fly-to tweens.
pub mod easing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use easing::EasingFunction;
