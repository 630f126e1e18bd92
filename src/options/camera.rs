use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{camera::OrbitLimits, util::easing::EasingFunction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbit control parameters and the initial orbit pose.
pub struct CameraOptions {
    /// Initial look-at pivot.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Initial distance, used when the camera starts on the target.
    #[schemars(skip)]
    pub distance: f32,
    /// Initial yaw in degrees.
    #[schemars(skip)]
    pub yaw: f32,
    /// Initial pitch in degrees.
    #[schemars(skip)]
    pub pitch: f32,
    /// Closest zoom.
    #[schemars(title = "Min Distance", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub min_distance: f32,
    /// Farthest zoom.
    #[schemars(title = "Max Distance", range(min = 1.0, max = 100.0), extend("step" = 0.5))]
    pub max_distance: f32,
    /// Lowest pitch in degrees.
    #[schemars(title = "Min Pitch", range(min = -89.0, max = 0.0), extend("step" = 1.0))]
    pub min_pitch: f32,
    /// Highest pitch in degrees.
    #[schemars(title = "Max Pitch", range(min = 0.0, max = 89.0), extend("step" = 1.0))]
    pub max_pitch: f32,
    /// Degrees of rotation per dragged pixel.
    #[schemars(title = "Rotate Speed", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Fractional distance change per wheel notch.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Fly-to tween length in milliseconds.
    #[schemars(title = "Fly-to Duration", range(min = 0.0, max = 5000.0), extend("step" = 50.0))]
    pub fly_to_duration_ms: u32,
    /// Fly-to tween curve.
    #[schemars(skip)]
    pub fly_to_easing: EasingFunction,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            distance: 4.0,
            yaw: 30.0,
            pitch: -15.0,
            min_distance: 1.2,
            max_distance: 18.0,
            min_pitch: -80.0,
            max_pitch: 80.0,
            rotate_speed: 0.25,
            zoom_speed: 0.12,
            pan_speed: 0.8,
            fly_to_duration_ms: 900,
            fly_to_easing: EasingFunction::DEFAULT,
        }
    }
}

impl CameraOptions {
    /// Pitch and distance bounds.
    #[must_use]
    pub fn limits(&self) -> OrbitLimits {
        OrbitLimits::new(
            self.min_distance,
            self.max_distance,
            self.min_pitch,
            self.max_pitch,
        )
    }

    /// Fly-to tween length.
    #[must_use]
    pub fn fly_to_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.fly_to_duration_ms))
    }
}
