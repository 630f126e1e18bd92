//! Spherical orbit parameters and their conversion to and from world
//! positions.
//!
//! Convention: yaw rotates about world +Y, pitch tilts toward +Y, and both
//! are applied yaw-then-pitch to the base offset `(0, 0, distance)`. A yaw
//! of 0 with pitch 0 puts the eye on the target's +Z side; positive pitch
//! raises the eye above the target.

use glam::{EulerRot, Quat, Vec3};

/// Offsets shorter than this are treated as "eye on target" and carry no
/// direction information.
pub const DEGENERATE_OFFSET: f32 = 1e-4;

/// Bounds applied to pitch (degrees) and distance on every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    min_distance: f32,
    max_distance: f32,
    min_pitch: f32,
    max_pitch: f32,
}

impl OrbitLimits {
    /// Build limits, swapping any inverted pair so that `min <= max`.
    #[must_use]
    pub fn new(
        min_distance: f32,
        max_distance: f32,
        min_pitch: f32,
        max_pitch: f32,
    ) -> Self {
        let (min_distance, max_distance) = ordered(min_distance, max_distance);
        let (min_pitch, max_pitch) = ordered(min_pitch, max_pitch);
        Self {
            min_distance,
            max_distance,
            min_pitch,
            max_pitch,
        }
    }

    /// Lower distance bound.
    #[must_use]
    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Upper distance bound.
    #[must_use]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Lower pitch bound in degrees.
    #[must_use]
    pub fn min_pitch(&self) -> f32 {
        self.min_pitch
    }

    /// Upper pitch bound in degrees.
    #[must_use]
    pub fn max_pitch(&self) -> f32 {
        self.max_pitch
    }

    /// Clamp a distance into bounds. NaN maps to the lower bound.
    #[must_use]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return self.min_distance;
        }
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// Clamp a pitch (degrees) into bounds. NaN maps to 0 clamped.
    #[must_use]
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        let pitch = if pitch.is_nan() { 0.0 } else { pitch };
        pitch.clamp(self.min_pitch, self.max_pitch)
    }
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self::new(1.2, 18.0, -80.0, 80.0)
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Target point plus spherical offset (degrees) describing an orbit pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Look-at pivot in world space.
    pub target: Vec3,
    /// Horizontal angle around the target, degrees.
    pub yaw: f32,
    /// Vertical angle above the target's horizon, degrees.
    pub pitch: f32,
    /// Radial distance from target to eye.
    pub distance: f32,
}

impl OrbitState {
    /// Offset vector from target to eye.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        // Glam's pitch about +X tilts +Z downward, so negate to keep
        // positive pitch above the horizon (matches `set_from_position`).
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            -self.pitch.to_radians(),
            0.0,
        );
        rotation * Vec3::new(0.0, 0.0, self.distance)
    }

    /// World-space eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.target + self.offset()
    }

    /// Re-derive yaw, pitch and distance from an explicit eye position,
    /// keeping the current target. Pitch and distance are clamped. Returns `false` (and leaves the state
    /// untouched) when the eye coincides with the target.
    pub fn set_from_position(
        &mut self,
        position: Vec3,
        limits: &OrbitLimits,
    ) -> bool {
        let offset = position - self.target;
        let length = offset.length();
        if !length.is_finite() || length <= DEGENERATE_OFFSET {
            return false;
        }
        self.distance = limits.clamp_distance(length);
        // Clamping can shrink distance below |offset.y|; keep asin in domain.
        let sin_pitch = (offset.y / self.distance).clamp(-1.0, 1.0);
        self.pitch = limits.clamp_pitch(sin_pitch.asin().to_degrees());
        self.yaw = offset.x.atan2(offset.z).to_degrees();
        true
    }
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 30.0,
            pitch: -15.0,
            distance: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn limits_swap_inverted_bounds() {
        let limits = OrbitLimits::new(10.0, 2.0, 45.0, -45.0);
        assert_eq!(limits.min_distance(), 2.0);
        assert_eq!(limits.max_distance(), 10.0);
        assert_eq!(limits.min_pitch(), -45.0);
        assert_eq!(limits.max_pitch(), 45.0);
    }

    #[test]
    fn clamps_stay_in_bounds() {
        let limits = OrbitLimits::default();
        for pitch in [-1000.0, -80.5, -80.0, 0.0, 79.9, 80.0, 500.0, f32::NAN] {
            let p = limits.clamp_pitch(pitch);
            assert!((-80.0..=80.0).contains(&p), "pitch {pitch} -> {p}");
        }
        for distance in [-5.0, 0.0, 1.2, 4.0, 18.0, 1e9, f32::NAN, f32::INFINITY] {
            let d = limits.clamp_distance(distance);
            assert!((1.2..=18.0).contains(&d), "distance {distance} -> {d}");
        }
    }

    #[test]
    fn offset_length_is_distance() {
        let state = OrbitState::default();
        assert!((state.offset().length() - 4.0).abs() < EPS);
    }

    #[test]
    fn zero_angles_place_eye_on_positive_z() {
        let state = OrbitState {
            target: Vec3::new(1.0, 2.0, 3.0),
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
        };
        assert!((state.eye() - Vec3::new(1.0, 2.0, 8.0)).length() < EPS);
    }

    #[test]
    fn positive_pitch_is_above_target() {
        let state = OrbitState {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 30.0,
            distance: 2.0,
        };
        assert!((state.offset().y - 1.0).abs() < EPS);
    }

    #[test]
    fn yaw_ninety_points_along_positive_x() {
        let state = OrbitState {
            target: Vec3::ZERO,
            yaw: 90.0,
            pitch: 0.0,
            distance: 3.0,
        };
        assert!((state.offset() - Vec3::new(3.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn position_round_trip_reproduces_eye() {
        let limits = OrbitLimits::default();
        let target = Vec3::new(0.0, 1.1, 0.0);
        for eye in [
            Vec3::new(2.8, 1.7, 4.2),
            Vec3::new(-3.0, 0.2, 1.0),
            Vec3::new(0.5, -2.0, -4.0),
            Vec3::new(-6.0, 4.0, -6.0),
        ] {
            let mut state = OrbitState {
                target,
                ..OrbitState::default()
            };
            assert!(state.set_from_position(eye, &limits));
            assert!(
                (state.eye() - eye).length() < 1e-3,
                "eye {eye:?} reconstructed as {:?}",
                state.eye()
            );
        }
    }

    #[test]
    fn degenerate_position_is_skipped() {
        let limits = OrbitLimits::default();
        let mut state = OrbitState::default();
        let before = state;
        assert!(!state.set_from_position(state.target, &limits));
        assert_eq!(state, before);
    }

    #[test]
    fn steep_position_clamps_pitch() {
        let limits = OrbitLimits::default();
        let mut state = OrbitState::default();
        assert!(state.set_from_position(Vec3::new(0.0, -10.0, 0.1), &limits));
        assert_eq!(state.pitch, -80.0);
        assert!((state.distance - 10.0).abs() < 1e-3);
    }

    #[test]
    fn far_position_clamps_distance_without_nan() {
        let limits = OrbitLimits::default();
        let mut state = OrbitState::default();
        assert!(state.set_from_position(Vec3::new(0.0, 40.0, 0.0), &limits));
        assert_eq!(state.distance, 18.0);
        assert_eq!(state.pitch, 80.0);
        assert!(!state.yaw.is_nan());
    }
}
