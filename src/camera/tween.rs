use glam::Vec3;

use crate::util::easing::EasingFunction;

/// Time-bounded blend between two (eye position, look-at target) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTween {
    start_ms: f64,
    duration_ms: f64,
    start_position: Vec3,
    end_position: Vec3,
    start_target: Vec3,
    end_target: Vec3,
    easing: EasingFunction,
}

/// One evaluated frame of a [`CameraTween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    /// Interpolated eye position.
    pub position: Vec3,
    /// Interpolated look-at target.
    pub target: Vec3,
    /// Whether progress has reached 1.
    pub finished: bool,
}

impl CameraTween {
    /// Start a tween at `start_ms` lasting `duration_ms`. Negative or NaN
    /// durations are treated as zero (the tween completes on first sample).
    #[must_use]
    pub fn new(
        start_ms: f64,
        duration_ms: f64,
        (start_position, start_target): (Vec3, Vec3),
        (end_position, end_target): (Vec3, Vec3),
        easing: EasingFunction,
    ) -> Self {
        Self {
            start_ms,
            duration_ms: if duration_ms > 0.0 { duration_ms } else { 0.0 },
            start_position,
            end_position,
            start_target,
            end_target,
            easing,
        }
    }

    /// Destination eye position.
    #[must_use]
    pub fn end_position(&self) -> Vec3 {
        self.end_position
    }

    /// Destination look-at target.
    #[must_use]
    pub fn end_target(&self) -> Vec3 {
        self.end_target
    }

    /// Normalized progress in [0, 1] at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t.is_nan() {
            return 1.0;
        }
        t.clamp(0.0, 1.0) as f32
    }

    /// Evaluate the eased blend at `now_ms`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> TweenSample {
        let t = self.progress(now_ms);
        let e = self.easing.evaluate(t);
        TweenSample {
            position: blend(self.start_position, self.end_position, e),
            target: blend(self.start_target, self.end_target, e),
            finished: t >= 1.0,
        }
    }
}

/// `a·(1-e) + b·e`, exact at both endpoints.
fn blend(a: Vec3, b: Vec3, e: f32) -> Vec3 {
    a * (1.0 - e) + b * e
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween() -> CameraTween {
        CameraTween::new(
            1000.0,
            900.0,
            (Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO),
            (Vec3::new(4.0, 2.0, -2.0), Vec3::new(0.0, 1.0, 0.0)),
            EasingFunction::SmoothStep,
        )
    }

    #[test]
    fn start_yields_exact_start_state() {
        let s = tween().sample(1000.0);
        assert_eq!(s.position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(s.target, Vec3::ZERO);
        assert!(!s.finished);
    }

    #[test]
    fn before_start_clamps_to_start() {
        let s = tween().sample(0.0);
        assert_eq!(s.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn end_yields_exact_end_state() {
        let tw = tween();
        for now in [1900.0, 5000.0] {
            let s = tw.sample(now);
            assert_eq!(s.position, tw.end_position());
            assert_eq!(s.target, tw.end_target());
            assert!(s.finished);
        }
    }

    #[test]
    fn midpoint_is_eased_half() {
        let s = tween().sample(1450.0);
        assert!((s.position - Vec3::new(3.0, 1.0, -1.0)).length() < 1e-5);
        assert!((s.target - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn quarter_progress_follows_smoothstep() {
        // t = 0.25 → e = 0.0625 * 2.5 = 0.15625
        let s = tween().sample(1225.0);
        assert!((s.position.x - (2.0 + 2.0 * 0.15625)).abs() < 1e-5);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let tw = CameraTween::new(
            0.0,
            0.0,
            (Vec3::ZERO, Vec3::ZERO),
            (Vec3::ONE, Vec3::ONE),
            EasingFunction::SmoothStep,
        );
        assert_eq!(tw.progress(0.0), 1.0);
        assert!(tw.sample(0.0).finished);
        assert_eq!(tw.sample(0.0).position, Vec3::ONE);
    }
}
