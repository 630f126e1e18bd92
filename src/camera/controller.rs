use std::time::Duration;

use glam::Vec3;

use super::{
    core::CameraHandle,
    orbit::{OrbitLimits, OrbitState},
    tween::CameraTween,
};
use crate::{
    input::{DragMode, DragSession, InputEvent, MouseButton},
    options::CameraOptions,
    util::{
        clock::{Clock, SystemClock},
        easing::EasingFunction,
    },
};

/// Pan distance per pixel, per unit of orbit distance, before `pan_speed`.
const PAN_SCALE: f32 = 0.002;

/// Orbit/pan/zoom camera controller with eased fly-to tweens.
///
/// Owns the orbit parameters and drag state; writes the host camera only
/// from [`update`](Self::update). Input handlers mutate controller state
/// and never touch the camera transform.
pub struct OrbitController<C: CameraHandle, K: Clock = SystemClock> {
    camera: C,
    clock: K,
    orbit: OrbitState,
    limits: OrbitLimits,

    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
    fly_to_duration: Duration,
    easing: EasingFunction,

    drag: Option<DragSession>,
    tween: Option<CameraTween>,
    needs_update: bool,
    enabled: bool,
    destroyed: bool,
}

impl<C: CameraHandle> OrbitController<C, SystemClock> {
    /// Create a controller timed by the system clock.
    #[must_use]
    pub fn new(camera: C, options: &CameraOptions) -> Self {
        Self::with_clock(camera, options, SystemClock::new())
    }
}

impl<C: CameraHandle, K: Clock> OrbitController<C, K> {
    /// Create a controller with an explicit time source.
    ///
    /// Yaw, pitch and distance are back-derived from the camera's current
    /// position relative to `options.target`, so the controller starts in
    /// sync with wherever the host placed the camera. If the camera sits on
    /// the target, the configured angles and distance are kept.
    #[must_use]
    pub fn with_clock(camera: C, options: &CameraOptions, clock: K) -> Self {
        let limits = options.limits();
        let mut orbit = OrbitState {
            target: Vec3::from(options.target),
            yaw: options.yaw,
            pitch: limits.clamp_pitch(options.pitch),
            distance: limits.clamp_distance(options.distance),
        };
        let _ = orbit.set_from_position(camera.position(), &limits);

        log::debug!(
            "orbit controller: yaw={:.1} pitch={:.1} distance={:.2}",
            orbit.yaw,
            orbit.pitch,
            orbit.distance
        );

        Self {
            camera,
            clock,
            orbit,
            limits,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            pan_speed: options.pan_speed,
            fly_to_duration: options.fly_to_duration(),
            easing: options.fly_to_easing,
            drag: None,
            tween: None,
            needs_update: true,
            enabled: true,
            destroyed: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Read-only access to the host camera.
    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Current orbit parameters.
    #[must_use]
    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    /// Look-at pivot.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.orbit.target
    }

    /// Horizontal angle in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.orbit.yaw
    }

    /// Vertical angle in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.orbit.pitch
    }

    /// Distance from target to eye.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.orbit.distance
    }

    /// Active pitch and distance bounds.
    #[must_use]
    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Whether input and updates are processed.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled && !self.destroyed
    }

    /// Enable or disable the controller. Has no effect after
    /// [`destroy`](Self::destroy).
    pub fn set_enabled(&mut self, enabled: bool) {
        if !self.destroyed {
            self.enabled = enabled;
        }
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Mode of the drag in progress, if any.
    #[must_use]
    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|d| d.mode())
    }

    /// Whether a fly-to tween is in flight.
    #[must_use]
    pub fn is_tweening(&self) -> bool {
        self.tween.is_some()
    }

    /// Whether the next [`update`](Self::update) will recompute the pose.
    #[must_use]
    pub fn needs_update(&self) -> bool {
        self.needs_update || self.tween.is_some()
    }

    // ── Direct mutation ──────────────────────────────────────────────────

    /// Move the look-at pivot.
    pub fn set_target(&mut self, target: Vec3) {
        self.orbit.target = target;
        self.needs_update = true;
    }

    /// Set the horizontal angle (degrees).
    pub fn set_yaw(&mut self, yaw: f32) {
        self.orbit.yaw = yaw;
        self.needs_update = true;
    }

    /// Set the vertical angle (degrees), clamped to the pitch bounds.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.orbit.pitch = self.limits.clamp_pitch(pitch);
        self.needs_update = true;
    }

    /// Set the orbit distance, clamped to the distance bounds.
    pub fn set_distance(&mut self, distance: f32) {
        self.orbit.distance = self.limits.clamp_distance(distance);
        self.needs_update = true;
    }

    /// Re-apply speeds, bounds and fly-to settings from `options` without
    /// resetting the current pose. The target and initial angles in
    /// `options` are ignored.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.limits = options.limits();
        self.rotate_speed = options.rotate_speed;
        self.zoom_speed = options.zoom_speed;
        self.pan_speed = options.pan_speed;
        self.fly_to_duration = options.fly_to_duration();
        self.easing = options.fly_to_easing;
        self.orbit.pitch = self.limits.clamp_pitch(self.orbit.pitch);
        self.orbit.distance = self.limits.clamp_distance(self.orbit.distance);
        self.needs_update = true;
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Permanently disable the controller. Pending drags and tweens are
    /// dropped; later input and updates are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.enabled = false;
        self.drag = None;
        self.tween = None;
        log::debug!("orbit controller destroyed");
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Process one input event. Returns `true` when the host should
    /// suppress the platform default action (text selection, page scroll,
    /// context menu).
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        // Right-drag pans, so the context menu is always suppressed.
        if event == InputEvent::ContextMenu {
            return true;
        }
        // A release must end the drag even if it arrives while disabled.
        if matches!(event, InputEvent::PointerUp | InputEvent::PointerLeave) {
            self.drag = None;
            return false;
        }
        if !self.enabled() {
            return false;
        }

        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                shift,
            } => {
                self.begin_drag(x, y, button, shift);
                true
            }
            InputEvent::PointerMove { x, y } => {
                self.drag_to(x, y);
                false
            }
            InputEvent::Wheel { delta_y } => {
                self.zoom(delta_y);
                true
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => false,
            InputEvent::ContextMenu => true,
        }
    }

    fn begin_drag(&mut self, x: f32, y: f32, button: MouseButton, shift: bool) {
        let mode = DragMode::for_press(button, shift);
        self.drag = Some(DragSession::begin(mode, x, y));
    }

    fn drag_to(&mut self, x: f32, y: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta = drag.advance(x, y);

        match drag.mode() {
            DragMode::Orbit => {
                self.orbit.yaw -= delta.x * self.rotate_speed;
                self.orbit.pitch = self
                    .limits
                    .clamp_pitch(self.orbit.pitch - delta.y * self.rotate_speed);
            }
            DragMode::Pan => {
                let scale = self.orbit.distance * PAN_SCALE * self.pan_speed;
                let right = self.camera.right() * (-delta.x * scale);
                let up = self.camera.up() * (delta.y * scale);
                self.orbit.target += right + up;
            }
        }
        self.needs_update = true;
    }

    fn zoom(&mut self, delta_y: f32) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let factor = 1.0 + delta_y.signum() * self.zoom_speed;
        self.orbit.distance = self.limits.clamp_distance(self.orbit.distance * factor);
        self.needs_update = true;
    }

    // ── Fly-to ───────────────────────────────────────────────────────────

    /// Fly the camera to `position`, looking at `look_at`, over the
    /// configured fly-to duration. Does nothing if either point is missing.
    pub fn move_to(&mut self, position: Option<Vec3>, look_at: Option<Vec3>) {
        self.move_to_with_duration(position, look_at, self.fly_to_duration);
    }

    /// [`move_to`](Self::move_to) with an explicit duration. Replaces any
    /// tween already in flight.
    pub fn move_to_with_duration(
        &mut self,
        position: Option<Vec3>,
        look_at: Option<Vec3>,
        duration: Duration,
    ) {
        let (Some(position), Some(look_at)) = (position, look_at) else {
            return;
        };
        if self.destroyed {
            return;
        }
        self.tween = Some(CameraTween::new(
            self.clock.now_ms(),
            duration.as_secs_f64() * 1000.0,
            (self.camera.position(), self.orbit.target),
            (position, look_at),
            self.easing,
        ));
        self.needs_update = true;
    }

    // ── Frame update ─────────────────────────────────────────────────────

    /// Advance any tween and write the derived pose to the camera. Call
    /// once per rendered frame. Returns `true` if the camera was written;
    /// with no input and no tween it does nothing.
    pub fn update(&mut self) -> bool {
        if !self.enabled() {
            return false;
        }

        if let Some(tween) = &self.tween {
            let sample = tween.sample(self.clock.now_ms());
            self.orbit.target = sample.target;
            let _ = self.orbit.set_from_position(sample.position, &self.limits);
            if sample.finished {
                self.tween = None;
            }
            self.needs_update = true;
        }

        if !self.needs_update {
            return false;
        }
        self.apply_camera_transform();
        self.needs_update = false;
        true
    }

    fn apply_camera_transform(&mut self) {
        self.orbit.pitch = self.limits.clamp_pitch(self.orbit.pitch);
        let eye = self.orbit.eye();
        self.camera.set_position(eye);
        self.camera.look_at(self.orbit.target);
    }
}
