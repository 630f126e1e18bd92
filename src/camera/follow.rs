use glam::{Vec2, Vec3};

use super::core::CameraHandle;

/// Camera that drifts toward the pointer and keeps looking at the scene
/// origin (particle-field parallax).
#[derive(Debug, Clone, PartialEq)]
pub struct PointerFollow {
    /// Pointer offset from viewport center, pre-scaled.
    mouse: Vec2,
    half_viewport: Vec2,
    /// Pointer pixels → world units.
    pointer_scale: f32,
    /// Fraction of the remaining gap closed per step.
    chase: f32,
    focus: Vec3,
}

impl PointerFollow {
    /// Follow camera for a `width` × `height` viewport.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            mouse: Vec2::ZERO,
            half_viewport: Vec2::new(width, height) * 0.5,
            pointer_scale: 0.05,
            chase: 0.05,
            focus: Vec3::ZERO,
        }
    }

    /// Change the fraction of the gap closed per [`step`](Self::step),
    /// clamped to [0, 1].
    #[must_use]
    pub fn with_chase(mut self, chase: f32) -> Self {
        self.chase = chase.clamp(0.0, 1.0);
        self
    }

    /// Recompute the viewport center after a resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.half_viewport = Vec2::new(width, height) * 0.5;
    }

    /// Record a pointer position in client pixels.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.mouse = (Vec2::new(x, y) - self.half_viewport) * self.pointer_scale;
    }

    /// World-space point the camera is drifting toward (x/y only; z is
    /// left where the camera is). Screen y grows downward, world y up.
    #[must_use]
    pub fn goal(&self) -> Vec2 {
        Vec2::new(self.mouse.x, -self.mouse.y)
    }

    /// Move `camera` one step toward the goal and aim it at the origin.
    pub fn step(&self, camera: &mut impl CameraHandle) {
        let mut eye = camera.position();
        let goal = self.goal();
        eye.x += (goal.x - eye.x) * self.chase;
        eye.y += (goal.y - eye.y) * self.chase;
        camera.set_position(eye);
        camera.look_at(self.focus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::core::SceneCamera;

    #[test]
    fn centered_pointer_has_zero_goal() {
        let mut follow = PointerFollow::new(800.0, 600.0);
        follow.on_pointer_move(400.0, 300.0);
        assert_eq!(follow.goal(), Vec2::ZERO);
    }

    #[test]
    fn step_closes_five_percent_of_gap() {
        let mut follow = PointerFollow::new(800.0, 600.0);
        // (600-400)*0.05 = 10, (100-300)*0.05 = -10 → world goal (10, 10)
        follow.on_pointer_move(600.0, 100.0);
        let mut cam = SceneCamera::new(Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO);
        follow.step(&mut cam);
        assert!((cam.eye.x - 0.5).abs() < 1e-5);
        assert!((cam.eye.y - 0.5).abs() < 1e-5);
        assert_eq!(cam.eye.z, 500.0);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn repeated_steps_converge_on_goal() {
        let mut follow = PointerFollow::new(200.0, 200.0);
        follow.on_pointer_move(0.0, 200.0);
        let mut cam = SceneCamera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
        for _ in 0..400 {
            follow.step(&mut cam);
        }
        let goal = follow.goal();
        assert!((cam.eye.x - goal.x).abs() < 1e-3);
        assert!((cam.eye.y - goal.y).abs() < 1e-3);
    }

    #[test]
    fn resize_moves_center() {
        let mut follow = PointerFollow::new(100.0, 100.0);
        follow.resize(200.0, 100.0);
        follow.on_pointer_move(100.0, 50.0);
        assert_eq!(follow.goal(), Vec2::ZERO);
    }
}
