use std::{cell::RefCell, rc::Rc};

use glam::{Mat4, Vec3};

/// Host camera seam. The orbit controller reads and writes the camera only
/// through this trait and never owns the camera's lifetime.
pub trait CameraHandle {
    /// World-space eye position.
    fn position(&self) -> Vec3;
    /// Move the eye to `position` without changing where it looks.
    fn set_position(&mut self, position: Vec3);
    /// Orient the camera toward `target`.
    fn look_at(&mut self, target: Vec3);
    /// Camera right axis in world space (unit length).
    fn right(&self) -> Vec3;
    /// Camera up axis in world space (unit length).
    fn up(&self) -> Vec3;
}

/// Perspective camera defined by eye position, look-at point, and
/// projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCamera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// World up direction used to build the view basis.
    pub world_up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl SceneCamera {
    /// Camera at `eye` looking at `target` with the splat viewer's default
    /// projection (55° fov, 0.02 near, 250 far).
    #[must_use]
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            world_up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 55.0,
            znear: 0.02,
            zfar: 250.0,
        }
    }

    /// Override projection parameters.
    #[must_use]
    pub fn with_projection(mut self, fovy: f32, znear: f32, zfar: f32) -> Self {
        self.fovy = fovy;
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    /// Update the aspect ratio after a viewport resize. Zero-sized
    /// viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Unit vector from eye toward target (zero when they coincide).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// View matrix (right-handed).
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up())
    }

    /// Projection matrix with [0,1] depth range.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO)
    }
}

impl CameraHandle for SceneCamera {
    fn position(&self) -> Vec3 {
        self.eye
    }

    fn set_position(&mut self, position: Vec3) {
        self.eye = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    fn right(&self) -> Vec3 {
        // Looking straight along world up leaves the basis undefined; fall
        // back to +X so pan still moves somewhere sensible.
        self.forward().cross(self.world_up).normalize_or(Vec3::X)
    }

    fn up(&self) -> Vec3 {
        let forward = self.forward();
        if forward == Vec3::ZERO {
            return self.world_up;
        }
        self.right().cross(forward).normalize_or(self.world_up)
    }
}

impl<T: CameraHandle + ?Sized> CameraHandle for Rc<RefCell<T>> {
    fn position(&self) -> Vec3 {
        self.borrow().position()
    }

    fn set_position(&mut self, position: Vec3) {
        self.borrow_mut().set_position(position);
    }

    fn look_at(&mut self, target: Vec3) {
        self.borrow_mut().look_at(target);
    }

    fn right(&self) -> Vec3 {
        self.borrow().right()
    }

    fn up(&self) -> Vec3 {
        self.borrow().up()
    }
}

impl<T: CameraHandle + ?Sized> CameraHandle for &mut T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position);
    }

    fn look_at(&mut self, target: Vec3) {
        (**self).look_at(target);
    }

    fn right(&self) -> Vec3 {
        (**self).right()
    }

    fn up(&self) -> Vec3 {
        (**self).up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn axes_for_camera_looking_down_negative_z() {
        let cam = SceneCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(approx(cam.forward(), Vec3::NEG_Z));
        assert!(approx(cam.right(), Vec3::X));
        assert!(approx(cam.up(), Vec3::Y));
    }

    #[test]
    fn axes_are_orthonormal_for_oblique_view() {
        let cam = SceneCamera::new(Vec3::new(2.8, 1.7, 4.2), Vec3::new(0.0, 1.1, 0.0));
        let (r, u, f) = (cam.right(), cam.up(), cam.forward());
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!(r.dot(f).abs() < 1e-5);
        assert!(u.y > 0.0);
    }

    #[test]
    fn degenerate_basis_falls_back() {
        let cam = SceneCamera::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(cam.right(), Vec3::X);
        assert_eq!(cam.up(), Vec3::Y);

        let top_down = SceneCamera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        assert_eq!(top_down.right(), Vec3::X);
    }

    #[test]
    fn shared_handle_forwards_to_inner_camera() {
        let shared = Rc::new(RefCell::new(SceneCamera::default()));
        let mut handle = Rc::clone(&shared);
        handle.set_position(Vec3::new(1.0, 2.0, 3.0));
        handle.look_at(Vec3::ONE);
        assert_eq!(shared.borrow().eye, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(shared.borrow().target, Vec3::ONE);
    }

    #[test]
    fn resize_ignores_zero_viewport() {
        let mut cam = SceneCamera::default();
        cam.resize(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.resize(0, 400);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn view_projection_maps_target_to_screen_center() {
        let cam = SceneCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let clip = cam.build_matrix() * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }
}
