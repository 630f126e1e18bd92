use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::SceneCamera;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
/// Splat viewer widget settings.
pub struct ViewerOptions {
    /// URL of the gaussian-splat asset.
    #[schemars(skip)]
    pub splat_url: String,
    /// Camera position before the first update.
    #[schemars(skip)]
    pub camera_position: [f32; 3],
    /// Orbit pivot for the viewer camera.
    #[schemars(skip)]
    pub camera_target: [f32; 3],
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Intersection ratio at which the viewer starts.
    #[schemars(title = "Visibility Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub visibility_threshold: f32,
    /// How long to wait for the splat asset before reporting it missing.
    #[schemars(skip)]
    pub asset_timeout_ms: u32,
    /// Whether annotation markers are shown.
    #[schemars(title = "Show Annotations")]
    pub annotations_visible: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            splat_url: "/assets/splats/scene.ply".to_owned(),
            camera_position: [2.8, 1.7, 4.2],
            camera_target: [0.0, 1.1, 0.0],
            fovy: 55.0,
            znear: 0.02,
            zfar: 250.0,
            visibility_threshold: 0.2,
            asset_timeout_ms: 2500,
            annotations_visible: true,
        }
    }
}

impl ViewerOptions {
    /// Scene camera placed at the configured start pose.
    #[must_use]
    pub fn scene_camera(&self) -> SceneCamera {
        SceneCamera::new(
            Vec3::from(self.camera_position),
            Vec3::from(self.camera_target),
        )
        .with_projection(self.fovy, self.znear, self.zfar)
    }
}
