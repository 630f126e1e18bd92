//! Splat viewer widget state.
//!
//! The viewer starts lazily the first time its panel scrolls into view,
//! attaches orbit controls to the host's input surface and frame source,
//! tracks whether the splat asset arrived, and tears everything down when
//! the page hides.
//!
//! ```
//! # use splatview::{input::{EventBus, FrameSignal}, SplatViewer};
//! let mut viewer =
//!     SplatViewer::builder().build(EventBus::new(), FrameSignal::new());
//! assert!(!viewer.on_visibility(0.1));
//! assert!(viewer.on_visibility(0.5));
//! assert!(viewer.status_message().is_none());
//! ```

use std::{cell::RefCell, rc::Rc};

use crate::{
    annotation::{set_markers_visible, InfoPanel, Marker},
    binding::{ControlsBinding, SharedController},
    camera::{OrbitController, SceneCamera},
    input::{EventBus, FrameSignal, FrameSource, InputSurface},
    options::Options,
    util::clock::{Clock, SystemClock},
};

/// Loading state of the splat asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetStatus {
    /// Viewer not initialized.
    Idle,
    /// Waiting for the asset since the given clock time (ms).
    Pending {
        /// Clock time at which loading started.
        since_ms: f64,
    },
    /// Asset loaded.
    Loaded,
    /// Asset failed or timed out.
    Missing,
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`SplatViewer`].
pub struct SplatViewerBuilder<K: Clock = SystemClock> {
    options: Options,
    clock: K,
}

impl SplatViewerBuilder<SystemClock> {
    fn new() -> Self {
        Self {
            options: Options::default(),
            clock: SystemClock::new(),
        }
    }
}

impl<K: Clock + Clone + 'static> SplatViewerBuilder<K> {
    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Use an explicit time source for tweens and the asset timeout.
    #[must_use]
    pub fn with_clock<K2: Clock + Clone + 'static>(
        self,
        clock: K2,
    ) -> SplatViewerBuilder<K2> {
        SplatViewerBuilder {
            options: self.options,
            clock,
        }
    }

    /// Consume the builder. Controls attach to `surface` and `frames` when
    /// the viewer initializes.
    #[must_use]
    pub fn build<S, F>(self, surface: S, frames: F) -> SplatViewer<S, F, K>
    where
        S: InputSurface + Clone,
        F: FrameSource + Clone,
    {
        SplatViewer {
            options: self.options,
            clock: self.clock,
            surface,
            frames,
            initialized: false,
            status: AssetStatus::Idle,
            markers: Vec::new(),
            panel: InfoPanel::default(),
            controller: None,
            binding: None,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// Lazily initialized splat viewer.
pub struct SplatViewer<
    S: InputSurface + Clone = EventBus,
    F: FrameSource + Clone = FrameSignal,
    K: Clock + Clone + 'static = SystemClock,
> {
    options: Options,
    clock: K,
    surface: S,
    frames: F,

    initialized: bool,
    status: AssetStatus,
    markers: Vec<Marker>,
    panel: InfoPanel,
    controller: Option<SharedController<SceneCamera, K>>,
    binding: Option<ControlsBinding<S, F>>,
}

impl SplatViewer {
    /// Start building a viewer.
    #[must_use]
    pub fn builder() -> SplatViewerBuilder {
        SplatViewerBuilder::new()
    }
}

impl<S, F, K> SplatViewer<S, F, K>
where
    S: InputSurface + Clone,
    F: FrameSource + Clone,
    K: Clock + Clone + 'static,
{
    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether [`initialize`](Self::initialize) has run since the last
    /// teardown.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Visibility observer callback. Initializes on the first ratio at or
    /// above the configured threshold; returns `true` on that call only.
    pub fn on_visibility(&mut self, intersection_ratio: f32) -> bool {
        if self.initialized
            || intersection_ratio < self.options.viewer.visibility_threshold
        {
            return false;
        }
        self.initialize();
        true
    }

    /// Start the viewer: create the controller, attach controls, begin
    /// waiting for the asset and place the markers. Hosts without a
    /// visibility observer call this directly. Idempotent.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let viewer = &self.options.viewer;
        let mut camera_options = self.options.camera.clone();
        camera_options.target = viewer.camera_target;
        let controller = Rc::new(RefCell::new(OrbitController::with_clock(
            viewer.scene_camera(),
            &camera_options,
            self.clock.clone(),
        )));

        let mut binding = ControlsBinding::new(&controller);
        binding.attach(self.surface.clone());
        binding.attach_frames(self.frames.clone());
        let _ = controller.borrow_mut().update();

        self.status = AssetStatus::Pending {
            since_ms: self.clock.now_ms(),
        };
        self.markers = self.options.annotations.markers();
        set_markers_visible(
            &mut self.markers,
            self.options.viewer.annotations_visible,
        );
        self.controller = Some(controller);
        self.binding = Some(binding);

        log::info!(
            "splat viewer initialized ({}, {} annotations)",
            self.options.viewer.splat_url,
            self.markers.len()
        );
    }

    // ── Asset status ─────────────────────────────────────────────────────

    /// Current asset status, without checking the timeout.
    #[must_use]
    pub fn status(&self) -> AssetStatus {
        self.status
    }

    /// The asset finished loading.
    pub fn asset_loaded(&mut self) {
        if self.initialized {
            self.status = AssetStatus::Loaded;
        }
    }

    /// The asset failed to load or does not exist.
    pub fn asset_failed(&mut self) {
        if self.initialized && self.status != AssetStatus::Loaded {
            log::warn!(
                "splat asset failed: {}",
                self.options.viewer.splat_url
            );
            self.status = AssetStatus::Missing;
        }
    }

    /// Move a pending asset to [`AssetStatus::Missing`] once the timeout
    /// has elapsed, and return the status.
    pub fn poll_status(&mut self) -> AssetStatus {
        if let AssetStatus::Pending { since_ms } = self.status {
            let timeout = f64::from(self.options.viewer.asset_timeout_ms);
            if self.clock.now_ms() - since_ms >= timeout {
                log::warn!(
                    "splat asset timed out after {timeout} ms: {}",
                    self.options.viewer.splat_url
                );
                self.status = AssetStatus::Missing;
            }
        }
        self.status
    }

    /// Text for the status line, or `None` when it should be hidden.
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        match self.status {
            AssetStatus::Missing => Some(format!(
                "Missing splat file: {}",
                self.options.viewer.splat_url
            )),
            AssetStatus::Idle
            | AssetStatus::Pending { .. }
            | AssetStatus::Loaded => None,
        }
    }

    // ── Annotations ──────────────────────────────────────────────────────

    /// Scene markers, empty before initialization.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Annotation toggle checkbox.
    pub fn set_annotations_visible(&mut self, visible: bool) {
        self.options.viewer.annotations_visible = visible;
        set_markers_visible(&mut self.markers, visible);
    }

    /// Info overlay state.
    #[must_use]
    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    /// Marker click: open the annotation and fly the camera to it. Hidden
    /// markers are not clickable.
    pub fn click_marker(&mut self, annotation_id: &str) {
        let clickable = self
            .markers
            .iter()
            .any(|m| m.annotation_id == annotation_id && m.enabled);
        if !clickable {
            return;
        }
        let fly = self
            .options
            .annotations
            .activate(annotation_id, &mut self.panel);
        if let (Some(fly), Some(controller)) = (fly, &self.controller) {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                fly.apply(&mut *controller);
            }
        }
    }

    /// Info toggle button.
    pub fn toggle_info(&mut self) {
        self.panel.toggle(&self.options.annotations);
    }

    /// Info close button or backdrop click.
    pub fn close_info(&mut self) {
        self.panel.close();
    }

    /// Document keydown. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.panel.handle_key(key)
    }

    // ── Camera ───────────────────────────────────────────────────────────

    /// Shared orbit controller, once initialized.
    #[must_use]
    pub fn controller(&self) -> Option<&SharedController<SceneCamera, K>> {
        self.controller.as_ref()
    }

    // ── Teardown ─────────────────────────────────────────────────────────

    /// Page hide: destroy the controls, drop the markers and return to the
    /// uninitialized state. The info panel keeps its last annotation.
    pub fn teardown(&mut self) {
        if let Some(mut binding) = self.binding.take() {
            binding.destroy();
        }
        self.controller = None;
        self.markers.clear();
        self.status = AssetStatus::Idle;
        if self.initialized {
            log::info!("splat viewer torn down");
        }
        self.initialized = false;
    }
}

impl<S, F, K> Drop for SplatViewer<S, F, K>
where
    S: InputSurface + Clone,
    F: FrameSource + Clone,
    K: Clock + Clone + 'static,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        input::{InputEvent, MouseButton},
        util::clock::ManualClock,
    };

    type TestViewer = SplatViewer<EventBus, FrameSignal, ManualClock>;

    fn viewer() -> (TestViewer, EventBus, FrameSignal, ManualClock) {
        let bus = EventBus::new();
        let frames = FrameSignal::new();
        let clock = ManualClock::starting_at(1000.0);
        let viewer = SplatViewer::builder()
            .with_clock(clock.clone())
            .build(bus.clone(), frames.clone());
        (viewer, bus, frames, clock)
    }

    #[test]
    fn initializes_once_above_threshold() {
        let (mut viewer, bus, frames, _) = viewer();
        assert!(!viewer.on_visibility(0.19));
        assert!(!viewer.is_initialized());
        assert_eq!(viewer.status(), AssetStatus::Idle);
        assert_eq!(bus.listener_count(), 0);

        assert!(viewer.on_visibility(0.2));
        assert!(!viewer.on_visibility(1.0));
        viewer.initialize();
        assert!(viewer.is_initialized());
        assert_eq!(bus.listener_count(), 6);
        assert_eq!(frames.callback_count(), 1);
        assert_eq!(viewer.markers().len(), 3);
    }

    #[test]
    fn camera_starts_at_default_pose() {
        let (mut viewer, _, _, _) = viewer();
        viewer.initialize();
        let controller = viewer.controller().unwrap().borrow();
        let eye = controller.camera().eye;
        assert!((eye - Vec3::new(2.8, 1.7, 4.2)).length() < 1e-3);
        assert_eq!(controller.target(), Vec3::new(0.0, 1.1, 0.0));
        assert_eq!(controller.camera().fovy, 55.0);
    }

    #[test]
    fn asset_times_out_after_2500_ms() {
        let (mut viewer, _, _, clock) = viewer();
        viewer.initialize();
        clock.advance(2499.0);
        assert!(matches!(viewer.poll_status(), AssetStatus::Pending { .. }));
        assert_eq!(viewer.status_message(), None);
        clock.advance(1.0);
        assert_eq!(viewer.poll_status(), AssetStatus::Missing);
        assert_eq!(
            viewer.status_message().as_deref(),
            Some("Missing splat file: /assets/splats/scene.ply")
        );
    }

    #[test]
    fn loaded_asset_clears_status() {
        let (mut viewer, _, _, clock) = viewer();
        viewer.asset_loaded();
        assert_eq!(viewer.status(), AssetStatus::Idle);

        viewer.initialize();
        viewer.asset_loaded();
        clock.advance(5000.0);
        assert_eq!(viewer.poll_status(), AssetStatus::Loaded);
        viewer.asset_failed();
        assert_eq!(viewer.status_message(), None);
    }

    #[test]
    fn failed_asset_reports_missing() {
        let (mut viewer, _, _, _) = viewer();
        viewer.initialize();
        viewer.asset_failed();
        assert!(viewer.status_message().is_some());
        // A late load still wins.
        viewer.asset_loaded();
        assert_eq!(viewer.status_message(), None);
    }

    #[test]
    fn marker_click_flies_to_annotation() {
        let (mut viewer, _, frames, clock) = viewer();
        viewer.initialize();
        viewer.click_marker("a2");
        assert!(viewer.panel().is_open());
        assert_eq!(viewer.panel().title(), "Detail View");

        clock.advance(900.0);
        frames.tick();
        let controller = viewer.controller().unwrap().borrow();
        let eye = controller.camera().eye;
        assert!((eye - Vec3::new(1.8, 1.6, 3.0)).length() < 1e-3);
        assert!(!controller.is_tweening());
    }

    #[test]
    fn hidden_markers_are_not_clickable() {
        let (mut viewer, _, _, _) = viewer();
        viewer.initialize();
        viewer.set_annotations_visible(false);
        assert!(viewer.markers().iter().all(|m| !m.enabled));
        viewer.click_marker("a1");
        assert!(!viewer.panel().is_open());
    }

    #[test]
    fn info_panel_controls() {
        let (mut viewer, _, _, _) = viewer();
        viewer.toggle_info();
        assert_eq!(viewer.panel().active(), Some("a1"));
        assert!(viewer.handle_key("Escape"));
        assert!(!viewer.panel().is_open());
        viewer.toggle_info();
        viewer.close_info();
        assert!(!viewer.panel().is_open());
    }

    #[test]
    fn teardown_releases_everything() {
        let (mut viewer, bus, frames, _) = viewer();
        viewer.initialize();
        let controller = Rc::clone(viewer.controller().unwrap());
        viewer.teardown();

        assert!(!viewer.is_initialized());
        assert!(viewer.markers().is_empty());
        assert!(viewer.controller().is_none());
        assert_eq!(bus.listener_count(), 0);
        assert_eq!(frames.callback_count(), 0);
        assert!(controller.borrow().is_destroyed());

        let _ = bus.dispatch(&InputEvent::PointerDown {
            x: 0.0,
            y: 0.0,
            button: MouseButton::Primary,
            shift: false,
        });
        assert_eq!(controller.borrow().drag_mode(), None);

        // Visible again after teardown starts a fresh viewer.
        assert!(viewer.on_visibility(0.5));
        viewer.teardown();
        viewer.teardown();
    }

    #[test]
    fn drop_tears_down() {
        let (mut viewer, bus, _, _) = viewer();
        viewer.initialize();
        drop(viewer);
        assert_eq!(bus.listener_count(), 0);
    }
}
