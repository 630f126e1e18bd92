//! Scene annotations: the catalogue, their clickable markers, and the info
//! overlay they open.
//!
//! Clicking a marker opens its annotation in the [`InfoPanel`] and, when the
//! annotation carries a camera position, yields a [`FlyTo`] for the orbit
//! controller.

mod panel;

use glam::Vec3;
pub use panel::InfoPanel;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraHandle, OrbitController};
use crate::util::clock::Clock;

/// Uniform scale of every marker sphere.
pub const MARKER_SCALE: f32 = 0.14;

/// Title shown when an annotation has none.
pub const FALLBACK_TITLE: &str = "Annotation";

/// A point of interest in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique id, used in the marker name.
    pub id: String,
    /// World-space marker position. Also the fly-to look-at point.
    #[serde(default)]
    pub position: [f32; 3],
    /// Panel heading.
    #[serde(default)]
    pub title: String,
    /// Panel body, as trusted HTML.
    #[serde(default)]
    pub html: String,
    /// Where the camera flies when the marker is clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_position: Option<[f32; 3]>,
}

impl Annotation {
    /// Annotation with no camera position.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        position: Vec3,
        title: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position: position.to_array(),
            title: title.into(),
            html: html.into(),
            camera_position: None,
        }
    }

    /// Set the fly-to camera position.
    #[must_use]
    pub fn with_camera_position(mut self, camera_position: Vec3) -> Self {
        self.camera_position = Some(camera_position.to_array());
        self
    }

    /// Marker position as a vector.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Heading to display, falling back to [`FALLBACK_TITLE`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            FALLBACK_TITLE
        } else {
            &self.title
        }
    }

    /// Camera move for this annotation, if it has a camera position.
    #[must_use]
    pub fn fly_to(&self) -> Option<FlyTo> {
        self.camera_position.map(|camera| FlyTo {
            position: Vec3::from(camera),
            look_at: self.world_position(),
        })
    }

    /// Scene marker for this annotation.
    #[must_use]
    pub fn marker(&self) -> Marker {
        Marker {
            name: format!("annotation-{}", self.id),
            annotation_id: self.id.clone(),
            position: self.world_position(),
            scale: MARKER_SCALE,
            enabled: true,
        }
    }
}

/// Requested camera move produced by activating an annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    /// Destination eye position.
    pub position: Vec3,
    /// Destination look-at point.
    pub look_at: Vec3,
}

impl FlyTo {
    /// Start the move on `controller` with its configured fly-to duration.
    pub fn apply<C: CameraHandle, K: Clock>(
        self,
        controller: &mut OrbitController<C, K>,
    ) {
        controller.move_to(Some(self.position), Some(self.look_at));
    }
}

/// Clickable sphere placed at an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Scene entity name, `annotation-<id>`.
    pub name: String,
    /// Id of the annotation this marker opens.
    pub annotation_id: String,
    /// World-space position.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Whether the marker is shown and clickable.
    pub enabled: bool,
}

/// Apply one visibility flag to every marker.
pub fn set_markers_visible(markers: &mut [Marker], visible: bool) {
    for marker in markers {
        marker.enabled = visible;
    }
}

/// Ordered annotation catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Annotation>", into = "Vec<Annotation>")]
pub struct AnnotationSet {
    annotations: Vec<Annotation>,
}

impl Default for AnnotationSet {
    fn default() -> Self {
        Self::new(vec![
            Annotation::new(
                "a1",
                Vec3::new(0.0, 1.2, 0.0),
                "Main Entry",
                "<p>Primary access point for this scene. Add context, \
                 materials, or history here.</p>",
            )
            .with_camera_position(Vec3::new(3.2, 2.1, 4.6)),
            Annotation::new(
                "a2",
                Vec3::new(-1.4, 0.9, 1.6),
                "Detail View",
                "<p>Call out a detail or feature. Use <strong>rich \
                 HTML</strong> when needed.</p>",
            )
            .with_camera_position(Vec3::new(1.8, 1.6, 3.0)),
            Annotation::new(
                "a3",
                Vec3::new(1.6, 0.7, -1.2),
                "Structure",
                "<p>Explain structural elements or highlight a design \
                 decision.</p>",
            )
            .with_camera_position(Vec3::new(3.8, 1.8, -2.4)),
        ])
    }
}

impl From<Vec<Annotation>> for AnnotationSet {
    fn from(annotations: Vec<Annotation>) -> Self {
        Self::new(annotations)
    }
}

impl From<AnnotationSet> for Vec<Annotation> {
    fn from(set: AnnotationSet) -> Self {
        set.annotations
    }
}

impl AnnotationSet {
    /// Catalogue from an explicit list. Later duplicates of an id are
    /// dropped.
    #[must_use]
    pub fn new(annotations: Vec<Annotation>) -> Self {
        let mut unique: Vec<Annotation> = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            if unique.iter().any(|a| a.id == annotation.id) {
                log::warn!("duplicate annotation id '{}' ignored", annotation.id);
                continue;
            }
            unique.push(annotation);
        }
        Self {
            annotations: unique,
        }
    }

    /// Number of annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// First annotation, the panel's default.
    #[must_use]
    pub fn first(&self) -> Option<&Annotation> {
        self.annotations.first()
    }

    /// Look up an annotation by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Iterate in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// One marker per annotation, all visible.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.annotations.iter().map(Annotation::marker).collect()
    }

    /// Marker click: open `id` in `panel` and return the camera move, if
    /// any. Unknown ids do nothing.
    pub fn activate(&self, id: &str, panel: &mut InfoPanel) -> Option<FlyTo> {
        let Some(annotation) = self.get(id) else {
            log::debug!("activate: unknown annotation '{id}'");
            return None;
        };
        panel.open(annotation);
        annotation.fly_to()
    }
}
