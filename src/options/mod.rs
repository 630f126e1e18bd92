//! Widget options with TOML preset support.
//!
//! Camera controls, viewer behaviour and the annotation catalogue live in
//! one [`Options`] tree. Options serialize to/from TOML so a page can ship
//! a preset next to its splat asset.

mod camera;
mod viewer;

use std::path::Path;

pub use camera::CameraOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewer::ViewerOptions;

use crate::{annotation::AnnotationSet, error::SplatViewError};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Orbit control parameters.
    pub camera: CameraOptions,
    /// Viewer widget settings.
    pub viewer: ViewerOptions,
    /// Annotation catalogue.
    #[schemars(skip)]
    pub annotations: AnnotationSet,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, SplatViewError> {
        toml::from_str(content)
            .map_err(|e| SplatViewError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SplatViewError> {
        let content =
            std::fs::read_to_string(path).map_err(SplatViewError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SplatViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SplatViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SplatViewError::Io)?;
        }
        std::fs::write(path, content).map_err(SplatViewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
rotate_speed = 0.5
fly_to_easing = 'linear'
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.rotate_speed, 0.5);
        assert_eq!(opts.camera.fly_to_easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.camera.zoom_speed, 0.12);
        assert_eq!(opts.camera.fly_to_duration_ms, 900);
        assert_eq!(opts.viewer.asset_timeout_ms, 2500);
        assert_eq!(opts.annotations.len(), 3);
    }

    #[test]
    fn annotations_replace_defaults() {
        let toml_str = r#"
[[annotations]]
id = "lobby"
position = [0.0, 1.0, 0.0]
title = "Lobby"
html = "<p>Front desk</p>"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.annotations.len(), 1);
        let lobby = opts.annotations.get("lobby").unwrap();
        assert_eq!(lobby.camera_position, None);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[camera\nzoom_speed = ").unwrap_err();
        assert!(matches!(err, SplatViewError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("splatview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.camera.max_distance = 30.0;
        opts.save(&dir.join("wide.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("wide.toml")).unwrap();
        assert_eq!(loaded.camera.max_distance, 30.0);
        assert_eq!(Options::list_presets(&dir), vec!["wide".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Options::load(Path::new("/nonexistent/splatview.toml"))
            .unwrap_err();
        assert!(matches!(err, SplatViewError::Io(_)));
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let mut camera = CameraOptions::default();
        camera.min_pitch = 60.0;
        camera.max_pitch = -60.0;
        let limits = camera.limits();
        assert_eq!(limits.min_pitch(), -60.0);
        assert_eq!(limits.clamp_pitch(90.0), 60.0);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("viewer"));
        assert!(!props.contains_key("annotations"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("rotate_speed").is_some());
        assert!(camera.get("fly_to_duration_ms").is_some());
        assert!(camera.get("target").is_none());
        assert!(camera.get("fly_to_easing").is_none());

        let viewer = &props["viewer"]["properties"];
        assert!(viewer.get("visibility_threshold").is_some());
        assert!(viewer.get("splat_url").is_none());
    }
}
