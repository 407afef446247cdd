//! Controller configuration
//!
//! [`Config`] is plain data and can be persisted as RON. The camera-controls
//! handle is not data; it travels in [`ConfigUpdate`] or is installed with
//! `MultiSelect::set_camera_controls`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bindings::Bindings;
use crate::gizmo::SharedCameraControls;

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mouse and touch bindings
    pub bindings: Bindings,
    /// Also hit-test descendants of selectable objects
    pub recursive: bool,
    /// Drive a transform gizmo attached to the selection pivot
    pub use_transform_controls: bool,
    /// Clear the selection when a gesture hits nothing
    pub deselect_on_raycast_miss: bool,
    /// Refresh local matrices after every gizmo change
    pub update_local_matrices: bool,
    /// Refresh world matrices after every gizmo change
    pub update_world_matrices: bool,
    /// Orbit objects around the pivot instead of spinning each in place
    pub rotate_as_group: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bindings: Bindings::default(),
            recursive: false,
            use_transform_controls: true,
            deselect_on_raycast_miss: false,
            update_local_matrices: false,
            update_world_matrices: false,
            rotate_as_group: false,
        }
    }
}

impl Config {
    /// Merge a partial update; fields left as None keep their value
    pub fn merge(&mut self, update: &ConfigUpdate) {
        let ConfigUpdate {
            bindings,
            recursive,
            use_transform_controls,
            deselect_on_raycast_miss,
            update_local_matrices,
            update_world_matrices,
            rotate_as_group,
            camera_controls: _,
        } = update;

        if let Some(v) = bindings {
            self.bindings = *v;
        }
        if let Some(v) = recursive {
            self.recursive = *v;
        }
        if let Some(v) = use_transform_controls {
            self.use_transform_controls = *v;
        }
        if let Some(v) = deselect_on_raycast_miss {
            self.deselect_on_raycast_miss = *v;
        }
        if let Some(v) = update_local_matrices {
            self.update_local_matrices = *v;
        }
        if let Some(v) = update_world_matrices {
            self.update_world_matrices = *v;
        }
        if let Some(v) = rotate_as_group {
            self.rotate_as_group = *v;
        }
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a RON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content = self.to_ron_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Partial configuration; `None` means "leave unchanged"
#[derive(Clone, Default)]
pub struct ConfigUpdate {
    pub bindings: Option<Bindings>,
    pub recursive: Option<bool>,
    pub use_transform_controls: Option<bool>,
    pub deselect_on_raycast_miss: Option<bool>,
    pub update_local_matrices: Option<bool>,
    pub update_world_matrices: Option<bool>,
    pub rotate_as_group: Option<bool>,
    /// `Some(None)` removes the installed handle
    pub camera_controls: Option<Option<SharedCameraControls>>,
}
