use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::error::{Result, TerrainError};
use crate::pipeline::TerrainParams;
use crate::viewer::FogConfig;

// Viewer settings, read from TOML. Every section and field is optional.
//
// ```toml
// [terrain]
// grid_size = 100
// fault_count = 200
// weathering_iterations = 8
// seed = 2025
//
// [camera]
// position = [1.0, 1.0, 0.5]
// move_step = 0.02
//
// [fog]
// enabled = false
// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub terrain: TerrainParams,
    pub camera: CameraConfig,
    pub fog: FogConfig,
}

impl ViewerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TerrainError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
