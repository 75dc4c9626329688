use std::path::PathBuf;

use thiserror::Error;

use crate::grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};

pub type Result<T> = std::result::Result<T, TerrainError>;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("grid size {size} is outside the supported range {min}..={max}")]
    InvalidGridSize { size: usize, min: usize, max: usize },

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl TerrainError {
    pub fn invalid_grid_size(size: usize) -> Self {
        Self::InvalidGridSize {
            size,
            min: MIN_GRID_SIZE,
            max: MAX_GRID_SIZE,
        }
    }
}
