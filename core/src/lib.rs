// core holds the terrain synthesis pipeline and the camera navigation model
pub mod camera;
pub mod config;
pub mod error;
pub mod fault2;
pub mod grid;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod utils;
pub mod viewer;
pub mod weathering2;

pub use camera::{Camera, CameraConfig, NavAction, NavInput};
pub use config::ViewerConfig;
pub use error::{Result, TerrainError};
pub use fault2::{Fault, FaultFormation2D};
pub use grid::HeightGrid;
pub use mesh::{Mesh, Vertex};
pub use pipeline::{
    Terrain, TerrainParams, build_terrain, build_terrain_seeded, regenerate, regenerate_seeded,
    synthesize_heights,
};
pub use utils::normalize_symmetric;
pub use viewer::{FogConfig, FogState, ViewerContext};
pub use weathering2::Weathering2D;
