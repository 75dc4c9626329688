use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fault2::FaultFormation2D;
use crate::grid::HeightGrid;
use crate::mesh::Mesh;
use crate::utils::normalize_symmetric;
use crate::weathering2::Weathering2D;

// Inputs of one terrain regeneration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TerrainParams {
    pub grid_size: usize,
    pub fault_count: usize,
    pub weathering_iterations: usize,
    // Fixed seed for reproducible terrain; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            grid_size: 64,
            fault_count: 50,
            weathering_iterations: 5,
            seed: None,
        }
    }
}

// Grid → faults → normalize → weathering, returning final heights.
pub fn synthesize_heights<R: Rng>(params: &TerrainParams, rng: &mut R) -> Result<HeightGrid> {
    let mut grid = HeightGrid::new(params.grid_size).inspect_err(|err| {
        tracing::warn!(%err, "terrain regeneration rejected");
    })?;
    FaultFormation2D::new(params.fault_count).apply(&mut grid, rng);
    normalize_symmetric(&mut grid);
    Weathering2D::new(params.weathering_iterations).apply(&mut grid);
    Ok(grid)
}

// Output of one regeneration: the final heights and the mesh built on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub heights: HeightGrid,
    pub mesh: Mesh,
}

// Full regeneration: final heights, then triangles and normals.
pub fn build_terrain<R: Rng>(params: &TerrainParams, rng: &mut R) -> Result<Terrain> {
    let span = tracing::debug_span!(
        "regenerate",
        size = params.grid_size,
        faults = params.fault_count,
        weathering = params.weathering_iterations,
    );
    let _enter = span.enter();

    let heights = synthesize_heights(params, rng)?;
    let mesh = Mesh::from_grid(&heights);
    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangles.len(),
        "terrain mesh built"
    );
    Ok(Terrain { heights, mesh })
}

// `build_terrain` with the generator picked from `params.seed`.
pub fn build_terrain_seeded(params: &TerrainParams) -> Result<Terrain> {
    match params.seed {
        Some(seed) => build_terrain(params, &mut StdRng::seed_from_u64(seed)),
        None => build_terrain(params, &mut rand::rng()),
    }
}

pub fn regenerate<R: Rng>(params: &TerrainParams, rng: &mut R) -> Result<Mesh> {
    build_terrain(params, rng).map(|terrain| terrain.mesh)
}

pub fn regenerate_seeded(params: &TerrainParams) -> Result<Mesh> {
    build_terrain_seeded(params).map(|terrain| terrain.mesh)
}
