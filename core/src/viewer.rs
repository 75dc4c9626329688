use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, NavAction, NavInput};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::pipeline::{TerrainParams, regenerate, regenerate_seeded};

const FOG_THINNER: f32 = 0.8;
const FOG_THICKER: f32 = 1.25;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    pub intensity: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 1.0,
        }
    }
}

// Fog switches passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogState {
    pub enabled: bool,
    pub intensity: f32,
}

impl Default for FogState {
    fn default() -> Self {
        Self::from(&FogConfig::default())
    }
}

impl From<&FogConfig> for FogState {
    fn from(cfg: &FogConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            intensity: cfg.intensity,
        }
    }
}

impl FogState {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn thinner(&mut self) {
        self.intensity *= FOG_THINNER;
    }

    pub fn thicker(&mut self) {
        self.intensity *= FOG_THICKER;
    }

    // Density handed to the renderer; 0 while fog is off.
    pub fn effective(&self) -> f32 {
        if self.enabled { self.intensity } else { 0.0 }
    }
}

// Everything the viewer loop owns: the current terrain, the camera,
// the held navigation keys and the fog switches.
#[derive(Debug, Clone, Default)]
pub struct ViewerContext {
    pub terrain: Option<Mesh>,
    pub camera: Camera,
    pub input: NavInput,
    pub fog: FogState,
}

impl ViewerContext {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            terrain: None,
            camera: Camera::from_config(&config.camera),
            input: NavInput::default(),
            fog: FogState::from(&config.fog),
        }
    }

    // Replace the terrain. On error the previous mesh is kept.
    pub fn regenerate<R: Rng>(&mut self, params: &TerrainParams, rng: &mut R) -> Result<&Mesh> {
        let mesh = regenerate(params, rng)?;
        Ok(&*self.terrain.insert(mesh))
    }

    pub fn regenerate_seeded(&mut self, params: &TerrainParams) -> Result<&Mesh> {
        let mesh = regenerate_seeded(params)?;
        Ok(&*self.terrain.insert(mesh))
    }

    // Install a mesh built elsewhere (e.g. on a worker thread).
    pub fn replace_terrain(&mut self, mesh: Mesh) {
        self.terrain = Some(mesh);
    }

    pub fn set_held(&mut self, action: NavAction, held: bool) {
        self.input.set(action, held);
    }

    // Advance one frame with the currently held keys.
    pub fn tick(&mut self) -> (Vec3, Vec3) {
        self.camera.update(&self.input)
    }
}
