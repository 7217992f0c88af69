//! Simulation configuration
//!
//! Loaded from JSON by the host; every field has a default, so a config file
//! only needs the values it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::SpatialGrid;

/// Emitter settings (the host-side spawner)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Emit one row every this many frames
    pub every_n_frames: u64,
    /// Horizontal offsets from the center, in body radii
    pub offsets: Vec<f32>,
    /// Spawn height, in body radii from the top
    pub spawn_height: f32,
    /// Initial velocity of every spawned body
    pub launch_velocity: Vec2,
    /// Fixed color; random per body when absent
    pub color: Option<[f32; 3]>,
    /// Seed for random colors
    pub seed: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            every_n_frames: 3,
            offsets: vec![-55.0, -30.0, -20.0, 0.0, 55.0, 30.0, 20.0],
            spawn_height: 2.0,
            launch_velocity: Vec2::new(3.0, 10.0),
            color: None,
            seed: 12345,
        }
    }
}

/// Everything a simulation run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Bounds width
    pub width: f32,
    /// Bounds height
    pub height: f32,
    /// Typical body radius (used for spawning and grid sizing)
    pub body_radius: f32,
    /// Cells per axis; derived from `body_radius` when absent
    pub grid_dimension: Option<usize>,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Integration sub-steps per frame
    pub substeps: u32,
    /// Fraction of velocity kept on impact (0 = dead stop, 1 = elastic)
    pub bounciness: f32,
    /// Body store capacity
    pub max_bodies: usize,
    pub emitter: EmitterConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            body_radius: DEFAULT_RADIUS,
            grid_dimension: None,
            gravity: GRAVITY,
            substeps: SUBSTEPS,
            bounciness: BOUNCINESS,
            max_bodies: MAX_BODIES,
            emitter: EmitterConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the core cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v > 0.0 && v.is_finite();
        if !positive(self.width) || !positive(self.height) {
            return Err(SimError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if !positive(self.body_radius) {
            return Err(SimError::InvalidRadius(self.body_radius));
        }
        if self.grid_dimension == Some(0) {
            return Err(SimError::InvalidGridDimension);
        }
        if self.substeps == 0 {
            return Err(SimError::InvalidConfig("substeps must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.bounciness) {
            return Err(SimError::InvalidConfig(format!(
                "bounciness must be within [0, 1], got {}",
                self.bounciness
            )));
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig("gravity must be finite".into()));
        }
        if self.max_bodies == 0 {
            return Err(SimError::InvalidConfig("max_bodies must be at least 1".into()));
        }
        if self.emitter.every_n_frames == 0 {
            return Err(SimError::InvalidConfig(
                "emitter.every_n_frames must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Effective grid dimension
    pub fn grid_dimension(&self) -> usize {
        self.grid_dimension
            .unwrap_or_else(|| SpatialGrid::dimension_for(self.width, self.body_radius))
    }
}
