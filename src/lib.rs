//! Ballpit - grid-accelerated 2D rigid-circle physics
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (integration, walls, broad and narrow phase)
//! - `config`: JSON-backed run configuration
//! - `spawn`: Emitter that feeds new bodies between frames
//! - `instance`: Packed instance data for a renderer

pub mod config;
pub mod error;
pub mod instance;
pub mod sim;
pub mod spawn;

pub use config::{EmitterConfig, SimConfig};
pub use error::{Result, SimError};
pub use sim::{Body, BodyStore, Simulation, StepParams, StepReport};
pub use spawn::Emitter;

/// Default tuning constants
pub mod consts {
    /// Default bounds
    pub const DEFAULT_WIDTH: f32 = 400.0;
    pub const DEFAULT_HEIGHT: f32 = 400.0;
    /// Default body radius
    pub const DEFAULT_RADIUS: f32 = 3.0;

    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.5 / 500.0;
    /// Integration sub-steps per displayed frame
    pub const SUBSTEPS: u32 = 5;
    /// Velocity kept on impact
    pub const BOUNCINESS: f32 = 0.6;
    /// Default body store capacity
    pub const MAX_BODIES: usize = 4000;

    /// Grid cell size in body radii, tuned for ~1 body per cell when packed
    pub const GRID_DENSITY: f32 = 2.6755;

    /// Substitute for an exactly-zero center delta component
    pub const CONTACT_EPSILON: f32 = 1e-7;
}
