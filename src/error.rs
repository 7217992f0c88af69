//! Setup and contract errors
//!
//! The per-frame step never fails. Everything here is raised while building
//! a simulation, loading its configuration, or appending bodies.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("grid dimension must be at least 1")]
    InvalidGridDimension,
    #[error("invalid simulation bounds {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("body store is full ({capacity} bodies)")]
    StoreFull { capacity: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
