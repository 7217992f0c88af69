//! Deterministic simulation module
//!
//! All physics lives here. Given the same bodies and parameters, a step
//! produces the same result:
//! - Fixed sub-step count per frame
//! - Stable iteration order (grid cell, then insertion order)
//! - No rendering, timing-dependent, or platform logic beyond diagnostics

pub mod body;
pub mod collision;
pub mod grid;
pub mod integrate;
pub mod step;
pub mod walls;

pub use body::{Body, BodyStore};
pub use collision::{CollisionStats, Contact, detect, resolve, resolve_all_pairs, resolve_pairs};
pub use grid::{GridCell, Rect, SpatialGrid};
pub use integrate::integrate;
pub use step::{Simulation, StepParams, StepReport};
pub use walls::{confine, resolve_walls};
