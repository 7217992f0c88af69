//! Per-frame simulation step
//!
//! One call advances the body store by one displayed frame, split into a
//! fixed number of sub-steps. Each sub-step runs to completion before the
//! next begins: integrate everything, clamp to the walls, re-bucket, then
//! resolve collisions. Positions are confined to the bounds once more at the
//! end of the frame.

use std::time::{Duration, Instant};

use super::body::BodyStore;
use super::collision::{CollisionStats, resolve_pairs};
use super::grid::SpatialGrid;
use super::integrate::integrate;
use super::walls::{confine, resolve_walls};
use crate::config::SimConfig;
use crate::error::Result;

/// Physical constants for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub substeps: u32,
    pub bounciness: f32,
}

impl From<&SimConfig> for StepParams {
    fn from(config: &SimConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            gravity: config.gravity,
            substeps: config.substeps,
            bounciness: config.bounciness,
        }
    }
}

/// Diagnostics for one completed step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepReport {
    /// Wall-clock time spent inside the step
    pub elapsed: Duration,
    pub substeps: u32,
    pub bodies: usize,
    /// Narrow-phase tests, summed over sub-steps
    pub candidates: usize,
    /// Resolved overlaps, summed over sub-steps
    pub contacts: usize,
    /// Wall impacts, summed over sub-steps
    pub wall_hits: usize,
    /// Deepest pair penetration seen in any sub-step
    pub max_depth: f32,
}

impl StepReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Owns the spatial grid for the lifetime of a run
#[derive(Debug, Clone)]
pub struct Simulation {
    params: StepParams,
    grid: SpatialGrid,
}

impl Simulation {
    /// Build a simulation from a validated config
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        Self::with_params(StepParams::from(config), config.grid_dimension())
    }

    pub fn with_params(params: StepParams, grid_dimension: usize) -> Result<Self> {
        let grid = SpatialGrid::new(params.width, params.height, grid_dimension)?;
        log::info!(
            "Simulation {}x{}, {} substeps, grid {}x{}",
            params.width,
            params.height,
            params.substeps,
            grid_dimension,
            grid_dimension
        );
        Ok(Self { params, grid })
    }

    #[inline]
    pub fn params(&self) -> &StepParams {
        &self.params
    }

    /// Tune gravity, sub-steps or bounciness between frames
    ///
    /// Bounds are ignored here; use [`Simulation::resize`] to change them.
    pub fn set_params(&mut self, params: StepParams) {
        if params.width != self.params.width || params.height != self.params.height {
            log::warn!(
                "set_params ignores bounds {}x{}, keeping {}x{}; use resize instead",
                params.width,
                params.height,
                self.params.width,
                self.params.height
            );
        }
        self.params = StepParams {
            width: self.params.width,
            height: self.params.height,
            ..params
        };
    }

    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Change the bounds or grid dimension, rebuilding the topology if needed
    pub fn resize(&mut self, width: f32, height: f32, grid_dimension: usize) -> Result<()> {
        if self.grid.matches(width, height, grid_dimension) {
            return Ok(());
        }
        self.grid = SpatialGrid::new(width, height, grid_dimension)?;
        self.params.width = width;
        self.params.height = height;
        log::info!(
            "Grid rebuilt for {}x{} ({}x{} cells)",
            width,
            height,
            grid_dimension,
            grid_dimension
        );
        Ok(())
    }

    /// Advance all bodies by one frame
    pub fn step(&mut self, store: &mut BodyStore) -> StepReport {
        let start = Instant::now();
        let StepParams {
            width,
            height,
            gravity,
            substeps,
            bounciness,
        } = self.params;
        let substeps = substeps.max(1);
        let max_radius = store.max_radius();
        let bodies = store.as_mut_slice();

        let mut stats = CollisionStats::default();
        let mut wall_hits = 0;

        for _ in 0..substeps {
            integrate(bodies, gravity, substeps);

            for body in bodies.iter_mut() {
                if resolve_walls(body, width, height, bounciness) {
                    wall_hits += 1;
                }
            }

            self.grid.rebuild(bodies);
            stats += resolve_pairs(bodies, &self.grid, bounciness, max_radius);
        }

        for body in bodies.iter_mut() {
            confine(body, width, height);
        }

        let report = StepReport {
            elapsed: start.elapsed(),
            substeps,
            bodies: bodies.len(),
            candidates: stats.candidates,
            contacts: stats.contacts,
            wall_hits,
            max_depth: stats.max_depth,
        };
        log::trace!(
            "step: {} bodies, {} candidates, {} contacts, max depth {:.3}, {:.3}ms",
            report.bodies,
            report.candidates,
            report.contacts,
            report.max_depth,
            report.elapsed_ms()
        );
        report
    }
}
