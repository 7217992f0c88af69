//! Uniform spatial grid for the collision broad phase
//!
//! The bounds are split into a `D x D` grid of cells stored row-major
//! (`index = row * D + col`). Each cell's rectangle and its neighbor set are
//! computed once at construction; only the per-cell item lists change, and
//! they are refilled from scratch every sub-step.

use glam::Vec2;

use super::body::Body;
use crate::consts::GRID_DENSITY;
use crate::error::{Result, SimError};

/// Axis-aligned rectangle `(x0, y0)..(x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Inclusive point test
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    /// True if the disc lies strictly inside the rectangle
    #[inline]
    pub fn contains_disc(&self, center: Vec2, radius: f32) -> bool {
        center.x - radius > self.x0
            && center.x + radius < self.x1
            && center.y - radius > self.y0
            && center.y + radius < self.y1
    }
}

/// One grid bucket
#[derive(Debug, Clone)]
pub struct GridCell {
    pub rect: Rect,
    /// Indices into the body store, refilled every sub-step
    pub items: Vec<usize>,
    /// Adjacent cell indices in ascending order (3 at corners, 5 on edges, 8 inside)
    pub neighbors: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    width: f32,
    height: f32,
    dimension: usize,
    cell_size: Vec2,
    cells: Vec<GridCell>,
}

impl SpatialGrid {
    /// Build the grid topology for the given bounds
    pub fn new(width: f32, height: f32, dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(SimError::InvalidGridDimension);
        }
        let valid = |v: f32| v > 0.0 && v.is_finite();
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidBounds { width, height });
        }

        let d = dimension;
        let cell_size = Vec2::new(width / d as f32, height / d as f32);
        let mut cells = Vec::with_capacity(d * d);

        for row in 0..d {
            for col in 0..d {
                let x0 = col as f32 * cell_size.x;
                let y0 = row as f32 * cell_size.y;
                cells.push(GridCell {
                    rect: Rect {
                        x0,
                        y0,
                        x1: x0 + cell_size.x,
                        y1: y0 + cell_size.y,
                    },
                    items: Vec::new(),
                    neighbors: neighbor_indices(row, col, d),
                });
            }
        }

        log::debug!(
            "Built {}x{} grid over {}x{} (cell {:.2}x{:.2})",
            d,
            d,
            width,
            height,
            cell_size.x,
            cell_size.y
        );

        Ok(Self {
            width,
            height,
            dimension,
            cell_size,
            cells,
        })
    }

    /// Cells per axis for a given bound and typical body radius
    ///
    /// Aims for roughly one body per cell at the expected packing.
    pub fn dimension_for(width: f32, radius: f32) -> usize {
        let dim = (width / (GRID_DENSITY * radius)).floor();
        if dim.is_finite() && dim >= 1.0 {
            dim as usize
        } else {
            1
        }
    }

    /// Whether this grid was built for exactly these parameters
    pub fn matches(&self, width: f32, height: f32, dimension: usize) -> bool {
        self.width == width && self.height == height && self.dimension == dimension
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, index: usize) -> &GridCell {
        &self.cells[index]
    }

    /// Cell index for a position, clamped into the grid
    ///
    /// Positions outside the bounds (or NaN) land in the nearest edge cell so
    /// that no body is ever dropped.
    #[inline]
    pub fn cell_index_of(&self, pos: Vec2) -> usize {
        let last = self.dimension - 1;
        // float -> usize casts saturate: negatives and NaN become 0
        let col = ((pos.x / self.cell_size.x).floor() as usize).min(last);
        let row = ((pos.y / self.cell_size.y).floor() as usize).min(last);
        row * self.dimension + col
    }

    /// Clear every bucket and re-insert all bodies by current position
    pub fn rebuild(&mut self, bodies: &[Body]) {
        for cell in &mut self.cells {
            cell.items.clear();
        }
        for (i, body) in bodies.iter().enumerate() {
            let index = self.cell_index_of(body.pos);
            self.cells[index].items.push(i);
        }
    }

    /// Total number of bucketed items (equals body count after a rebuild)
    pub fn item_count(&self) -> usize {
        self.cells.iter().map(|c| c.items.len()).sum()
    }
}

/// Neighbor set of a cell, special-cased by position in the grid
fn neighbor_indices(row: usize, col: usize, d: usize) -> Vec<usize> {
    if d == 1 {
        return Vec::new();
    }

    let i = row * d + col;
    let first_row = row == 0;
    let last_row = row == d - 1;
    let first_col = col == 0;
    let last_col = col == d - 1;

    match (first_row, last_row, first_col, last_col) {
        // corners
        (true, _, true, _) => vec![i + 1, i + d, i + d + 1],
        (true, _, _, true) => vec![i - 1, i + d - 1, i + d],
        (_, true, true, _) => vec![i - d, i - d + 1, i + 1],
        (_, true, _, true) => vec![i - d - 1, i - d, i - 1],
        // edges
        (true, _, _, _) => vec![i - 1, i + 1, i + d - 1, i + d, i + d + 1],
        (_, true, _, _) => vec![i - d - 1, i - d, i - d + 1, i - 1, i + 1],
        (_, _, true, _) => vec![i - d, i - d + 1, i + 1, i + d, i + d + 1],
        (_, _, _, true) => vec![i - d - 1, i - d, i - 1, i + d - 1, i + d],
        // interior
        _ => vec![
            i - d - 1,
            i - d,
            i - d + 1,
            i - 1,
            i + 1,
            i + d - 1,
            i + d,
            i + d + 1,
        ],
    }
}
