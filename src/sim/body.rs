//! Body store and the simulated circle record
//!
//! Bodies live in a single pre-sized buffer. Identity is the index into that
//! buffer; the store is append-only, so indices stay valid for a whole run.

use glam::Vec2;

use crate::error::{Result, SimError};

/// A simulated circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    radius: f32,
    /// Center position
    pub pos: Vec2,
    /// Velocity in units per frame
    pub vel: Vec2,
    /// RGB color, passed through to the renderer untouched
    pub color: [f32; 3],
}

impl Body {
    pub fn new(radius: f32, pos: Vec2, vel: Vec2, color: [f32; 3]) -> Self {
        Self {
            radius,
            pos,
            vel,
            color,
        }
    }

    /// Radius is fixed at construction
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Append-only body buffer with a fixed capacity
///
/// The backing allocation is made once in [`BodyStore::with_capacity`];
/// pushing past capacity is an error rather than a reallocation, which keeps
/// the per-frame path free of allocator traffic.
#[derive(Debug, Clone)]
pub struct BodyStore {
    bodies: Vec<Body>,
    capacity: usize,
    max_radius: f32,
}

impl BodyStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
            capacity,
            max_radius: 0.0,
        }
    }

    /// Append a body, returning its index
    pub fn push(&mut self, body: Body) -> Result<usize> {
        if !(body.radius > 0.0 && body.radius.is_finite()) {
            return Err(SimError::InvalidRadius(body.radius));
        }
        if self.bodies.len() >= self.capacity {
            return Err(SimError::StoreFull {
                capacity: self.capacity,
            });
        }
        self.max_radius = self.max_radius.max(body.radius);
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    /// Number of live bodies (the high-water mark)
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Room left before [`BodyStore::push`] starts failing
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.bodies.len()
    }

    /// Largest radius ever pushed since the last clear
    #[inline]
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Drop all bodies, keeping the allocation (restart)
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.max_radius = 0.0;
    }
}

impl<'a> IntoIterator for &'a BodyStore {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
