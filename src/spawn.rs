//! Body emitter
//!
//! Appends a row of bodies near the top of the bounds every few frames until
//! the store is full. Runs between steps, never during one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{EmitterConfig, SimConfig};
use crate::sim::{Body, BodyStore};

pub struct Emitter {
    config: EmitterConfig,
    radius: f32,
    center_x: f32,
    rng: Pcg32,
    exhausted: bool,
}

impl Emitter {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            config: config.emitter.clone(),
            radius: config.body_radius,
            center_x: config.width / 2.0,
            rng: Pcg32::seed_from_u64(config.emitter.seed),
            exhausted: false,
        }
    }

    /// Whether the store has run out of room for another row
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Bodies per emitted row
    pub fn row_len(&self) -> usize {
        self.config.offsets.len()
    }

    /// Called by the host after each frame; returns how many bodies were added
    pub fn on_frame_end(&mut self, frame: u64, store: &mut BodyStore) -> usize {
        if self.exhausted || self.config.offsets.is_empty() {
            return 0;
        }
        if store.remaining() < self.row_len() {
            self.exhausted = true;
            log::warn!(
                "Emitter stopped at {} bodies (capacity {})",
                store.len(),
                store.capacity()
            );
            return 0;
        }
        if frame % self.config.every_n_frames.max(1) != 0 {
            return 0;
        }

        let y = self.radius * self.config.spawn_height;
        let mut added = 0;
        for i in 0..self.config.offsets.len() {
            let x = self.center_x + self.config.offsets[i] * self.radius;
            let color = self.next_color();
            let body = Body::new(
                self.radius,
                Vec2::new(x, y),
                self.config.launch_velocity,
                color,
            );
            match store.push(body) {
                Ok(_) => added += 1,
                Err(err) => {
                    log::warn!("Emitter failed to spawn body: {}", err);
                    self.exhausted = true;
                    break;
                }
            }
        }
        added
    }

    fn next_color(&mut self) -> [f32; 3] {
        match self.config.color {
            Some(color) => color,
            None => [
                self.rng.random_range(0.2..1.0),
                self.rng.random_range(0.2..1.0),
                self.rng.random_range(0.2..1.0),
            ],
        }
    }
}
