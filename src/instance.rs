//! Packed per-circle instance data for the renderer
//!
//! Eight floats per circle, ready to copy into a GPU vertex/storage buffer.

use bytemuck::{Pod, Zeroable};

use crate::sim::{Body, BodyStore};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub color: [f32; 3],
    pub radius: f32,
    pub velocity: [f32; 2],
    pub position: [f32; 2],
}

impl CircleInstance {
    /// Bytes per instance
    pub const STRIDE: usize = std::mem::size_of::<CircleInstance>();
    /// Floats per instance
    pub const COMPONENTS: usize = Self::STRIDE / std::mem::size_of::<f32>();

    /// Byte offsets of each attribute within an instance
    pub const COLOR_OFFSET: usize = 0;
    pub const RADIUS_OFFSET: usize = 12;
    pub const VELOCITY_OFFSET: usize = 16;
    pub const POSITION_OFFSET: usize = 24;
}

impl From<&Body> for CircleInstance {
    fn from(body: &Body) -> Self {
        Self {
            color: body.color,
            radius: body.radius(),
            velocity: body.vel.to_array(),
            position: body.pos.to_array(),
        }
    }
}

/// Refill `out` from the store, reusing its allocation
pub fn write_instances(store: &BodyStore, out: &mut Vec<CircleInstance>) {
    out.clear();
    out.extend(store.iter().map(CircleInstance::from));
}

/// View an instance slice as raw bytes for upload
pub fn as_bytes(instances: &[CircleInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
