//! Semi-implicit Euler integration with frame sub-stepping

use super::body::Body;

/// Advance every body by one sub-step of `1 / substeps` frames
///
/// Gravity is applied to velocity first, then the updated velocity moves the
/// body, so over `substeps` calls the velocity change sums to exactly one
/// frame's worth of gravity.
pub fn integrate(bodies: &mut [Body], gravity: f32, substeps: u32) {
    let inv = 1.0 / substeps.max(1) as f32;
    let dv = gravity * inv;
    for body in bodies {
        body.vel.y += dv;
        body.pos += body.vel * inv;
    }
}
