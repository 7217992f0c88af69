//! Collisions against the four axis-aligned simulation bounds

use super::body::Body;

/// Clamp a body back inside `(0, 0)..(width, height)` and bounce it
///
/// Every side is tested on its own. On the axis of a wall that was hit the
/// velocity is reversed and damped by `bounciness`; the other axis keeps its
/// sign but is damped too (sliding friction). A corner hit reverses both
/// components, damping each once. Returns whether any wall was touched.
pub fn resolve_walls(body: &mut Body, width: f32, height: f32, bounciness: f32) -> bool {
    let r = body.radius();
    let mut hit_x = false;
    let mut hit_y = false;

    if body.pos.y + r > height {
        body.pos.y = height - r;
        hit_y = true;
    }
    if body.pos.y - r < 0.0 {
        body.pos.y = r;
        hit_y = true;
    }
    if body.pos.x + r > width {
        body.pos.x = width - r;
        hit_x = true;
    }
    if body.pos.x - r < 0.0 {
        body.pos.x = r;
        hit_x = true;
    }

    if !(hit_x || hit_y) {
        return false;
    }

    body.vel.x *= if hit_x { -bounciness } else { bounciness };
    body.vel.y *= if hit_y { -bounciness } else { bounciness };
    true
}

/// Clamp a body's position into the bounds without touching its velocity
///
/// Used once collisions are done, since separating a pair can nudge a body
/// back past a wall. Oversized bodies end up against the far side.
#[inline]
pub fn confine(body: &mut Body, width: f32, height: f32) {
    let r = body.radius();
    body.pos.x = body.pos.x.max(r).min(width - r);
    body.pos.y = body.pos.y.max(r).min(height - r);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn body(pos: Vec2, vel: Vec2) -> Body {
        Body::new(5.0, pos, vel, [0.0; 3])
    }

    #[test]
    fn test_no_contact_leaves_body_alone() {
        let mut b = body(Vec2::new(50.0, 50.0), Vec2::new(3.0, -2.0));
        assert!(!resolve_walls(&mut b, 100.0, 100.0, 0.6));
        assert_eq!(b.pos, Vec2::new(50.0, 50.0));
        assert_eq!(b.vel, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_floor_bounce_damps_tangent() {
        let mut b = body(Vec2::new(50.0, 97.0), Vec2::new(2.0, 4.0));
        assert!(resolve_walls(&mut b, 100.0, 100.0, 0.5));
        assert_eq!(b.pos, Vec2::new(50.0, 95.0));
        assert_eq!(b.vel, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut b = body(Vec2::new(104.0, 40.0), Vec2::new(10.0, -1.0));
        assert!(resolve_walls(&mut b, 100.0, 100.0, 0.5));
        assert_eq!(b.pos, Vec2::new(95.0, 40.0));
        assert_eq!(b.vel, Vec2::new(-5.0, -0.5));
    }

    #[test]
    fn test_corner_bounce() {
        let mut b = body(Vec2::new(3.0, 3.0), Vec2::new(-5.0, -5.0));
        assert!(resolve_walls(&mut b, 100.0, 100.0, 0.6));
        assert_eq!(b.pos, Vec2::new(5.0, 5.0));
        assert!((b.vel - Vec2::new(3.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_resting_on_wall_is_not_a_hit() {
        let mut b = body(Vec2::new(50.0, 95.0), Vec2::new(1.0, 0.0));
        assert!(!resolve_walls(&mut b, 100.0, 100.0, 0.6));
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_confine_keeps_velocity() {
        let mut b = body(Vec2::new(-1.0, 98.0), Vec2::new(-2.0, 3.0));
        confine(&mut b, 100.0, 100.0);
        assert_eq!(b.pos, Vec2::new(5.0, 95.0));
        assert_eq!(b.vel, Vec2::new(-2.0, 3.0));
    }

    #[test]
    fn test_confine_oversized_body_does_not_panic() {
        let mut b = Body::new(60.0, Vec2::new(10.0, 50.0), Vec2::ZERO, [0.0; 3]);
        confine(&mut b, 100.0, 100.0);
        assert_eq!(b.pos, Vec2::new(40.0, 40.0));
    }

    proptest! {
        #[test]
        fn prop_body_ends_inside_bounds(
            x in -200.0f32..300.0,
            y in -200.0f32..300.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            r in 0.5f32..20.0
        ) {
            let mut b = Body::new(r, Vec2::new(x, y), Vec2::new(vx, vy), [0.0; 3]);
            resolve_walls(&mut b, 100.0, 100.0, 0.6);
            prop_assert!(b.pos.x >= r && b.pos.x <= 100.0 - r);
            prop_assert!(b.pos.y >= r && b.pos.y <= 100.0 - r);
            prop_assert!(b.vel.length() <= Vec2::new(vx, vy).length() + 1e-4);
        }
    }
}
