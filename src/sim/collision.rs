//! Circle-circle collision detection and response
//!
//! Broad phase walks the spatial grid: same-cell pairs plus pairs against
//! neighboring cells. Narrow phase is an exact radius test, and response is
//! positional correction followed by a damped reflection about the contact
//! point. Pairs are resolved one after another in grid order, each seeing the
//! results of the previous ones.

use glam::Vec2;

use super::body::Body;
use super::grid::SpatialGrid;
use crate::consts::CONTACT_EPSILON;

/// Result of resolving one overlapping pair
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Contact point on the line of centers, weighted toward the larger circle
    pub point: Vec2,
    /// Penetration depth before correction (zero when only touching)
    pub depth: f32,
}

/// Broad/narrow phase counters for one sub-step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionStats {
    /// Pairs that reached the narrow phase
    pub candidates: usize,
    /// Pairs that overlapped and were resolved
    pub contacts: usize,
    /// Deepest penetration seen before correction
    pub max_depth: f32,
}

impl CollisionStats {
    fn record(&mut self, contact: &Contact) {
        self.contacts += 1;
        self.max_depth = self.max_depth.max(contact.depth);
    }
}

impl std::ops::AddAssign for CollisionStats {
    fn add_assign(&mut self, rhs: Self) {
        self.candidates += rhs.candidates;
        self.contacts += rhs.contacts;
        self.max_depth = self.max_depth.max(rhs.max_depth);
    }
}

/// Exact overlap test
///
/// Returns the center delta `b - a` when the circles touch or overlap. A zero
/// component is nudged by [`CONTACT_EPSILON`] so coincident centers still get
/// a usable direction.
#[inline]
pub fn detect(a: &Body, b: &Body) -> Option<Vec2> {
    let reach = a.radius() + b.radius();
    let mut d = b.pos - a.pos;
    if d.x == 0.0 {
        d.x = CONTACT_EPSILON;
    }
    if d.y == 0.0 {
        d.y = CONTACT_EPSILON;
    }
    (d.length_squared() <= reach * reach).then_some(d)
}

/// Separate an overlapping pair and reflect both velocities
///
/// `delta` is the value returned by [`detect`] for `(a, b)`.
pub fn resolve(a: &mut Body, b: &mut Body, delta: Vec2, bounciness: f32) -> Contact {
    let (ra, rb) = (a.radius(), b.radius());
    let distance = delta.length();
    let point = (a.pos * rb + b.pos * ra) / (ra + rb);
    let depth = ra + rb - distance;

    if depth > 0.0 {
        let push = delta / distance * (depth / 2.0);
        a.pos -= push;
        b.pos += push;
    }

    a.vel = reflect_approaching(a.vel, a.pos - point, bounciness);
    b.vel = reflect_approaching(b.vel, b.pos - point, bounciness);

    Contact { point, depth }
}

/// Damped reflection, applied only while moving toward the contact point
///
/// `away` points from the contact point to the body. A body already moving
/// away keeps its velocity; reflecting it anyway would add energy.
#[inline]
fn reflect_approaching(velocity: Vec2, away: Vec2, bounciness: f32) -> Vec2 {
    let normal = away.normalize_or_zero();
    let dot = velocity.dot(normal);
    if dot < 0.0 {
        velocity - 2.0 * dot * normal * bounciness
    } else {
        velocity
    }
}

/// Resolve every overlapping pair found through the grid
///
/// The grid must have been rebuilt from `bodies` in the current sub-step.
/// `max_radius` is the largest radius in the store; a body whose disc grown
/// by it fits strictly inside its own cell cannot reach anything in a
/// neighboring cell, so the neighbor scan is skipped for it.
///
/// Each unordered pair is visited at most once: same-cell partners only
/// after the current item, and neighbor cells only with a higher index.
pub fn resolve_pairs(
    bodies: &mut [Body],
    grid: &SpatialGrid,
    bounciness: f32,
    max_radius: f32,
) -> CollisionStats {
    let mut stats = CollisionStats::default();

    for (cell_index, cell) in grid.cells().iter().enumerate() {
        for (k, &i) in cell.items.iter().enumerate() {
            for &j in &cell.items[k + 1..] {
                test_pair(bodies, i, j, bounciness, &mut stats);
            }

            let body = &bodies[i];
            if cell.rect.contains_disc(body.pos, body.radius() + max_radius) {
                continue;
            }

            for &n in cell.neighbors.iter().filter(|&&n| n > cell_index) {
                for &j in &grid.cell(n).items {
                    test_pair(bodies, i, j, bounciness, &mut stats);
                }
            }
        }
    }

    stats
}

#[inline]
fn test_pair(bodies: &mut [Body], i: usize, j: usize, bounciness: f32, stats: &mut CollisionStats) {
    stats.candidates += 1;
    let (a, b) = pair_mut(bodies, i, j);
    if let Some(delta) = detect(a, b) {
        let contact = resolve(a, b, delta, bounciness);
        stats.record(&contact);
    }
}

/// Two distinct mutable bodies out of one slice
#[inline]
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Reference all-pairs pass, used to cross-check the grid broad phase
pub fn resolve_all_pairs(bodies: &mut [Body], bounciness: f32) -> CollisionStats {
    let mut stats = CollisionStats::default();
    for i in 0..bodies.len() {
        for j in i + 1..bodies.len() {
            test_pair(bodies, i, j, bounciness, &mut stats);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        Body::new(5.0, Vec2::new(x, y), Vec2::new(vx, vy), [0.0; 3])
    }

    #[test]
    fn test_detect_touching_and_apart() {
        let a = body(0.0, 0.0, 0.0, 0.0);
        assert!(detect(&a, &body(10.0, 0.0, 0.0, 0.0)).is_some());
        assert!(detect(&a, &body(10.5, 0.0, 0.0, 0.0)).is_none());
        assert!(detect(&a, &body(6.0, 8.0, 0.0, 0.0)).is_some());
    }

    #[test]
    fn test_detect_nudges_zero_axes() {
        let a = body(20.0, 20.0, 0.0, 0.0);
        let b = body(20.0, 20.0, 0.0, 0.0);
        let d = detect(&a, &b).unwrap();
        assert_eq!(d, Vec2::splat(CONTACT_EPSILON));
    }

    #[test]
    fn test_head_on_collision_swaps_velocities() {
        let mut a = body(50.0, 50.0, 2.0, 0.0);
        let mut b = body(58.0, 50.0, -2.0, 0.0);
        let delta = detect(&a, &b).unwrap();
        let contact = resolve(&mut a, &mut b, delta, 1.0);

        assert!((contact.point - Vec2::new(54.0, 50.0)).length() < 1e-4);
        assert!((contact.depth - 2.0).abs() < 1e-4);
        assert!(((b.pos - a.pos).length() - 10.0).abs() < 1e-4);
        assert!((a.vel - Vec2::new(-2.0, 0.0)).length() < 1e-4);
        assert!((b.vel - Vec2::new(2.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_bounciness_damps_normal_component() {
        let mut a = body(50.0, 50.0, 2.0, 0.0);
        let mut b = body(58.0, 50.0, 0.0, 0.0);
        let delta = detect(&a, &b).unwrap();
        resolve(&mut a, &mut b, delta, 0.5);
        // 2 - 2 * 2 * 0.5
        assert!(a.vel.x.abs() < 1e-4);
        assert!((b.vel - Vec2::ZERO).length() < 1e-4);
    }

    #[test]
    fn test_separating_pair_keeps_velocities() {
        let mut a = body(50.0, 50.0, -3.0, 1.0);
        let mut b = body(57.0, 50.0, 4.0, -1.0);
        let delta = detect(&a, &b).unwrap();
        resolve(&mut a, &mut b, delta, 0.8);

        assert_eq!(a.vel, Vec2::new(-3.0, 1.0));
        assert_eq!(b.vel, Vec2::new(4.0, -1.0));
        assert!(((b.pos - a.pos).length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_larger_circle_weights_contact_point() {
        let mut a = Body::new(10.0, Vec2::new(0.0, 0.0), Vec2::ZERO, [0.0; 3]);
        let mut b = Body::new(5.0, Vec2::new(12.0, 0.0), Vec2::ZERO, [0.0; 3]);
        let delta = detect(&a, &b).unwrap();
        let contact = resolve(&mut a, &mut b, delta, 0.6);
        // (0 * 5 + 12 * 10) / 15
        assert!((contact.point.x - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_grid_pass_resolves_cross_cell_pair_once() {
        let grid_bodies = [body(24.0, 10.0, 1.0, 0.0), body(31.0, 10.0, -1.0, 0.0)];
        let mut bodies = grid_bodies;
        let mut grid = SpatialGrid::new(100.0, 100.0, 4).unwrap();
        grid.rebuild(&bodies);
        assert_ne!(grid.cell_index_of(bodies[0].pos), grid.cell_index_of(bodies[1].pos));

        let stats = resolve_pairs(&mut bodies, &grid, 1.0, 5.0);
        assert_eq!(stats.contacts, 1);
        assert!((stats.max_depth - 3.0).abs() < 1e-4);
        assert!(((bodies[1].pos - bodies[0].pos).length() - 10.0).abs() < 1e-4);

        let mut reference = grid_bodies;
        resolve_all_pairs(&mut reference, 1.0);
        assert_eq!(bodies, reference);
    }

    #[test]
    fn test_contained_body_skips_neighbor_scan() {
        let mut grid = SpatialGrid::new(100.0, 100.0, 4).unwrap();

        // deep inside cell 5, neighbor cell 6 is occupied but out of reach
        let mut bodies = [body(37.5, 37.5, 0.0, 0.0), body(60.0, 37.5, 0.0, 0.0)];
        grid.rebuild(&bodies);
        let stats = resolve_pairs(&mut bodies, &grid, 1.0, 5.0);
        assert_eq!(stats.candidates, 0);

        // near the shared edge, the neighbor gets checked
        let mut bodies = [body(45.0, 37.5, 0.0, 0.0), body(60.0, 37.5, 0.0, 0.0)];
        grid.rebuild(&bodies);
        let stats = resolve_pairs(&mut bodies, &grid, 1.0, 5.0);
        assert_eq!(stats.candidates, 1);
        assert_eq!(stats.contacts, 0);
        assert_eq!(stats.max_depth, 0.0);
    }

    #[test]
    fn test_stats_keep_deepest_contact() {
        // pairs overlapping by 1 and by 4, far apart from each other
        let mut bodies = [
            body(20.0, 20.0, 0.0, 0.0),
            body(29.0, 20.0, 0.0, 0.0),
            body(70.0, 70.0, 0.0, 0.0),
            body(76.0, 70.0, 0.0, 0.0),
        ];
        let stats = resolve_all_pairs(&mut bodies, 0.6);
        assert_eq!(stats.contacts, 2);
        assert!((stats.max_depth - 4.0).abs() < 1e-4);

        let mut total = CollisionStats::default();
        total += stats;
        total += CollisionStats {
            candidates: 1,
            contacts: 1,
            max_depth: 0.5,
        };
        assert_eq!(total.contacts, 3);
        assert!((total.max_depth - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_mixed_radii_reach_across_cells() {
        // the small body's own disc fits in cell 0, but the large one in cell 1 reaches it
        let mut bodies = [
            Body::new(1.0, Vec2::new(14.0, 12.5), Vec2::ZERO, [0.0; 3]),
            Body::new(12.0, Vec2::new(25.5, 12.5), Vec2::ZERO, [0.0; 3]),
        ];
        let mut grid = SpatialGrid::new(100.0, 100.0, 4).unwrap();
        grid.rebuild(&bodies);
        assert_eq!(grid.cell_index_of(bodies[1].pos), 1);

        let stats = resolve_pairs(&mut bodies, &grid, 0.6, 12.0);
        assert_eq!(stats.contacts, 1);
        assert!((bodies[1].pos - bodies[0].pos).length() >= 13.0 - 1e-4);
    }

    proptest! {
        #[test]
        fn prop_resolved_pair_is_separated(
            ax in 20.0f32..80.0,
            ay in 20.0f32..80.0,
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.5f32..9.5,
            va in (-5.0f32..5.0, -5.0f32..5.0),
            vb in (-5.0f32..5.0, -5.0f32..5.0)
        ) {
            let offset = Vec2::new(angle.cos(), angle.sin()) * dist;
            let mut a = body(ax, ay, va.0, va.1);
            let mut b = body(ax + offset.x, ay + offset.y, vb.0, vb.1);
            let delta = detect(&a, &b).unwrap();
            resolve(&mut a, &mut b, delta, 0.6);
            prop_assert!((b.pos - a.pos).length() >= 10.0 - 1e-3);
        }

        #[test]
        fn prop_resolution_never_speeds_a_body_up(
            dist in 1.0f32..9.9,
            va in (-5.0f32..5.0, -5.0f32..5.0),
            vb in (-5.0f32..5.0, -5.0f32..5.0),
            bounciness in 0.0f32..=1.0
        ) {
            let mut a = body(50.0, 50.0, va.0, va.1);
            let mut b = body(50.0 + dist, 50.0, vb.0, vb.1);
            let before = (a.vel.length(), b.vel.length());
            let delta = detect(&a, &b).unwrap();
            resolve(&mut a, &mut b, delta, bounciness);
            prop_assert!(a.vel.length() <= before.0 + 1e-4);
            prop_assert!(b.vel.length() <= before.1 + 1e-4);
        }
    }
}
