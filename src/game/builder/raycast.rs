//! Raycast Utilities
//!
//! Pure raycast functions for the build preview and brick picking.

use glam::Vec3;

use crate::game::building::Construction;
use crate::physics::{Ray, ray_aabb_intersect, ray_plane_y};
use crate::world::GridConfig;

/// A brick hit by a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Index of the brick in the construction
    pub index: usize,
    /// Distance from the ray origin to the hit point
    pub distance: f32,
}

/// Find the nearest brick intersected by `ray`.
///
/// Each brick is tested as a box of its footprint times the full brick
/// height. Returns `None` when nothing is hit. Equal distances keep the
/// earlier brick.
pub fn pick_block(grid: &GridConfig, ray: &Ray, construction: &Construction) -> Option<PickHit> {
    construction
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let (min, max) = block.bounds(grid);
            ray_aabb_intersect(ray, min, max).map(|t| PickHit {
                index,
                distance: ray.origin.distance(ray.at(t)),
            })
        })
        .fold(None, |nearest: Option<PickHit>, hit| match nearest {
            Some(best) if best.distance <= hit.distance => Some(best),
            _ => Some(hit),
        })
}

/// Project the pointer ray onto the build surface (`y = 0`).
///
/// Hits outside the platform square are discarded, matching a surface that
/// only spans the platform.
pub fn build_surface_hit(grid: &GridConfig, ray: &Ray) -> Option<Vec3> {
    let hit = ray_plane_y(ray, 0.0)?;
    let half = grid.half_extent();
    (hit.x.abs() <= half && hit.z.abs() <= half).then_some(hit)
}
