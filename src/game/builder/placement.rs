//! Block Placement
//!
//! Stacking height and placement legality for new bricks.
//!
//! Stacking and legality deliberately use different overlap tests: stacking
//! compares continuous center distances, legality compares whole grid cells
//! (floor/ceil extents). Keep them separate.

use glam::Vec3;

use super::tools::SAME_LAYER_EPSILON;
use crate::game::building::{Construction, Footprint};
use crate::world::GridConfig;

/// Center height for a brick with `footprint`, resting on the tallest brick
/// it overlaps or on the ground when it overlaps nothing.
pub fn resolve_stack_height(grid: &GridConfig, footprint: &Footprint, construction: &Construction) -> f32 {
    construction
        .iter()
        .filter(|block| block.footprint().overlaps_continuous(footprint))
        .map(|block| block.position.y)
        .reduce(f32::max)
        .map(|top| top + grid.layer_step())
        .unwrap_or_else(|| grid.ground_layer_y())
}

/// Check whether a brick can be placed at `position` with the given footprint.
///
/// Fails when the footprint's cell extents leave the platform, or when an
/// existing brick on the same layer shares a grid cell with it.
pub fn is_valid_placement(
    grid: &GridConfig,
    position: Vec3,
    width: u32,
    depth: u32,
    construction: &Construction,
) -> bool {
    if !grid.footprint_in_bounds(position.x, position.z, width, depth) {
        return false;
    }

    let candidate = Footprint::new(position.x, position.z, width, depth);
    !construction.iter().any(|block| {
        (position.y - block.position.y).abs() < SAME_LAYER_EPSILON
            && block.footprint().overlaps_cells(&candidate)
    })
}

/// Result of resolving a placement for the current pointer hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Snapped, stacked brick center
    pub position: Vec3,
    /// Whether the brick may be committed here
    pub valid: bool,
}

/// Snap a build-surface hit, stack it, and validate it.
pub fn resolve_placement(
    grid: &GridConfig,
    hit_point: Vec3,
    width: u32,
    depth: u32,
    construction: &Construction,
) -> PlacementResult {
    let (x, z) = grid.snap_footprint(hit_point, width, depth);
    let footprint = Footprint::new(x, z, width, depth);
    let y = resolve_stack_height(grid, &footprint, construction);
    let position = Vec3::new(x, y, z);

    PlacementResult {
        position,
        valid: is_valid_placement(grid, position, width, depth, construction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::Block;

    fn brick_at(x: f32, y: f32, z: f32, width: u32, depth: u32) -> Block {
        Block::new("#33CC66", Vec3::new(x, y, z), width, depth)
    }

    #[test]
    fn test_ground_height_when_empty() {
        let grid = GridConfig::default();
        let y = resolve_stack_height(&grid, &Footprint::new(0.0, 0.0, 2, 2), &Construction::new());
        assert_eq!(y, grid.ground_layer_y());
    }

    #[test]
    fn test_stacks_on_same_spot() {
        let grid = GridConfig::default();
        let h0 = grid.ground_layer_y();
        let construction = Construction::new().with_block(brick_at(0.5, h0, 0.5, 1, 1));

        let y = resolve_stack_height(&grid, &Footprint::new(0.5, 0.5, 1, 1), &construction);
        assert!((y - (h0 + grid.brick_height + grid.layer_gap)).abs() < 1e-6);
    }

    #[test]
    fn test_stacks_on_tallest_overlap() {
        let grid = GridConfig::default();
        let construction = Construction::new()
            .with_block(brick_at(0.0, grid.layer_y(0), 0.0, 2, 2))
            .with_block(brick_at(2.0, grid.layer_y(2), 0.0, 2, 2))
            .with_block(brick_at(8.0, grid.layer_y(5), 8.0, 2, 2));

        // A 4-wide brick at x=1 spans both of the first two stacks
        let y = resolve_stack_height(&grid, &Footprint::new(1.0, 0.0, 4, 2), &construction);
        assert!((y - grid.layer_y(3)).abs() < 1e-4);
    }

    #[test]
    fn test_overlap_on_same_layer_is_invalid() {
        let grid = GridConfig::default();
        let y0 = grid.ground_layer_y();
        let construction = Construction::new().with_block(brick_at(0.0, y0, 0.0, 2, 2));

        assert!(!is_valid_placement(&grid, Vec3::new(1.0, y0, 0.0), 2, 2, &construction));
    }

    #[test]
    fn test_adjacent_on_same_layer_is_valid() {
        let grid = GridConfig::default();
        let y0 = grid.ground_layer_y();
        let construction = Construction::new().with_block(brick_at(0.0, y0, 0.0, 2, 2));

        assert!(is_valid_placement(&grid, Vec3::new(2.0, y0, 0.0), 2, 2, &construction));
    }

    #[test]
    fn test_overlap_on_other_layer_is_valid() {
        let grid = GridConfig::default();
        let construction = Construction::new().with_block(brick_at(0.0, grid.layer_y(0), 0.0, 2, 2));

        assert!(is_valid_placement(&grid, Vec3::new(0.0, grid.layer_y(1), 0.0), 2, 2, &construction));
    }

    #[test]
    fn test_out_of_bounds_is_invalid() {
        let grid = GridConfig::default();
        let y0 = grid.ground_layer_y();
        assert!(!is_valid_placement(&grid, Vec3::new(10.0, y0, 0.0), 2, 2, &Construction::new()));
        assert!(!is_valid_placement(&grid, Vec3::new(0.0, y0, -10.5), 1, 1, &Construction::new()));
    }

    #[test]
    fn test_resolve_placement_snaps_and_stacks() {
        let grid = GridConfig::default();
        let result = resolve_placement(&grid, Vec3::new(1.37, 0.0, 1.37), 2, 3, &Construction::new());
        assert_eq!(result.position.x, 1.0);
        assert_eq!(result.position.z, 0.5);
        assert_eq!(result.position.y, grid.ground_layer_y());
        assert!(result.valid);
    }
}
