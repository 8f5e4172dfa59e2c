//! Grid Configuration Module
//!
//! Platform geometry for brick placement: grid snapping, layer heights and
//! platform bounds.
//!
//! ## Units
//! 1 grid unit = one stud. The platform is `platform_size` studs on each
//! side, centered on the origin, so its half-extent is `platform_size / 2`.
//!
//! ## Snapping parity
//! A brick with an odd extent on an axis has its center on a half-grid line
//! (`n - 0.5`); an even extent centers on an integer line. X and Z are
//! snapped independently.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Platform side length in studs.
pub const PLATFORM_SIZE: f32 = 20.0;

/// Height of a single brick.
pub const BRICK_HEIGHT: f32 = 1.2;

/// Vertical gap left between stacked layers.
pub const LAYER_GAP: f32 = 0.005;

/// Thickness of the platform slab.
pub const GROUND_HEIGHT: f32 = BRICK_HEIGHT / 4.0;

/// Grid and platform configuration for placement math.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Platform side length (bounds are `-size/2 ..= size/2`)
    pub platform_size: f32,
    /// Height of one brick
    pub brick_height: f32,
    /// Gap inserted between stacked layers
    pub layer_gap: f32,
    /// Platform slab thickness; bricks on the ground rest on top of it
    pub ground_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            platform_size: PLATFORM_SIZE,
            brick_height: BRICK_HEIGHT,
            layer_gap: LAYER_GAP,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl GridConfig {
    /// Create a config for a platform of the given side length with default
    /// brick proportions.
    pub fn with_platform_size(platform_size: f32) -> Self {
        Self {
            platform_size,
            ..Default::default()
        }
    }

    /// Half-extent of the platform.
    pub fn half_extent(&self) -> f32 {
        self.platform_size / 2.0
    }

    /// Center height of a brick resting directly on the platform.
    pub fn ground_layer_y(&self) -> f32 {
        self.ground_height / 2.0 + self.brick_height / 2.0
    }

    /// Vertical distance between two consecutive layers.
    pub fn layer_step(&self) -> f32 {
        self.brick_height + self.layer_gap
    }

    /// Nearest layer number for a brick center height (0 = ground layer).
    pub fn layer_index(&self, y: f32) -> u32 {
        ((y - self.ground_layer_y()) / self.layer_step()).round().max(0.0) as u32
    }

    /// Center height of the given layer.
    pub fn layer_y(&self, layer: u32) -> f32 {
        self.ground_layer_y() + layer as f32 * self.layer_step()
    }

    /// Snap a horizontal hit point to the grid for a `width x depth` footprint.
    ///
    /// Returns the snapped `(x, z)` pair; Y is resolved separately by stacking.
    pub fn snap_footprint(&self, point: Vec3, width: u32, depth: u32) -> (f32, f32) {
        (snap_axis(point.x, width), snap_axis(point.z, depth))
    }

    /// Check that a footprint's integer cell extents lie on the platform.
    pub fn footprint_in_bounds(&self, x: f32, z: f32, width: u32, depth: u32) -> bool {
        let half = self.half_extent();
        let (left, right) = cell_extent(x, width);
        let (top, bottom) = cell_extent(z, depth);

        left >= -half && right <= half && top >= -half && bottom <= half
    }
}

/// Snap one axis of a footprint center.
///
/// Odd sizes land on `round(v) - 0.5`, even sizes on `round(v)`. Rounding is
/// half-up, so `-0.5` rounds to `0`.
pub fn snap_axis(value: f32, size: u32) -> f32 {
    let rounded = (value + 0.5).floor();
    if size % 2 == 1 { rounded - 0.5 } else { rounded }
}

/// Integer cell extent `(floor(c - s/2), ceil(c + s/2))` of a footprint axis.
pub fn cell_extent(center: f32, size: u32) -> (f32, f32) {
    let half = size as f32 / 2.0;
    ((center - half).floor(), (center + half).ceil())
}
