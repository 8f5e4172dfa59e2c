//! Builder Tools
//!
//! Tool constants and the brick-size tool state.

use serde::{Deserialize, Serialize};

use crate::game::building::{MAX_BRICK_SIZE, MIN_BRICK_SIZE};

/// Pointer travel (pixels) beyond which a press becomes a drag.
pub const TAP_THRESHOLD_PX: f32 = 10.0;

/// Two brick centers closer than this vertically are on the same layer.
pub const SAME_LAYER_EPSILON: f32 = 0.1;

/// Default brick size on both axes.
pub const DEFAULT_BRICK_SIZE: u32 = 2;

/// Footprint of the next brick to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickDimensions {
    pub width: u32,
    pub depth: u32,
}

impl Default for BrickDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_BRICK_SIZE,
            depth: DEFAULT_BRICK_SIZE,
        }
    }
}

impl BrickDimensions {
    /// Create dimensions clamped to the allowed brick sizes.
    pub fn new(width: u32, depth: u32) -> Self {
        Self {
            width: clamp_size(width as i64),
            depth: clamp_size(depth as i64),
        }
    }

    /// Grow or shrink the width, staying within limits.
    pub fn adjust_width(&mut self, delta: i32) {
        self.width = clamp_size(self.width as i64 + delta as i64);
    }

    /// Grow or shrink the depth, staying within limits.
    pub fn adjust_depth(&mut self, delta: i32) {
        self.depth = clamp_size(self.depth as i64 + delta as i64);
    }

    /// Rotate the brick a quarter turn by exchanging width and depth.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.width, &mut self.depth);
    }
}

fn clamp_size(value: i64) -> u32 {
    value.clamp(MIN_BRICK_SIZE as i64, MAX_BRICK_SIZE as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let dims = BrickDimensions::default();
        assert_eq!((dims.width, dims.depth), (2, 2));
    }

    #[test]
    fn test_adjust_clamps() {
        let mut dims = BrickDimensions::new(1, 20);
        dims.adjust_width(-1);
        dims.adjust_depth(1);
        assert_eq!((dims.width, dims.depth), (1, 20));

        dims.adjust_width(5);
        dims.adjust_depth(-3);
        assert_eq!((dims.width, dims.depth), (6, 17));
    }

    #[test]
    fn test_swap() {
        let mut dims = BrickDimensions::new(1, 4);
        dims.swap();
        assert_eq!((dims.width, dims.depth), (4, 1));
    }

    #[test]
    fn test_new_clamps() {
        let dims = BrickDimensions::new(0, 99);
        assert_eq!((dims.width, dims.depth), (1, 20));
    }
}
