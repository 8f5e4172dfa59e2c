//! World Module
//!
//! Platform-space configuration shared by placement and picking.
//!
//! ## Default Platform
//! A 20x20 stud platform centered on the origin. Bricks stack in discrete
//! layers spaced by `brick_height + layer_gap`.

pub mod grid;

pub use grid::{
    BRICK_HEIGHT, GROUND_HEIGHT, GridConfig, LAYER_GAP, PLATFORM_SIZE, cell_extent, snap_axis,
};
