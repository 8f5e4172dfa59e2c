//! Building Module
//!
//! Brick data model and palette:
//! - Bricks, footprints and constructions
//! - Color themes

pub mod blocks;
pub mod materials;

pub use blocks::{Block, Construction, Footprint, MAX_BRICK_SIZE, MIN_BRICK_SIZE};
pub use materials::{ColorTheme, DEFAULT_COLOR, PALETTE_SIZE, lighten_color};
