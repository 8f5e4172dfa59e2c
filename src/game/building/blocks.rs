//! Building Blocks
//!
//! Bricks placed on the platform and the ordered construction that holds
//! them. A construction is immutable from the outside: every edit produces a
//! new value, which is what lets history keep plain snapshots.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::world::{GridConfig, cell_extent};

/// Smallest allowed brick extent on either axis.
pub const MIN_BRICK_SIZE: u32 = 1;

/// Largest allowed brick extent on either axis.
pub const MAX_BRICK_SIZE: u32 = 20;

/// A single brick.
///
/// `position` is the brick center. X and Z are grid-snapped for the brick's
/// footprint; Y is a layer center height.
///
/// Deserializing rejects extents outside `MIN_BRICK_SIZE..=MAX_BRICK_SIZE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredBlock")]
pub struct Block {
    /// Hex color string, e.g. `"#FF3333"`
    pub color: String,
    /// Center position, serialized as `[x, y, z]`
    pub position: Vec3,
    /// Extent along X in studs
    pub width: u32,
    /// Extent along Z in studs
    pub depth: u32,
}

/// Block as written to disk, before its extents are checked.
#[derive(Deserialize)]
struct StoredBlock {
    color: String,
    position: Vec3,
    width: u32,
    /// Older saves call this `height`
    #[serde(alias = "height")]
    depth: u32,
}

impl TryFrom<StoredBlock> for Block {
    type Error = String;

    fn try_from(stored: StoredBlock) -> Result<Self, Self::Error> {
        let sizes = MIN_BRICK_SIZE..=MAX_BRICK_SIZE;
        if !sizes.contains(&stored.width) || !sizes.contains(&stored.depth) {
            return Err(format!(
                "brick size {}x{} outside {}..={}",
                stored.width, stored.depth, MIN_BRICK_SIZE, MAX_BRICK_SIZE
            ));
        }
        Ok(Self {
            color: stored.color,
            position: stored.position,
            width: stored.width,
            depth: stored.depth,
        })
    }
}

impl Block {
    pub fn new(color: impl Into<String>, position: Vec3, width: u32, depth: u32) -> Self {
        Self {
            color: color.into(),
            position,
            width: width.clamp(MIN_BRICK_SIZE, MAX_BRICK_SIZE),
            depth: depth.clamp(MIN_BRICK_SIZE, MAX_BRICK_SIZE),
        }
    }

    /// Horizontal footprint of this brick.
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position.x, self.position.z, self.width, self.depth)
    }

    /// Axis-aligned bounding box (footprint x full brick height).
    pub fn bounds(&self, grid: &GridConfig) -> (Vec3, Vec3) {
        let half = Vec3::new(
            self.width as f32 / 2.0,
            grid.brick_height / 2.0,
            self.depth as f32 / 2.0,
        );
        (self.position - half, self.position + half)
    }
}

/// Horizontal rectangle centered at `(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub x: f32,
    pub z: f32,
    pub width: u32,
    pub depth: u32,
}

impl Footprint {
    pub fn new(x: f32, z: f32, width: u32, depth: u32) -> Self {
        Self { x, z, width, depth }
    }

    /// Continuous center-distance overlap, used for stacking.
    ///
    /// Two footprints overlap when, on both axes, their centers are closer
    /// than the sum of their half-extents.
    pub fn overlaps_continuous(&self, other: &Footprint) -> bool {
        (self.x - other.x).abs() < (self.width as f32 + other.width as f32) / 2.0
            && (self.z - other.z).abs() < (self.depth as f32 + other.depth as f32) / 2.0
    }

    /// Integer cell-extent overlap, used for placement legality.
    ///
    /// Extents are widened to whole cells with floor/ceil before the
    /// interval test.
    pub fn overlaps_cells(&self, other: &Footprint) -> bool {
        let (left, right) = cell_extent(self.x, self.width);
        let (top, bottom) = cell_extent(self.z, self.depth);
        let (other_left, other_right) = cell_extent(other.x, other.width);
        let (other_top, other_bottom) = cell_extent(other.z, other.depth);

        left < other_right && right > other_left && top < other_bottom && bottom > other_top
    }
}

/// Ordered list of bricks. Order is creation order; indices identify bricks
/// for erasing and highlighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Construction {
    blocks: Vec<Block>,
}

impl Construction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// New construction with `block` appended.
    pub fn with_block(&self, block: Block) -> Self {
        let mut blocks = self.blocks.clone();
        blocks.push(block);
        Self { blocks }
    }

    /// New construction without the brick at `index`, or `None` if out of range.
    pub fn without_block(&self, index: usize) -> Option<Self> {
        if index >= self.blocks.len() {
            return None;
        }
        let mut blocks = self.blocks.clone();
        blocks.remove(index);
        Some(Self { blocks })
    }

    /// New construction with the brick at `index` moved to `position`, or
    /// `None` if out of range.
    pub fn with_position(&self, index: usize, position: Vec3) -> Option<Self> {
        let mut blocks = self.blocks.clone();
        blocks.get_mut(index)?.position = position;
        Some(Self { blocks })
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl From<Vec<Block>> for Construction {
    fn from(blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }
}
