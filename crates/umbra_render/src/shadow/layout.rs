//! Atlas Layout
//!
//! Grid arithmetic for packing (light, cascade) tiles into the square
//! shadow atlas. With at most 4 lights of 4 cascades the grid is always
//! 1, 2, or 4 columns wide, so tile sizes stay powers of two.

use serde::{Deserialize, Serialize};

use crate::resource::Viewport;

/// Tile grid for one frame's shadow atlas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasLayout {
    atlas_size: u32,
    tiles: u32,
    columns: u32,
    tile_size: u32,
}

impl AtlasLayout {
    /// Compute the grid for `reserved_count` lights of `cascade_count`
    /// cascades each
    pub fn new(reserved_count: u32, cascade_count: u32, atlas_size: u32) -> Self {
        let tiles = reserved_count * cascade_count;
        let columns = if tiles <= 1 {
            1
        } else if tiles <= 4 {
            2
        } else {
            4
        };

        Self {
            atlas_size,
            tiles,
            columns,
            tile_size: atlas_size / columns,
        }
    }

    /// Total (light, cascade) tiles to render
    pub fn tiles(&self) -> u32 {
        self.tiles
    }

    /// Tiles per row
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Edge length of one tile in pixels
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Atlas edge length in pixels
    pub fn atlas_size(&self) -> u32 {
        self.atlas_size
    }

    /// Grid position (column, row) of a tile
    pub fn tile_offset(&self, tile_index: u32) -> [u32; 2] {
        [tile_index % self.columns, tile_index / self.columns]
    }

    /// Pixel viewport of a tile
    pub fn tile_viewport(&self, tile_index: u32) -> Viewport {
        let [col, row] = self.tile_offset(tile_index);
        Viewport::square(col * self.tile_size, row * self.tile_size, self.tile_size)
    }
}
