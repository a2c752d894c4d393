//! Tile id to atlas source-rect lookup.

use crate::map::TileId;
use macroquad::prelude::*;

/// Pixel offset of `id` inside an atlas `columns` tiles wide.
///
/// Returns `None` for empty ids (`<= 0`), which callers skip, and for offsets
/// that do not fit in `u32`.
#[inline]
pub fn lookup(id: TileId, tile_size: u32, columns: u32) -> Option<(u32, u32)> {
    if id.is_empty() || columns == 0 {
        return None;
    }
    let local = (id.0 - 1) as u32;
    let col = local % columns;
    let row = local / columns;
    Some((col.checked_mul(tile_size)?, row.checked_mul(tile_size)?))
}

/// Regular grid of square tiles inside one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atlas {
    /// Tile edge in pixels.
    pub tile_size: u32,
    /// Tiles per row.
    pub columns: u32,
    /// Tiles per column.
    pub rows: u32,
}

impl Atlas {
    /// Grid that fits inside an image of `width x height` pixels.
    /// Partial tiles at the right/bottom edge are ignored.
    pub fn from_image_size(width: u32, height: u32, tile_size: u32) -> Self {
        let (columns, rows) = if tile_size == 0 {
            (0, 0)
        } else {
            (width / tile_size, height / tile_size)
        };
        Self {
            tile_size,
            columns,
            rows,
        }
    }

    /// Number of addressable ids (`1..=capacity`).
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.columns * self.rows
    }

    /// Source rect for `id`, or `None` if empty or past the last tile.
    pub fn source_rect(&self, id: TileId) -> Option<Rect> {
        if id.is_empty() || id.0 as u32 > self.capacity() {
            return None;
        }
        let (sx, sy) = lookup(id, self.tile_size, self.columns)?;
        let ts = self.tile_size as f32;
        Some(Rect::new(sx as f32, sy as f32, ts, ts))
    }
}
