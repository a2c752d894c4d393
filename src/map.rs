//! Layered tile grids.

use crate::error::MapError;
use crate::loader::json_loader::{decode_map_file, decode_map_str};
use macroquad::prelude::*;
use std::path::Path;
use tracing::info;

/// A 1-based atlas tile id. Zero and negative ids mark an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub i32);

impl TileId {
    /// `true` for ids that draw nothing.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 <= 0
    }
}

/// Grid cell `(col, row)` of flat index `idx` in a row-major layer.
#[inline]
pub fn grid_position(idx: usize, layer_width: usize) -> (usize, usize) {
    (idx % layer_width, idx / layer_width)
}

/// One full grid of tile ids, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// Layer name, empty when the map does not give one.
    pub name: String,
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    /// `width * height` ids.
    pub ids: Vec<TileId>,
}

impl TileLayer {
    /// Non-empty tiles as `(id, world position)` for a given tile size in pixels.
    pub fn placed_tiles(&self, tile_size: f32) -> impl Iterator<Item = (TileId, Vec2)> + '_ {
        self.ids
            .iter()
            .enumerate()
            .filter(|(_, id)| !id.is_empty())
            .map(move |(idx, id)| {
                let (col, row) = grid_position(idx, self.width);
                (*id, vec2(col as f32 * tile_size, row as f32 * tile_size))
            })
    }
}

/// Layered tile map; layers draw back-to-front in listed order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileMap {
    /// Layers in draw order.
    pub layers: Vec<TileLayer>,
}

impl TileMap {
    /// Load a map from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let map = decode_map_file(path)?;
        info!(
            path = %path.display(),
            layers = map.layers.len(),
            tiles = map.tile_count(),
            "map_loaded"
        );
        Ok(map)
    }

    /// Parse a map from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        decode_map_str(json, Path::new("<inline>"))
    }

    /// Number of non-empty cells over all layers.
    pub fn tile_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.ids.iter().filter(|id| !id.is_empty()).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn row_uses_layer_width_on_non_square_layers() {
        // 4 wide, 2 high: index 5 is the second cell of the second row.
        assert_eq!(grid_position(5, 4), (1, 1));
        assert_eq!(grid_position(3, 4), (3, 0));
        assert_eq!(grid_position(7, 4), (3, 1));
    }

    #[test]
    fn placed_tiles_skips_empty_and_scales_by_tile_size() {
        let layer = TileLayer {
            name: String::new(),
            width: 3,
            height: 2,
            ids: [1, 0, 2, -1, 0, 3].into_iter().map(TileId).collect(),
        };

        let placed: Vec<_> = layer.placed_tiles(16.0).collect();
        assert_eq!(
            placed,
            vec![
                (TileId(1), vec2(0.0, 0.0)),
                (TileId(2), vec2(32.0, 0.0)),
                (TileId(3), vec2(32.0, 16.0)),
            ]
        );
    }

    #[test]
    fn tile_count_ignores_empty_cells() {
        let map = TileMap::from_json_str(
            r#"{"layers":[
                {"data":[1,0,0,2],"width":2,"height":2},
                {"data":[0,0,0,7],"width":2,"height":2}
            ]}"#,
        )
        .expect("decode");
        assert_eq!(map.tile_count(), 3);
    }

    proptest! {
        #[test]
        fn grid_position_reconstructs_index(w in 1usize..64, h in 1usize..64, seed in any::<usize>()) {
            let idx = seed % (w * h);
            let (col, row) = grid_position(idx, w);
            prop_assert!(col < w);
            prop_assert!(row < h);
            prop_assert_eq!(row * w + col, idx);
        }
    }
}
