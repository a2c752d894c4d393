//! Frame composition: tiles first, then the entity layers.

pub mod frontend;

use crate::entity::{SheetId, Sprite};
use crate::game::GameState;
use macroquad::prelude::*;

/// Off-screen drawing target the renderer writes into.
pub trait Surface {
    /// Clears the whole surface.
    fn fill(&mut self, color: Color);
    /// Copies `src` from `sheet` so its top-left lands on `dest`.
    fn blit(&mut self, sheet: SheetId, src: Rect, dest: Vec2);
}

/// Draws one frame of `state` onto `surface`.
///
/// Order is tile layers as listed, then player, enemies, animals and items;
/// later draws cover earlier ones.
pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.fill(state.background);

    let tile_size = state.atlas.tile_size as f32;
    for layer in &state.map.layers {
        for (id, dest) in layer.placed_tiles(tile_size) {
            if let Some(src) = state.atlas.source_rect(id) {
                surface.blit(state.tileset, src, dest);
            }
        }
    }

    draw_sprites(surface, std::iter::once(&state.player.sprite));
    draw_sprites(surface, state.enemies.iter().map(|e| &e.sprite));
    draw_sprites(surface, state.animals.iter().map(|a| &a.sprite));
    draw_sprites(surface, state.items.iter().map(|i| &i.sprite));
}

fn draw_sprites<'a, S: Surface + ?Sized>(surface: &mut S, sprites: impl Iterator<Item = &'a Sprite>) {
    for s in sprites {
        surface.blit(s.sheet(), s.frame(), s.pos);
    }
}

/// Records every draw call instead of drawing. Useful without a window.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSurface {
    /// Calls in submission order.
    pub ops: Vec<DrawOp>,
}

/// A recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// `Surface::fill`.
    Fill(Color),
    /// `Surface::blit`.
    Blit {
        /// Source sheet.
        sheet: SheetId,
        /// Source rect.
        src: Rect,
        /// Destination top-left.
        dest: Vec2,
    },
}

impl Surface for RecordingSurface {
    fn fill(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn blit(&mut self, sheet: SheetId, src: Rect, dest: Vec2) {
        self.ops.push(DrawOp::Blit { sheet, src, dest });
    }
}
