//! Sprites and the entity kinds built on them.

use macroquad::prelude::*;

/// Index of a loaded sprite sheet. Sheets are shared between sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(pub u32);

/// Position plus the fixed region of a sheet it displays.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Top-left corner in logical pixels, y-down.
    pub pos: Vec2,
    sheet: SheetId,
    frame: Rect,
}

impl Sprite {
    /// Sprite at `pos` showing `frame` from `sheet`.
    pub fn new(sheet: SheetId, frame: Rect, pos: Vec2) -> Self {
        Self { pos, sheet, frame }
    }

    /// Sheet the sprite is drawn from.
    pub fn sheet(&self) -> SheetId {
        self.sheet
    }

    /// Source region inside the sheet.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Moves one `step` toward `target` on each axis independently.
    /// Axes already equal to the target stay put.
    pub fn step_toward(&mut self, target: Vec2, step: f32) {
        if self.pos.x < target.x {
            self.pos.x += step;
        } else if self.pos.x > target.x {
            self.pos.x -= step;
        }
        if self.pos.y < target.y {
            self.pos.y += step;
        } else if self.pos.y > target.y {
            self.pos.y -= step;
        }
    }
}

/// The single player-controlled sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Position and look.
    pub sprite: Sprite,
    /// Raised by item pickups, never lowered.
    pub health: u32,
}

/// Hostile sprite; follows the player while `chase` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Position and look.
    pub sprite: Sprite,
    /// Follow the player each frame.
    pub chase: bool,
}

/// Farm animal; follows the player while `chase` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    /// Position and look.
    pub sprite: Sprite,
    /// Follow the player each frame.
    pub chase: bool,
}

/// Pickup raising the player's health by `potion`.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Position and look.
    pub sprite: Sprite,
    /// Health added per pickup frame.
    pub potion: u32,
}
