#![warn(missing_docs)]

//! Small tile-map game for Macroquad.
//!
//! A JSON map is drawn from a tileset atlas, the player walks with the arrow
//! keys, enemies and animals may chase, and items raise the player's health.
//! [`GameState::advance`] and [`render::render`] are window-free so the whole
//! frame can be driven from tests.

pub mod assets;
pub mod atlas;
pub mod config;
pub mod entity;
mod error;
pub mod game;
mod loader {
    pub mod json_loader;
}
pub mod map;
pub mod render;

pub use atlas::{lookup, Atlas};
pub use config::{AssetCatalog, GameConfig};
pub use entity::{Animal, Enemy, Item, Player, SheetId, Sprite};
pub use error::{AssetError, ConfigError, MapError};
pub use game::{FrameEvents, GameState, Input, Motion, Pickup};
pub use map::{grid_position, TileId, TileLayer, TileMap};
pub use render::{render, DrawOp, RecordingSurface, Surface};
