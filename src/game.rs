//! Game state and the per-frame update pass.

use crate::atlas::Atlas;
use crate::config::{AssetCatalog, GameConfig};
use crate::entity::{Animal, Enemy, Item, Player, SheetId, Sprite};
use crate::error::ConfigError;
use crate::map::TileMap;
use macroquad::prelude::*;
use std::path::Path;
use tracing::info;

/// Directional key state for one frame. Each flag applies independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    /// Left arrow held.
    pub left: bool,
    /// Right arrow held.
    pub right: bool,
    /// Up arrow held.
    pub up: bool,
    /// Down arrow held.
    pub down: bool,
}

impl Input {
    /// Arrow-key state from macroquad. Needs a live window.
    pub fn from_keyboard() -> Self {
        Self {
            left: is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::Right),
            up: is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::Down),
        }
    }
}

/// One item pickup resolved during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    /// Index into `GameState::items`.
    pub item: usize,
    /// Health added.
    pub potion: u32,
    /// Player health afterwards.
    pub health: u32,
}

/// Observable outcome of [`GameState::advance`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameEvents {
    /// Pickups in item order.
    pub pickups: Vec<Pickup>,
}

/// Per-frame tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Player pixels per frame per pressed direction.
    pub player_step: f32,
    /// Chaser pixels per frame per axis.
    pub chase_step: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            player_step: 2.0,
            chase_step: 1.0,
        }
    }
}

/// Everything the update and draw passes touch.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Loaded tile layers.
    pub map: TileMap,
    /// Grid of the tileset sheet.
    pub atlas: Atlas,
    /// Sheet holding the tiles.
    pub tileset: SheetId,
    /// Cleared to this before drawing.
    pub background: Color,
    /// Step sizes.
    pub motion: Motion,
    /// The player.
    pub player: Player,
    /// Enemies in draw order.
    pub enemies: Vec<Enemy>,
    /// Animals in draw order.
    pub animals: Vec<Animal>,
    /// Items in draw order.
    pub items: Vec<Item>,
}

impl GameState {
    /// Builds the scene described by `cfg`.
    ///
    /// `tileset` is the sheet id the frontend gave the atlas image; sprite
    /// sheets come from `catalog`.
    pub fn from_config(
        cfg: &GameConfig,
        map: TileMap,
        atlas: Atlas,
        tileset: SheetId,
        catalog: &AssetCatalog,
    ) -> Result<Self, ConfigError> {
        let frame = Rect::new(0.0, 0.0, cfg.sprite_size, cfg.sprite_size);
        let sprite = |image: &Path, x: f32, y: f32| -> Result<Sprite, ConfigError> {
            let sheet = catalog.id(image).ok_or_else(|| {
                ConfigError::Invalid(format!("image {} is not cataloged", image.display()))
            })?;
            Ok(Sprite::new(sheet, frame, vec2(x, y)))
        };

        let p = &cfg.player;
        let player = Player {
            sprite: sprite(&p.image, p.x, p.y)?,
            health: p.health,
        };
        let enemies = cfg
            .enemies
            .iter()
            .map(|e| -> Result<Enemy, ConfigError> {
                Ok(Enemy {
                    sprite: sprite(&e.image, e.x, e.y)?,
                    chase: e.chase,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let animals = cfg
            .animals
            .iter()
            .map(|a| -> Result<Animal, ConfigError> {
                Ok(Animal {
                    sprite: sprite(&a.image, a.x, a.y)?,
                    chase: a.chase,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let items = cfg
            .items
            .iter()
            .map(|i| -> Result<Item, ConfigError> {
                Ok(Item {
                    sprite: sprite(&i.image, i.x, i.y)?,
                    potion: i.potion,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [r, g, b, a] = cfg.background;
        Ok(Self {
            map,
            atlas,
            tileset,
            background: Color::from_rgba(r, g, b, a),
            motion: Motion {
                player_step: cfg.player_step,
                chase_step: cfg.chase_step,
            },
            player,
            enemies,
            animals,
            items,
        })
    }

    /// Runs one update pass: player input, then chasers, then item pickups.
    pub fn advance(&mut self, input: Input) -> FrameEvents {
        let step = self.motion.player_step;
        let pos = &mut self.player.sprite.pos;
        if input.right {
            pos.x += step;
        }
        if input.left {
            pos.x -= step;
        }
        if input.up {
            pos.y -= step;
        }
        if input.down {
            pos.y += step;
        }

        let target = self.player.sprite.pos;
        let chase = self.motion.chase_step;
        for e in self.enemies.iter_mut().filter(|e| e.chase) {
            e.sprite.step_toward(target, chase);
        }
        for a in self.animals.iter_mut().filter(|a| a.chase) {
            a.sprite.step_toward(target, chase);
        }

        let mut events = FrameEvents::default();
        for (idx, item) in self.items.iter().enumerate() {
            // Exact compare on x only; the pickup fires every frame it holds.
            if item.sprite.pos.x == self.player.sprite.pos.x {
                self.player.health = self.player.health.saturating_add(item.potion);
                info!(item = idx, health = self.player.health, "chest_opened");
                events.pickups.push(Pickup {
                    item: idx,
                    potion: item.potion,
                    health: self.player.health,
                });
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(x: f32, y: f32) -> Sprite {
        Sprite::new(SheetId(0), Rect::new(0.0, 0.0, 32.0, 32.0), vec2(x, y))
    }

    fn state() -> GameState {
        GameState {
            map: TileMap::default(),
            atlas: Atlas::from_image_size(48, 48, 16),
            tileset: SheetId(9),
            background: BLACK,
            motion: Motion::default(),
            player: Player {
                sprite: sprite(100.0, 100.0),
                health: 100,
            },
            enemies: Vec::new(),
            animals: Vec::new(),
            items: Vec::new(),
        }
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut s = state();
        s.advance(Input {
            left: true,
            right: true,
            up: true,
            down: true,
        });
        assert_eq!(s.player.sprite.pos, vec2(100.0, 100.0));
    }

    #[test]
    fn diagonal_input_moves_both_axes() {
        let mut s = state();
        s.advance(Input {
            right: true,
            up: true,
            ..Input::default()
        });
        assert_eq!(s.player.sprite.pos, vec2(102.0, 98.0));
    }

    #[test]
    fn only_chase_enabled_entities_move() {
        let mut s = state();
        s.enemies = vec![
            Enemy {
                sprite: sprite(110.0, 90.0),
                chase: true,
            },
            Enemy {
                sprite: sprite(50.0, 50.0),
                chase: false,
            },
        ];
        s.animals = vec![Animal {
            sprite: sprite(90.0, 100.0),
            chase: true,
        }];

        s.advance(Input::default());
        assert_eq!(s.enemies[0].sprite.pos, vec2(109.0, 91.0));
        assert_eq!(s.enemies[1].sprite.pos, vec2(50.0, 50.0));
        assert_eq!(s.animals[0].sprite.pos, vec2(91.0, 100.0));
    }

    #[test]
    fn chasers_target_the_moved_player() {
        let mut s = state();
        s.enemies = vec![Enemy {
            sprite: sprite(101.0, 100.0),
            chase: true,
        }];
        s.advance(Input {
            right: true,
            ..Input::default()
        });
        // Player is at 102 before the chaser moves.
        assert_eq!(s.enemies[0].sprite.pos.x, 102.0);
    }

    #[test]
    fn pickup_retriggers_every_matching_frame() {
        let mut s = state();
        s.items = vec![
            Item {
                sprite: sprite(100.0, 10.0),
                potion: 5,
            },
            Item {
                sprite: sprite(140.0, 100.0),
                potion: 7,
            },
        ];

        for frame in 1..=3u32 {
            let events = s.advance(Input::default());
            assert_eq!(
                events.pickups,
                vec![Pickup {
                    item: 0,
                    potion: 5,
                    health: 100 + 5 * frame,
                }]
            );
        }
        assert_eq!(s.player.health, 115);
    }

    #[test]
    fn health_saturates_instead_of_wrapping() {
        let mut s = state();
        s.player.health = u32::MAX - 1;
        s.items = vec![Item {
            sprite: sprite(100.0, 0.0),
            potion: 10,
        }];
        s.advance(Input::default());
        assert_eq!(s.player.health, u32::MAX);
    }

    #[test]
    fn from_config_resolves_shared_sheets() {
        let mut cfg = GameConfig::default();
        cfg.enemies[1].chase = true;
        cfg.items[0].image = cfg.player.image.clone();
        let catalog = AssetCatalog::from_config(&cfg);
        let atlas = Atlas::from_image_size(48, 48, 16);

        let s = GameState::from_config(&cfg, TileMap::default(), atlas, SheetId(99), &catalog)
            .expect("build");

        assert_eq!(s.player.health, 100);
        assert_eq!(s.items[0].sprite.sheet(), s.player.sprite.sheet());
        assert!(s.enemies[1].chase);
        assert_eq!(s.animals[1].sprite.pos, vec2(50.0, 120.0));
        assert_eq!(s.enemies[0].sprite.frame(), Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(s.background, Color::from_rgba(50, 135, 45, 255));
    }

    #[test]
    fn from_config_rejects_uncataloged_images() {
        let cfg = GameConfig::default();
        let catalog = AssetCatalog::default();
        let err = GameState::from_config(
            &cfg,
            TileMap::default(),
            Atlas::from_image_size(16, 16, 16),
            SheetId(0),
            &catalog,
        )
        .err()
        .expect("expected error");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
