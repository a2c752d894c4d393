//! Scene and window configuration.
//!
//! The built-in [`GameConfig::default`] is the farm scene: a player, three
//! enemies, three animals and one chest. Other scenes are plain JSON files
//! with the same shape; missing fields fall back to the defaults.

use crate::error::ConfigError;
use crate::entity::SheetId;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window title.
    pub title: String,
    /// Initial physical window width.
    pub window_width: i32,
    /// Initial physical window height.
    pub window_height: i32,
    /// Fixed logical resolution width.
    pub logical_width: u32,
    /// Fixed logical resolution height.
    pub logical_height: u32,
    /// Background RGBA.
    pub background: [u8; 4],
    /// Directory all asset paths below are relative to.
    pub asset_root: PathBuf,
    /// Map JSON.
    pub map: PathBuf,
    /// Tileset atlas image.
    pub tileset: PathBuf,
    /// Atlas tile edge in pixels.
    pub tile_size: u32,
    /// Edge of the square frame drawn for every sprite.
    pub sprite_size: f32,
    /// Player movement per frame per pressed direction.
    pub player_step: f32,
    /// Chaser movement per frame per axis.
    pub chase_step: f32,
    /// The player.
    pub player: PlayerSpec,
    /// Enemies, drawn in this order.
    pub enemies: Vec<ChaserSpec>,
    /// Animals, drawn in this order.
    pub animals: Vec<ChaserSpec>,
    /// Items, drawn in this order.
    pub items: Vec<ItemSpec>,
}

/// Player start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerSpec {
    /// Sprite image.
    pub image: PathBuf,
    /// Start x.
    pub x: f32,
    /// Start y.
    pub y: f32,
    /// Starting health.
    #[serde(default = "default_health")]
    pub health: u32,
}

/// Enemy or animal start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChaserSpec {
    /// Sprite image.
    pub image: PathBuf,
    /// Start x.
    pub x: f32,
    /// Start y.
    pub y: f32,
    /// Follow the player.
    #[serde(default)]
    pub chase: bool,
}

/// Item placement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSpec {
    /// Sprite image.
    pub image: PathBuf,
    /// Position x.
    pub x: f32,
    /// Position y.
    pub y: f32,
    /// Health added on pickup.
    #[serde(default = "default_potion")]
    pub potion: u32,
}

fn default_health() -> u32 {
    100
}
fn default_potion() -> u32 {
    1
}

fn chaser(image: &str, x: f32, y: f32) -> ChaserSpec {
    ChaserSpec {
        image: image.into(),
        x,
        y,
        chase: false,
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "JoGo".into(),
            window_width: 640,
            window_height: 480,
            logical_width: 320,
            logical_height: 240,
            background: [50, 135, 45, 255],
            asset_root: "assets".into(),
            map: "mapas/mapa.json".into(),
            tileset: "ladrilhos/gramas.png".into(),
            tile_size: 16,
            sprite_size: 32.0,
            player_step: 2.0,
            chase_step: 1.0,
            player: PlayerSpec {
                image: "jogador/jogador.png".into(),
                x: 100.0,
                y: 100.0,
                health: default_health(),
            },
            enemies: vec![
                chaser("inimigos/esqueleto.png", 200.0, 120.0),
                chaser("inimigos/slime.png", 190.0, 30.0),
                chaser("inimigos/gosma.png", 220.0, 180.0),
            ],
            animals: vec![
                chaser("animais/galinha/galinha.png", 130.0, 170.0),
                chaser("animais/vaca/vaca.png", 50.0, 120.0),
                chaser("animais/porco/porco.png", 10.0, 190.0),
            ],
            items: vec![ItemSpec {
                image: "decoracao/bau.png".into(),
                x: 200.0,
                y: 100.0,
                potion: default_potion(),
            }],
        }
    }
}

impl GameConfig {
    /// Parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: GameConfig = serde_json::from_str(&txt).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the renderer or update loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::Invalid("tile_size must be positive".into()));
        }
        if self.logical_width == 0 || self.logical_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "logical size must be positive, got {}x{}",
                self.logical_width, self.logical_height
            )));
        }
        if !(self.sprite_size.is_finite() && self.sprite_size > 0.0) {
            return Err(ConfigError::Invalid("sprite_size must be positive".into()));
        }
        for (name, step) in [("player_step", self.player_step), ("chase_step", self.chase_step)] {
            if !(step.is_finite() && step > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {step}"
                )));
            }
        }
        Ok(())
    }

    /// `path` joined onto the asset root.
    pub fn asset_path(&self, path: &Path) -> PathBuf {
        self.asset_root.join(path)
    }

    /// Every sprite image in scene order: player, enemies, animals, items.
    pub fn sprite_images(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.player.image.as_path())
            .chain(self.enemies.iter().map(|e| e.image.as_path()))
            .chain(self.animals.iter().map(|a| a.image.as_path()))
            .chain(self.items.iter().map(|i| i.image.as_path()))
    }
}

/// Distinct sprite images, each assigned one [`SheetId`].
#[derive(Debug, Default)]
pub struct AssetCatalog {
    paths: Vec<PathBuf>,
    ids: HashMap<PathBuf, SheetId>,
}

impl AssetCatalog {
    /// Catalog of every sprite image referenced by `cfg`, in first-use order.
    pub fn from_config(cfg: &GameConfig) -> Self {
        let mut catalog = Self::default();
        for image in cfg.sprite_images() {
            catalog.intern(image);
        }
        catalog
    }

    fn intern(&mut self, path: &Path) -> SheetId {
        if let Some(id) = self.ids.get(path) {
            return *id;
        }
        let id = SheetId(u32::try_from(self.paths.len()).unwrap_or(u32::MAX));
        self.paths.push(path.to_path_buf());
        self.ids.insert(path.to_path_buf(), id);
        id
    }

    /// Sheet for an image path, if cataloged.
    pub fn id(&self, path: &Path) -> Option<SheetId> {
        self.ids.get(path).copied()
    }

    /// Paths indexed by `SheetId`.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of distinct sheets.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` if nothing is cataloged.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_matches_farm_layout() {
        let cfg = GameConfig::default();
        assert_eq!((cfg.logical_width, cfg.logical_height), (320, 240));
        assert_eq!(cfg.player_step, 2.0);
        assert_eq!(cfg.enemies.len(), 3);
        assert_eq!(cfg.animals.len(), 3);
        assert_eq!(cfg.items[0].potion, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: GameConfig = serde_json::from_str(
            r#"{
              "title": "Cave",
              "enemies": [{"image":"bat.png","x":1,"y":2,"chase":true}],
              "items": [{"image":"gem.png","x":4,"y":4}]
            }"#,
        )
        .expect("parse");

        assert_eq!(cfg.title, "Cave");
        assert_eq!(cfg.tile_size, 16);
        assert!(cfg.enemies[0].chase);
        assert_eq!(cfg.items[0].potion, 1);
        assert_eq!(cfg.animals.len(), 3);
    }

    #[test]
    fn validate_rejects_zero_tile_size() {
        let cfg = GameConfig {
            tile_size: 0,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_non_positive_steps() {
        for (player_step, chase_step) in [(2.0, -1.0), (-2.0, 1.0), (0.0, 1.0), (2.0, f32::NAN)] {
            let cfg = GameConfig {
                player_step,
                chase_step,
                ..GameConfig::default()
            };
            assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn load_rejects_negative_steps() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{"chase_step":-1.0,"player_step":-2.0}"#).expect("write");

        let err = GameConfig::load(&path).err().expect("expected invalid config");
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("step")));
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("game.json");
        std::fs::write(&path, "{ nope").expect("write");

        let err = GameConfig::load(&path).err().expect("expected json error");
        assert!(matches!(err, ConfigError::Json { path: p, .. } if p == path));
    }

    #[test]
    fn catalog_ids_stay_distinct_past_u16() {
        let mut catalog = AssetCatalog::default();
        let ids: Vec<SheetId> = (0..70_000)
            .map(|n| catalog.intern(Path::new(&format!("sheet_{n}.png"))))
            .collect();

        assert_eq!(ids[69_999], SheetId(69_999));
        assert_ne!(ids[65_536], ids[0]);
        assert_eq!(catalog.id(Path::new("sheet_65536.png")), Some(SheetId(65_536)));
    }

    #[test]
    fn catalog_shares_sheets_between_sprites() {
        let mut cfg = GameConfig::default();
        cfg.animals[2].image = cfg.animals[0].image.clone();

        let catalog = AssetCatalog::from_config(&cfg);
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.id(&cfg.player.image), Some(SheetId(0)));
        assert_eq!(
            catalog.id(&cfg.animals[0].image),
            catalog.id(&cfg.animals[2].image)
        );
        assert_eq!(catalog.id(Path::new("nope.png")), None);
    }
}
