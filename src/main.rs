use anyhow::Context;
use macroquad::prelude::*;
use std::path::PathBuf;
use tilewalk::assets::SpriteSheets;
use tilewalk::render::frontend::{MacroquadSurface, Presenter};
use tilewalk::{render, AssetCatalog, GameConfig, GameState, Input, TileMap};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV_VAR: &str = "TILEWALK_CONFIG";

fn config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)
}

// Window setup runs before the async main, so the config is read twice.
// Errors are reported once `run` reads it again.
fn window_conf() -> Conf {
    let cfg = config_path()
        .and_then(|p| GameConfig::load(p).ok())
        .unwrap_or_default();
    Conf {
        window_title: cfg.title,
        window_width: cfg.window_width,
        window_height: cfg.window_height,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cfg = match config_path() {
        Some(path) => {
            info!(path = %path.display(), "config_loading");
            GameConfig::load(&path).with_context(|| format!("Loading config {}", path.display()))?
        }
        None => {
            info!("config_default");
            GameConfig::default()
        }
    };

    let map_path = cfg.asset_path(&cfg.map);
    let map = TileMap::load(&map_path)
        .with_context(|| format!("Loading map {}", map_path.display()))?;

    let catalog = AssetCatalog::from_config(&cfg);
    let (sheets, tileset, atlas) = SpriteSheets::load(&cfg, &catalog)
        .await
        .context("Loading sprite sheets")?;

    let mut state = GameState::from_config(&cfg, map, atlas, tileset, &catalog)
        .context("Building scene")?;
    let presenter = Presenter::new(cfg.logical_width, cfg.logical_height);

    info!(
        enemies = state.enemies.len(),
        animals = state.animals.len(),
        items = state.items.len(),
        "game_started"
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!(reason = "escape_key", "shutdown_requested");
            break;
        }

        state.advance(Input::from_keyboard());

        presenter.begin();
        render(&state, &mut MacroquadSurface::new(&sheets));
        presenter.present();

        next_frame().await;
    }

    info!(health = state.player.health, "shutdown");
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!("startup_failed: {err:#}");
        std::process::exit(1);
    }
}
