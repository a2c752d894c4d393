//! Image decoding and texture upload.

use crate::atlas::Atlas;
use crate::config::{AssetCatalog, GameConfig};
use crate::entity::SheetId;
use crate::error::AssetError;
use macroquad::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Decodes an image file into an RGBA pixel buffer.
pub async fn load_image_file(path: &Path) -> Result<Image, AssetError> {
    let image = load_image(&path.to_string_lossy())
        .await
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "image_decoded"
    );
    Ok(image)
}

/// GPU textures for every sheet, indexed by [`SheetId`].
pub struct SpriteSheets {
    textures: Vec<Texture2D>,
}

impl SpriteSheets {
    /// Uploads each cataloged sprite image, then the tileset.
    ///
    /// Returns the sheets, the tileset's id and its atlas grid.
    pub async fn load(
        cfg: &GameConfig,
        catalog: &AssetCatalog,
    ) -> Result<(Self, SheetId, Atlas), AssetError> {
        let mut textures = Vec::with_capacity(catalog.len() + 1);
        for rel in catalog.paths() {
            let image = load_image_file(&cfg.asset_path(rel)).await?;
            textures.push(upload(&image));
        }

        let tileset_path = cfg.asset_path(&cfg.tileset);
        let image = load_image_file(&tileset_path).await?;
        let atlas = Atlas::from_image_size(image.width as u32, image.height as u32, cfg.tile_size);
        if atlas.capacity() == 0 {
            return Err(AssetError::AtlasTooSmall {
                path: tileset_path,
                width: image.width as u32,
                height: image.height as u32,
                tile_size: cfg.tile_size,
            });
        }
        let tileset = SheetId(u32::try_from(textures.len()).unwrap_or(u32::MAX));
        textures.push(upload(&image));

        info!(
            sheets = textures.len(),
            atlas_columns = atlas.columns,
            atlas_rows = atlas.rows,
            "sprite_sheets_loaded"
        );
        Ok((Self { textures }, tileset, atlas))
    }

    /// Texture for `id`.
    pub fn get(&self, id: SheetId) -> Option<&Texture2D> {
        self.textures.get(id.0 as usize)
    }
}

fn upload(image: &Image) -> Texture2D {
    let tex = Texture2D::from_image(image);
    tex.set_filter(FilterMode::Nearest);
    tex
}
