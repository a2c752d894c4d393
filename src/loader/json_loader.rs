// src/loader/json_loader.rs
use crate::error::MapError;
use crate::map::{TileId, TileLayer, TileMap};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    name: String,
    data: Vec<i32>,
    width: usize,
    height: usize,
}

#[derive(Deserialize)]
struct JsonMap {
    layers: Vec<JsonLayer>,
}

fn layer_from_json(idx: usize, l: JsonLayer) -> Result<TileLayer, MapError> {
    if l.width == 0 || l.height == 0 {
        return Err(MapError::InvalidMap(format!(
            "layer {idx} has zero size ({}x{})",
            l.width, l.height
        )));
    }

    let expected = l.width.checked_mul(l.height).ok_or_else(|| {
        MapError::InvalidMap(format!(
            "layer {idx} dimensions overflow ({}x{})",
            l.width, l.height
        ))
    })?;
    if l.data.len() != expected {
        return Err(MapError::LayerSize {
            layer: idx,
            expected,
            actual: l.data.len(),
        });
    }

    Ok(TileLayer {
        name: l.name,
        width: l.width,
        height: l.height,
        ids: l.data.into_iter().map(TileId).collect(),
    })
}

/// Decodes map JSON that has already been read. `origin` only labels errors.
pub fn decode_map_str(txt: &str, origin: &Path) -> Result<TileMap, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: origin.to_path_buf(),
        source,
    })?;

    let layers = j
        .layers
        .into_iter()
        .enumerate()
        .map(|(idx, l)| layer_from_json(idx, l))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TileMap { layers })
}

pub fn decode_map_file(path: &Path) -> Result<TileMap, MapError> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::UnsupportedFormat(path.display().to_string()));
    }

    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: PathBuf::from(path),
        source,
    })?;

    decode_map_str(&txt, path)
}
