use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a tile map description.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map file is not JSON.
    #[error("unsupported map format: {0}")]
    UnsupportedFormat(String),
    /// File I/O error.
    #[error("failed to read map file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// JSON parse error.
    #[error("failed to parse map {path}: {source}")]
    Json {
        /// Map file, or `<inline>` for string input.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Structurally invalid map.
    #[error("invalid map: {0}")]
    InvalidMap(String),
    /// A layer's id count does not match `width * height`.
    #[error("layer {layer} has {actual} tile ids, expected {expected}")]
    LayerSize {
        /// Index of the offending layer.
        layer: usize,
        /// `width * height`.
        expected: usize,
        /// Ids actually present.
        actual: usize,
    },
}

/// Errors produced while loading image assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Image missing or undecodable.
    #[error("failed to load image {path}: {source}")]
    Image {
        /// Image path.
        path: PathBuf,
        /// Error reported by the loader.
        #[source]
        source: macroquad::Error,
    },
    /// The tileset image is smaller than a single tile.
    #[error("tileset {path} ({width}x{height}) is smaller than one {tile_size}px tile")]
    AtlasTooSmall {
        /// Tileset path.
        path: PathBuf,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Configured tile size.
        tile_size: u32,
    },
}

/// Errors produced while reading the game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// JSON parse error.
    #[error("failed to parse config {path}: {source}")]
    Json {
        /// Config path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Semantically invalid values.
    #[error("invalid config: {0}")]
    Invalid(String),
}
