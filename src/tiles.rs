//! Candidate tile images.
//!
//! The engine only needs three things from a tile collection: how many tiles
//! there are, random access by index, and the (uniform) tile size. Those are
//! captured by [`TileSource`]; [`TileSet`] is the owned implementation used
//! in practice.

use crate::error::{MosaicError, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::path::Path;
use tracing::{debug, warn};

/// Read-only, random-access collection of equally sized RGB tiles.
///
/// Must be `Send + Sync` because rendering may run on rayon workers.
pub trait TileSource: Send + Sync {
    /// Number of tiles. Valid indices are `0..tile_count()`.
    fn tile_count(&self) -> usize;

    /// Returns tile `index`.
    ///
    /// # Panics
    /// May panic if `index >= tile_count()`.
    fn tile(&self, index: usize) -> &RgbImage;

    /// `(width, height)` shared by every tile.
    fn tile_dimensions(&self) -> (u32, u32);
}

/// Owned set of pre-sized tiles.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<RgbImage>,
    dimensions: (u32, u32),
}

impl TileSet {
    /// Builds a tile set from already decoded, already sized images.
    ///
    /// Fails if `tiles` is empty, if the tiles have zero area, or if they
    /// do not all share the same dimensions.
    pub fn from_images(tiles: Vec<RgbImage>) -> Result<Self> {
        let first = tiles
            .first()
            .ok_or_else(|| MosaicError::TileSet("tile set is empty".into()))?;
        let dimensions = first.dimensions();
        if dimensions.0 == 0 || dimensions.1 == 0 {
            return Err(MosaicError::TileSet("tiles must have non-zero size".into()));
        }
        if let Some((i, odd)) = tiles
            .iter()
            .enumerate()
            .find(|(_, t)| t.dimensions() != dimensions)
        {
            return Err(MosaicError::TileSet(format!(
                "tile {i} is {:?}, expected {dimensions:?}",
                odd.dimensions()
            )));
        }
        Ok(Self { tiles, dimensions })
    }

    /// Loads every `jpg`, `jpeg` and `png` file in `dir`, resized to
    /// `tile_width` x `tile_height`.
    ///
    /// Files are visited in file-name order so the tile indices are stable
    /// between runs. Files that fail to decode are skipped with a warning.
    pub fn load_dir<P: AsRef<Path>>(dir: P, tile_width: u32, tile_height: u32) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(MosaicError::TileSet("tile size must be non-zero".into()));
        }

        let mut paths: Vec<_> = std::fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_image_extension(p))
            .collect();
        paths.sort();

        let mut tiles = Vec::with_capacity(paths.len());
        for path in &paths {
            match image::open(path) {
                Ok(img) => {
                    let rgb = img.to_rgb8();
                    tiles.push(imageops::resize(
                        &rgb,
                        tile_width,
                        tile_height,
                        FilterType::Triangle,
                    ));
                }
                Err(err) => warn!(path = %path.display(), %err, "skipping unreadable tile"),
            }
        }

        debug!(
            dir = %dir.as_ref().display(),
            loaded = tiles.len(),
            candidates = paths.len(),
            "loaded tile directory"
        );
        Self::from_images(tiles)
    }
}

impl TileSource for TileSet {
    fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    fn tile(&self, index: usize) -> &RgbImage {
        &self.tiles[index]
    }

    fn tile_dimensions(&self) -> (u32, u32) {
        self.dimensions
    }
}

/// Tile size that fits a `tiles_x` x `tiles_y` grid inside `source`.
///
/// Integer division: any remainder columns/rows of the source are left
/// outside the mosaic.
pub fn tile_size_for(source: (u32, u32), tiles_x: u32, tiles_y: u32) -> Result<(u32, u32)> {
    if tiles_x == 0 || tiles_y == 0 {
        return Err(MosaicError::InvalidConfig("grid dimensions must be positive".into()));
    }
    let size = (source.0 / tiles_x, source.1 / tiles_y);
    if size.0 == 0 || size.1 == 0 {
        return Err(MosaicError::ImageSize {
            expected: (tiles_x, tiles_y),
            actual: source,
        });
    }
    Ok(size)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"))
}
