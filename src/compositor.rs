//! Chromosome rendering.
//!
//! Cell `p` of a `tiles_x` x `tiles_y` grid is laid out row-major: its
//! top-left pixel sits at `((p % tiles_x) * tile_w, (p / tiles_x) * tile_h)`.

use crate::ga::Chromosome;
use crate::tiles::TileSource;
use image::RgbImage;

const CHANNELS: usize = 3;

/// Renders chromosomes into mosaic images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compositor {
    tiles_x: u32,
    tiles_y: u32,
}

impl Compositor {
    /// Creates a compositor for a `tiles_x` x `tiles_y` grid.
    pub fn new(tiles_x: u32, tiles_y: u32) -> Self {
        Self { tiles_x, tiles_y }
    }

    /// Number of grid cells (chromosome length).
    pub fn cells(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    /// Pixel dimensions of a mosaic built from tiles of size `tile`.
    pub fn mosaic_dimensions(&self, tile: (u32, u32)) -> (u32, u32) {
        (tile.0 * self.tiles_x, tile.1 * self.tiles_y)
    }

    /// Top-left pixel of grid cell `position`.
    pub fn cell_origin(&self, position: usize, tile: (u32, u32)) -> (u32, u32) {
        let tx = self.tiles_x as usize;
        (
            (position % tx) as u32 * tile.0,
            (position / tx) as u32 * tile.1,
        )
    }

    /// Renders `chromosome` into a freshly allocated mosaic.
    ///
    /// Tiles are only read. A mirrored cell receives its tile flipped
    /// horizontally; no other cell is affected.
    ///
    /// # Panics
    /// Panics if the chromosome length differs from [`cells`](Self::cells)
    /// or references a tile outside the source.
    pub fn render<T: TileSource + ?Sized>(&self, chromosome: &Chromosome, tiles: &T) -> RgbImage {
        assert_eq!(
            chromosome.len(),
            self.cells(),
            "chromosome length must match the grid"
        );

        let tile_dims = tiles.tile_dimensions();
        let (width, height) = self.mosaic_dimensions(tile_dims);
        let mut mosaic = RgbImage::new(width, height);

        let row_bytes = tile_dims.0 as usize * CHANNELS;
        let stride = width as usize * CHANNELS;
        let buf: &mut [u8] = &mut mosaic;

        for (position, (&index, &mirrored)) in chromosome
            .tiles()
            .iter()
            .zip(chromosome.mirror())
            .enumerate()
        {
            let (x0, y0) = self.cell_origin(position, tile_dims);
            let src = tiles.tile(index).as_raw();

            for y in 0..tile_dims.1 as usize {
                let start = (y0 as usize + y) * stride + x0 as usize * CHANNELS;
                let dst = &mut buf[start..start + row_bytes];
                let src_row = &src[y * row_bytes..(y + 1) * row_bytes];
                if mirrored {
                    for (d, s) in dst
                        .chunks_exact_mut(CHANNELS)
                        .zip(src_row.chunks_exact(CHANNELS).rev())
                    {
                        d.copy_from_slice(s);
                    }
                } else {
                    dst.copy_from_slice(src_row);
                }
            }
        }

        mosaic
    }
}
