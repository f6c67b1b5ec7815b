//! The mosaic search problem: source image, tiles and grid.

use super::config::RunConfig;
use super::types::{Chromosome, Specimen};
use crate::compositor::Compositor;
use crate::error::{MosaicError, Result};
use crate::fitness::{FitnessEvaluator, FitnessMode};
use crate::tiles::{TileSet, TileSource};
use image::imageops;
use image::RgbImage;
use rand::Rng;

/// Everything needed to turn a chromosome into a scored [`Specimen`].
///
/// Immutable for the duration of a run and shared by reference with every
/// stage of the search.
#[derive(Debug, Clone)]
pub struct MosaicProblem<T: TileSource = TileSet> {
    tiles: T,
    compositor: Compositor,
    evaluator: FitnessEvaluator,
    mirroring: bool,
}

impl<T: TileSource> MosaicProblem<T> {
    /// Prepares a problem for `config`'s grid.
    ///
    /// The source must be at least as large as the mosaic
    /// (`tile_w * tiles_x` x `tile_h * tiles_y`); a larger source is cropped
    /// to its top-left region of that size.
    pub fn new(source: RgbImage, tiles: T, config: &RunConfig) -> Result<Self> {
        config.validate()?;
        if tiles.tile_count() == 0 {
            return Err(MosaicError::TileSet("tile set is empty".into()));
        }

        let compositor = Compositor::new(config.tiles_x, config.tiles_y);
        let (w, h) = compositor.mosaic_dimensions(tiles.tile_dimensions());
        let (sw, sh) = source.dimensions();
        if sw < w || sh < h {
            return Err(MosaicError::ImageSize {
                expected: (w, h),
                actual: (sw, sh),
            });
        }
        let source = if (sw, sh) == (w, h) {
            source
        } else {
            imageops::crop_imm(&source, 0, 0, w, h).to_image()
        };

        Ok(Self {
            tiles,
            compositor,
            evaluator: FitnessEvaluator::new(source, config.fitness_mode),
            mirroring: config.mirroring,
        })
    }

    /// The (possibly cropped) source image.
    pub fn source(&self) -> &RgbImage {
        self.evaluator.source()
    }

    /// The tile collection.
    pub fn tiles(&self) -> &T {
        &self.tiles
    }

    /// Number of available tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.tile_count()
    }

    /// Chromosome length.
    pub fn cells(&self) -> usize {
        self.compositor.cells()
    }

    /// Whether mirror genes are active.
    pub fn mirroring(&self) -> bool {
        self.mirroring
    }

    /// Scoring direction.
    pub fn fitness_mode(&self) -> FitnessMode {
        self.evaluator.mode()
    }

    /// Score of a pixel-perfect mosaic.
    pub fn optimum(&self) -> u64 {
        self.evaluator.optimum()
    }

    /// Uniformly random chromosome for this grid.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::random(self.cells(), self.tile_count(), self.mirroring, rng)
    }

    /// Renders and scores `chromosome`.
    ///
    /// Fails if the chromosome length differs from the grid or a tile index
    /// is out of range.
    pub fn specimen(&self, chromosome: Chromosome) -> Result<Specimen> {
        if chromosome.len() != self.cells() {
            return Err(MosaicError::InvalidChromosome(format!(
                "length {} does not match {} grid cells",
                chromosome.len(),
                self.cells()
            )));
        }
        if !chromosome.is_valid(self.tile_count()) {
            return Err(MosaicError::InvalidChromosome(format!(
                "tile index out of range for {} tiles",
                self.tile_count()
            )));
        }
        let mosaic = self.compositor.render(&chromosome, &self.tiles);
        let fitness = self.evaluator.score(&mosaic)?;
        Ok(Specimen::new(chromosome, mosaic, fitness))
    }
}
