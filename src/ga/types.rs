//! Chromosome, specimen and population types.
//!
//! A [`Specimen`] can only be built by
//! [`MosaicProblem::specimen`](super::MosaicProblem::specimen), which renders
//! and scores the chromosome in one step. Its fields are private and nothing
//! hands out mutable access, so a specimen's fitness always belongs to its
//! current chromosome.

use crate::fitness::FitnessMode;
use image::RgbImage;
use rand::Rng;

/// Per-cell genes of one candidate mosaic.
///
/// Two parallel sequences of equal length: the tile index placed in each
/// grid cell and whether that tile is drawn horizontally mirrored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    tiles: Vec<usize>,
    mirror: Vec<bool>,
}

impl Chromosome {
    /// Builds a chromosome from explicit genes.
    ///
    /// # Panics
    /// Panics if the two sequences differ in length.
    pub fn from_parts(tiles: Vec<usize>, mirror: Vec<bool>) -> Self {
        assert_eq!(
            tiles.len(),
            mirror.len(),
            "tile and mirror genes must have equal length"
        );
        Self { tiles, mirror }
    }

    /// Uniformly random chromosome of length `len` over `tile_count` tiles.
    ///
    /// Mirror genes are fair coin flips when `mirroring` is set, all `false`
    /// otherwise.
    pub fn random<R: Rng>(len: usize, tile_count: usize, mirroring: bool, rng: &mut R) -> Self {
        let tiles = (0..len).map(|_| rng.random_range(0..tile_count)).collect();
        let mirror = if mirroring {
            (0..len).map(|_| rng.random_bool(0.5)).collect()
        } else {
            vec![false; len]
        };
        Self { tiles, mirror }
    }

    /// Tile index per cell.
    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    /// Mirror flag per cell.
    pub fn mirror(&self) -> &[bool] {
        &self.mirror
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` for a zero-cell chromosome.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Checks both invariants: equal gene lengths and every tile index
    /// below `tile_count`.
    pub fn is_valid(&self, tile_count: usize) -> bool {
        self.tiles.len() == self.mirror.len() && self.tiles.iter().all(|&t| t < tile_count)
    }

    /// Mutable views of both gene sequences. Slices keep the lengths fixed.
    pub(crate) fn genes_mut(&mut self) -> (&mut [usize], &mut [bool]) {
        (&mut self.tiles, &mut self.mirror)
    }
}

/// One candidate solution: chromosome, its rendered mosaic and its score.
#[derive(Debug, Clone)]
pub struct Specimen {
    chromosome: Chromosome,
    mosaic: RgbImage,
    fitness: u64,
}

impl Specimen {
    pub(crate) fn new(chromosome: Chromosome, mosaic: RgbImage, fitness: u64) -> Self {
        Self {
            chromosome,
            mosaic,
            fitness,
        }
    }

    /// The genes.
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// The mosaic rendered from [`chromosome`](Self::chromosome).
    pub fn mosaic(&self) -> &RgbImage {
        &self.mosaic
    }

    /// Score of [`mosaic`](Self::mosaic) against the source image.
    pub fn fitness(&self) -> u64 {
        self.fitness
    }
}

/// All specimens of one generation.
///
/// Order is only meaningful for index-based sampling.
#[derive(Debug, Clone)]
pub struct Population {
    specimens: Vec<Specimen>,
}

impl Population {
    /// Wraps already scored specimens.
    pub fn new(specimens: Vec<Specimen>) -> Self {
        Self { specimens }
    }

    /// Number of specimens.
    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    /// Returns `true` if there are no specimens.
    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }

    /// Specimen at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> &Specimen {
        &self.specimens[index]
    }

    /// Fitness of the specimen at `index`.
    pub fn fitness(&self, index: usize) -> u64 {
        self.specimens[index].fitness
    }

    /// All specimens in index order.
    pub fn specimens(&self) -> &[Specimen] {
        &self.specimens
    }

    /// Index of the best specimen under `mode`, lowest index on ties.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn best_index(&self, mode: FitnessMode) -> usize {
        mode.best_index(self.specimens.iter().map(Specimen::fitness))
            .expect("population must not be empty")
    }

    /// Consumes the population, returning its best specimen.
    pub fn into_best(mut self, mode: FitnessMode) -> Specimen {
        let idx = self.best_index(mode);
        self.specimens.swap_remove(idx)
    }
}
