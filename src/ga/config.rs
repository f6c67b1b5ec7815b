//! Run configuration.
//!
//! [`RunConfig`] holds every parameter of a mosaic search. It is validated
//! once before the run and never changes afterwards.

use crate::error::{MosaicError, Result};
use crate::fitness::FitnessMode;

/// When the generational loop stops (besides reaching a perfect match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopMode {
    /// Stop as soon as two consecutive generations share the same best
    /// fitness.
    #[default]
    Convergence,

    /// Stop once the given generation index has been produced.
    GenerationCount(usize),
}

/// Configuration of a mosaic search.
///
/// # Defaults
///
/// ```
/// use u_mosaic::ga::{RunConfig, StopMode};
///
/// let config = RunConfig::default();
/// assert_eq!((config.tiles_x, config.tiles_y), (30, 30));
/// assert_eq!(config.population_size, 300);
/// assert_eq!(config.stop_mode, StopMode::Convergence);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mosaic::ga::{RunConfig, StopMode};
///
/// let config = RunConfig::default()
///     .with_grid(20, 15)
///     .with_population_size(100)
///     .with_tournament_size(10)
///     .with_mutation_percent(5)
///     .with_stop_mode(StopMode::GenerationCount(200));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of tile columns.
    pub tiles_x: u32,

    /// Number of tile rows.
    pub tiles_y: u32,

    /// Specimens per generation. Must be even: children come in pairs.
    pub population_size: usize,

    /// Distinct specimens drawn per tournament, in `1..population_size`.
    pub tournament_size: usize,

    /// Chance (0–100) that a parent pair is recombined.
    pub crossover_percent: u8,

    /// Chance (0–100), per child, that the child is mutated.
    pub mutation_percent: u8,

    /// Termination policy.
    pub stop_mode: StopMode,

    /// Scoring direction.
    pub fitness_mode: FitnessMode,

    /// Whether tiles may be drawn horizontally mirrored.
    ///
    /// When disabled every mirror gene stays `false`.
    pub mirroring: bool,

    /// Render and score each generation on rayon workers.
    ///
    /// Only honored when the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Maximum draws for the resampling loops (distinct tournament entrants,
    /// father distinct from mother) before giving up with an error.
    pub resample_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tiles_x: 30,
            tiles_y: 30,
            population_size: 300,
            tournament_size: 30,
            crossover_percent: 100,
            mutation_percent: 2,
            stop_mode: StopMode::Convergence,
            fitness_mode: FitnessMode::Similarity,
            mirroring: true,
            parallel: true,
            seed: None,
            resample_limit: 10_000,
        }
    }
}

impl RunConfig {
    /// Sets the grid dimensions.
    pub fn with_grid(mut self, tiles_x: u32, tiles_y: u32) -> Self {
        self.tiles_x = tiles_x;
        self.tiles_y = tiles_y;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the tournament size to a tenth of the population (at least 1).
    pub fn auto_tournament(mut self) -> Self {
        self.tournament_size = (self.population_size / 10).max(1);
        self
    }

    /// Sets the crossover probability in percent (clamped to 100).
    pub fn with_crossover_percent(mut self, percent: u8) -> Self {
        self.crossover_percent = percent.min(100);
        self
    }

    /// Sets the mutation probability in percent (clamped to 100).
    pub fn with_mutation_percent(mut self, percent: u8) -> Self {
        self.mutation_percent = percent.min(100);
        self
    }

    /// Sets the termination policy.
    pub fn with_stop_mode(mut self, mode: StopMode) -> Self {
        self.stop_mode = mode;
        self
    }

    /// Sets the scoring direction.
    pub fn with_fitness_mode(mut self, mode: FitnessMode) -> Self {
        self.fitness_mode = mode;
        self
    }

    /// Enables or disables the mirror gene.
    pub fn with_mirroring(mut self, mirroring: bool) -> Self {
        self.mirroring = mirroring;
        self
    }

    /// Enables or disables parallel rendering and scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the draw cap of the resampling loops.
    pub fn with_resample_limit(mut self, limit: usize) -> Self {
        self.resample_limit = limit;
        self
    }

    /// Number of grid cells, i.e. the chromosome length.
    pub fn cells(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    /// Preset for previews: small population, capped at 50 generations.
    pub fn quick() -> Self {
        Self {
            population_size: 50,
            tournament_size: 5,
            stop_mode: StopMode::GenerationCount(50),
            ..Self::default()
        }
    }

    /// Preset for final renders: large population, capped at 1000
    /// generations.
    pub fn thorough() -> Self {
        Self {
            population_size: 500,
            tournament_size: 50,
            mutation_percent: 5,
            stop_mode: StopMode::GenerationCount(1000),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(MosaicError::InvalidConfig(msg.into()));

        if self.tiles_x == 0 || self.tiles_y == 0 {
            return invalid("tiles_x and tiles_y must be positive");
        }
        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if !self.population_size.is_multiple_of(2) {
            return invalid("population_size must be even");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.tournament_size >= self.population_size {
            return invalid("tournament_size must be smaller than population_size");
        }
        if self.crossover_percent > 100 {
            return invalid("crossover_percent must be at most 100");
        }
        if self.mutation_percent > 100 {
            return invalid("mutation_percent must be at most 100");
        }
        if self.stop_mode == StopMode::GenerationCount(0) {
            return invalid("generation cap must be at least 1");
        }
        if self.resample_limit == 0 {
            return invalid("resample_limit must be at least 1");
        }
        Ok(())
    }
}
