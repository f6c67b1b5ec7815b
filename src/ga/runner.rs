//! Generational loop.
//!
//! [`EvolutionRunner`] drives the search:
//! initialization → scoring → (selection → crossover → mutation → scoring)*
//!
//! Replacement is strictly generational: every generation consists of
//! `population_size` freshly bred children and the previous population is
//! dropped as a whole. No specimen survives into the next generation.

use super::config::{RunConfig, StopMode};
use super::problem::MosaicProblem;
use super::reproduction::Reproduction;
use super::types::{Chromosome, Population, Specimen};
use crate::error::{MosaicError, Result};
use crate::random::rng_from;
use crate::tiles::TileSource;
use image::RgbImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// A specimen matched the source pixel for pixel.
    Optimal,

    /// The configured generation cap was reached.
    CapReached,

    /// Two consecutive generations had the same best fitness.
    Stagnated,

    /// The cancellation flag was raised.
    Cancelled,
}

/// Progress snapshot passed to the observer after every generation,
/// generation 0 included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generation index (0 = initial random population).
    pub generation: usize,

    /// Best fitness in this generation.
    pub best_fitness: u64,

    /// Index of the best specimen (lowest index on ties).
    pub best_index: usize,
}

/// Result of a mosaic search.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best specimen of the final generation.
    pub best: Specimen,

    /// Same as `best.fitness()`.
    pub best_fitness: u64,

    /// Why the run stopped.
    pub termination: Termination,

    /// Index of the final generation.
    pub generations: usize,

    /// Best mosaic of generation 0, for before/after comparison.
    pub initial_best: RgbImage,

    /// Best fitness of each generation, starting with generation 0.
    pub fitness_history: Vec<u64>,
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MosaicProblem::new(source, tiles, &config)?;
/// let result = EvolutionRunner::run(&problem, &config)?;
/// result.best.mosaic().save("mosaic.png")?;
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the search to completion.
    pub fn run<T: TileSource>(
        problem: &MosaicProblem<T>,
        config: &RunConfig,
    ) -> Result<EvolutionResult> {
        Self::run_with(problem, config, |_| {}, None)
    }

    /// Runs the search, reporting each generation to `observer`.
    ///
    /// If `cancel` is `Some` and the flag is set, the run stops before
    /// breeding the next generation and returns the current one's best.
    ///
    /// `config` must describe the same grid and fitness mode that `problem`
    /// was built with.
    pub fn run_with<T, F>(
        problem: &MosaicProblem<T>,
        config: &RunConfig,
        mut observer: F,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult>
    where
        T: TileSource,
        F: FnMut(&GenerationReport),
    {
        config.validate()?;
        if config.cells() != problem.cells()
            || config.fitness_mode != problem.fitness_mode()
            || config.mirroring != problem.mirroring()
        {
            return Err(MosaicError::InvalidConfig(
                "config grid, fitness mode or mirroring differs from the problem's".into(),
            ));
        }

        let mut rng = rng_from(config.seed);
        let mode = problem.fitness_mode();
        let optimum = problem.optimum();
        let reproduction = Reproduction::new(problem, config);

        debug!(
            cells = problem.cells(),
            tiles = problem.tile_count(),
            population = config.population_size,
            tournament = config.tournament_size,
            crossover = config.crossover_percent,
            mutation = config.mutation_percent,
            stop = ?config.stop_mode,
            "starting mosaic search"
        );

        // 1. Initial population
        let chromosomes: Vec<Chromosome> = (0..config.population_size)
            .map(|_| problem.random_chromosome(&mut rng))
            .collect();
        let mut population = build_population(problem, chromosomes, config.parallel)?;

        let mut generation = 0usize;
        let mut best_index = population.best_index(mode);
        let mut best_fitness = population.fitness(best_index);
        let mut previous_best: Option<u64> = None;
        let initial_best = population.get(best_index).mosaic().clone();

        let mut fitness_history = vec![best_fitness];
        report(&mut observer, generation, best_fitness, best_index);

        // 2. Generational loop
        let termination = loop {
            if best_fitness == optimum {
                break Termination::Optimal;
            }
            if let StopMode::GenerationCount(cap) = config.stop_mode {
                if generation >= cap {
                    break Termination::CapReached;
                }
            }
            if config.stop_mode == StopMode::Convergence && previous_best == Some(best_fitness) {
                break Termination::Stagnated;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break Termination::Cancelled;
                }
            }

            let mut children = Vec::with_capacity(config.population_size);
            for _ in 0..config.population_size / 2 {
                let (c0, c1) = reproduction.breed(&population, &mut rng)?;
                children.push(c0);
                children.push(c1);
            }
            population = build_population(problem, children, config.parallel)?;
            generation += 1;

            previous_best = Some(best_fitness);
            best_index = population.best_index(mode);
            best_fitness = population.fitness(best_index);
            fitness_history.push(best_fitness);
            report(&mut observer, generation, best_fitness, best_index);
        };

        info!(?termination, generations = generation, best_fitness, "mosaic search finished");

        let best = population.into_best(mode);
        Ok(EvolutionResult {
            best_fitness: best.fitness(),
            best,
            termination,
            generations: generation,
            initial_best,
            fitness_history,
        })
    }
}

fn report<F: FnMut(&GenerationReport)>(
    observer: &mut F,
    generation: usize,
    best_fitness: u64,
    best_index: usize,
) {
    info!(generation, best_fitness, "generation complete");
    observer(&GenerationReport {
        generation,
        best_fitness,
        best_index,
    });
}

/// Renders and scores `chromosomes` into a population, in order.
fn build_population<T: TileSource>(
    problem: &MosaicProblem<T>,
    chromosomes: Vec<Chromosome>,
    parallel: bool,
) -> Result<Population> {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        let specimens = chromosomes
            .into_par_iter()
            .map(|c| problem.specimen(c))
            .collect::<Result<Vec<_>>>()?;
        return Ok(Population::new(specimens));
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    let specimens = chromosomes
        .into_iter()
        .map(|c| problem.specimen(c))
        .collect::<Result<Vec<_>>>()?;
    Ok(Population::new(specimens))
}

// ============================================================================
// Tests
// ============================================================================
