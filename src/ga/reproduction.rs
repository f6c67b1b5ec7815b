//! Offspring production: selection, crossover, mutation, scoring.

use super::config::RunConfig;
use super::operators::{flip_mirrors, mutate_tiles, segment_crossover};
use super::problem::MosaicProblem;
use super::selection::Tournament;
use super::types::{Chromosome, Population, Specimen};
use crate::error::{MosaicError, Result};
use crate::tiles::TileSource;
use rand::Rng;
use tracing::trace;

/// Produces pairs of children from a parent population.
///
/// Each call selects two distinct parents by tournament, recombines them
/// with probability `crossover_percent`, mutates each child independently
/// with probability `mutation_percent`, and finally renders and scores both.
pub struct Reproduction<'a, T: TileSource> {
    problem: &'a MosaicProblem<T>,
    tournament: Tournament,
    crossover_percent: u8,
    mutation_percent: u8,
    resample_limit: usize,
}

impl<'a, T: TileSource> Reproduction<'a, T> {
    /// Creates a pipeline for `problem` with `config`'s operator settings.
    pub fn new(problem: &'a MosaicProblem<T>, config: &RunConfig) -> Self {
        Self {
            problem,
            tournament: Tournament::new(config.tournament_size, config.resample_limit),
            crossover_percent: config.crossover_percent,
            mutation_percent: config.mutation_percent,
            resample_limit: config.resample_limit,
        }
    }

    /// Produces two rendered and scored children.
    pub fn reproduce<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<(Specimen, Specimen)> {
        let (c0, c1) = self.breed(population, rng)?;
        Ok((self.problem.specimen(c0)?, self.problem.specimen(c1)?))
    }

    /// Produces two children's chromosomes without rendering them.
    ///
    /// All random draws of a reproduction happen here, so rendering can be
    /// deferred (and parallelized) without touching the generator.
    pub fn breed<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        let (mother, father) = self.select_parents(population, rng)?;
        let mother = population.get(mother).chromosome();
        let father = population.get(father).chromosome();

        let crossed = roll(self.crossover_percent, rng);
        let (mut c0, mut c1) = if crossed {
            segment_crossover(mother, father, rng)
        } else {
            (mother.clone(), father.clone())
        };

        let m0 = self.maybe_mutate(&mut c0, rng);
        let m1 = self.maybe_mutate(&mut c1, rng);
        trace!(crossed, mutated = ?(m0, m1), "bred pair");

        Ok((c0, c1))
    }

    /// Picks mother and father indices, redrawing the father until it
    /// differs from the mother.
    pub fn select_parents<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<(usize, usize)> {
        let mode = self.problem.fitness_mode();
        let mother = self.tournament.select(population, mode, rng)?;
        for _ in 0..self.resample_limit {
            let father = self.tournament.select(population, mode, rng)?;
            if father != mother {
                return Ok((mother, father));
            }
        }
        Err(MosaicError::ResampleLimit {
            what: "father selection",
            limit: self.resample_limit,
        })
    }

    fn maybe_mutate<R: Rng>(&self, child: &mut Chromosome, rng: &mut R) -> bool {
        if !roll(self.mutation_percent, rng) {
            return false;
        }
        mutate_tiles(child, self.problem.tile_count(), rng);
        if self.problem.mirroring() {
            flip_mirrors(child, rng);
        }
        true
    }
}

/// Bernoulli trial with a percentage probability.
fn roll<R: Rng>(percent: u8, rng: &mut R) -> bool {
    rng.random_range(0..100u8) < percent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tiles::TileSet;
    use image::{Rgb, RgbImage};

    /// 20 x 10 grid (200 cells) of 1x1 tiles, 6 tile colors.
    fn problem(config: &RunConfig) -> MosaicProblem {
        let tiles = TileSet::from_images(
            (0..6u8)
                .map(|i| RgbImage::from_pixel(1, 1, Rgb([i * 40, 0, 255 - i * 40])))
                .collect(),
        )
        .unwrap();
        let source = RgbImage::from_fn(20, 10, |x, y| Rgb([(x * 12) as u8, (y * 25) as u8, 0]));
        MosaicProblem::new(source, tiles, config).unwrap()
    }

    fn config() -> RunConfig {
        RunConfig::default()
            .with_grid(20, 10)
            .with_population_size(8)
            .with_tournament_size(3)
    }

    fn population(problem: &MosaicProblem, n: usize, seed: u64) -> Population {
        let mut rng = create_rng(seed);
        Population::new(
            (0..n)
                .map(|_| problem.specimen(problem.random_chromosome(&mut rng)).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_parents_distinct() {
        let config = config();
        let problem = problem(&config);
        let pop = population(&problem, 8, 1);
        let repro = Reproduction::new(&problem, &config);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let (m, f) = repro.select_parents(&pop, &mut rng).unwrap();
            assert_ne!(m, f);
        }
    }

    #[test]
    fn test_no_crossover_no_mutation_copies_parents() {
        let config = config().with_crossover_percent(0).with_mutation_percent(0);
        let problem = problem(&config);
        let pop = population(&problem, 8, 2);
        let repro = Reproduction::new(&problem, &config);

        for seed in 0..50 {
            let mut a = create_rng(seed);
            let mut b = create_rng(seed);
            let (m, f) = repro.select_parents(&pop, &mut a).unwrap();
            let (c0, c1) = repro.breed(&pop, &mut b).unwrap();
            assert_eq!(&c0, pop.get(m).chromosome());
            assert_eq!(&c1, pop.get(f).chromosome());
        }
    }

    #[test]
    fn test_mutation_without_crossover_stays_near_parents() {
        let config = config().with_crossover_percent(0).with_mutation_percent(100);
        let problem = problem(&config);
        let pop = population(&problem, 8, 3);
        let repro = Reproduction::new(&problem, &config);
        let limit = problem.cells() / 100;

        let diff = |a: &Chromosome, b: &Chromosome| {
            let tiles = a.tiles().iter().zip(b.tiles()).filter(|(x, y)| x != y).count();
            let mirror = a.mirror().iter().zip(b.mirror()).filter(|(x, y)| x != y).count();
            (tiles, mirror)
        };

        let mut changed = 0;
        for seed in 0..50 {
            let mut a = create_rng(seed);
            let mut b = create_rng(seed);
            let (m, f) = repro.select_parents(&pop, &mut a).unwrap();
            let (c0, c1) = repro.breed(&pop, &mut b).unwrap();
            let pairs = [(&c0, pop.get(m).chromosome()), (&c1, pop.get(f).chromosome())];
            for (child, parent) in pairs {
                let (tiles, mirror) = diff(child, parent);
                assert!(tiles <= limit, "{tiles} tile cells changed");
                assert!(mirror <= limit, "{mirror} mirror cells changed");
                if child != parent {
                    changed += 1;
                }
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_crossover_children_complementary() {
        let config = config().with_crossover_percent(100).with_mutation_percent(0);
        let problem = problem(&config);
        let pop = population(&problem, 8, 3);
        let repro = Reproduction::new(&problem, &config);

        for seed in 0..50 {
            let mut a = create_rng(seed);
            let mut b = create_rng(seed);
            let (m, f) = repro.select_parents(&pop, &mut a).unwrap();
            let (c0, c1) = repro.breed(&pop, &mut b).unwrap();
            let mother = pop.get(m).chromosome();
            let father = pop.get(f).chromosome();
            for i in 0..mother.len() {
                let genes = |c: &Chromosome| (c.tiles()[i], c.mirror()[i]);
                let pair = (genes(&c0), genes(&c1));
                assert!(
                    pair == (genes(mother), genes(father))
                        || pair == (genes(father), genes(mother)),
                    "cell {i} not inherited as a complementary pair"
                );
            }
        }
    }

    #[test]
    fn test_full_mutation_keeps_invariants() {
        let config = config().with_mutation_percent(100);
        let problem = problem(&config);
        let pop = population(&problem, 8, 4);
        let repro = Reproduction::new(&problem, &config);
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let (c0, c1) = repro.reproduce(&pop, &mut rng).unwrap();
            for child in [&c0, &c1] {
                assert_eq!(child.chromosome().len(), 200);
                assert!(child.chromosome().is_valid(6));
                assert_eq!(child.mosaic().dimensions(), (20, 10));
            }
        }
    }

    #[test]
    fn test_mutation_without_mirroring_leaves_flags() {
        let config = config()
            .with_mirroring(false)
            .with_crossover_percent(0)
            .with_mutation_percent(100);
        let problem = problem(&config);
        let pop = population(&problem, 8, 5);
        let repro = Reproduction::new(&problem, &config);
        let mut rng = create_rng(9);
        for _ in 0..50 {
            let (c0, c1) = repro.breed(&pop, &mut rng).unwrap();
            assert!(c0.mirror().iter().chain(c1.mirror()).all(|&m| !m));
        }
    }

    #[test]
    fn test_reproduce_scores_children() {
        let config = config();
        let problem = problem(&config);
        let pop = population(&problem, 8, 6);
        let repro = Reproduction::new(&problem, &config);
        let mut rng = create_rng(10);
        let (c0, c1) = repro.reproduce(&pop, &mut rng).unwrap();
        for child in [c0, c1] {
            let rescored = problem.specimen(child.chromosome().clone()).unwrap();
            assert_eq!(rescored.fitness(), child.fitness());
        }
    }

    #[test]
    fn test_roll_bounds() {
        let mut rng = create_rng(42);
        assert!((0..1000).all(|_| !roll(0, &mut rng)));
        assert!((0..1000).all(|_| roll(100, &mut rng)));
    }
}
