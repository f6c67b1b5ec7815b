//! Small end-to-end scenarios on a 2x2 grid.

use image::{Rgb, RgbImage};
use u_mosaic::ga::{
    EvolutionRunner, MosaicProblem, Population, Reproduction, RunConfig, StopMode, Termination,
};
use u_mosaic::random::create_rng;
use u_mosaic::tiles::{TileSet, TileSource};

const MAX_FITNESS: u64 = 2 * 2 * 10 * 10 * 3 * 255;

fn tiles() -> TileSet {
    TileSet::from_images(
        [10u8, 60, 120, 200, 250]
            .iter()
            .map(|&v| RgbImage::from_pixel(10, 10, Rgb([v, v / 2, 255 - v])))
            .collect(),
    )
    .unwrap()
}

fn config() -> RunConfig {
    RunConfig::default()
        .with_grid(2, 2)
        .with_population_size(4)
        .with_tournament_size(2)
        .with_crossover_percent(100)
        .with_mutation_percent(0)
        .with_parallel(false)
        .with_seed(2024)
}

fn white() -> RgbImage {
    RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]))
}

#[test]
fn initial_generation_and_one_round() {
    let config = config();
    let problem = MosaicProblem::new(white(), tiles(), &config).unwrap();
    assert_eq!(problem.optimum(), MAX_FITNESS);

    let mut rng = create_rng(1);
    let initial = Population::new(
        (0..config.population_size)
            .map(|_| problem.specimen(problem.random_chromosome(&mut rng)).unwrap())
            .collect(),
    );
    for s in initial.specimens() {
        assert!(s.fitness() <= MAX_FITNESS);
        assert_eq!(s.chromosome().len(), 4);
        assert_eq!(s.mosaic().dimensions(), (20, 20));
    }

    let reproduction = Reproduction::new(&problem, &config);
    let mut children = Vec::new();
    for _ in 0..config.population_size / 2 {
        let (a, b) = reproduction.reproduce(&initial, &mut rng).unwrap();
        children.push(a);
        children.push(b);
    }
    let next = Population::new(children);

    assert_eq!(next.len(), 4);
    for s in next.specimens() {
        assert!(s.chromosome().is_valid(problem.tiles().tile_count()));
        assert!(s.chromosome().tiles().iter().all(|&t| t < 5));
        assert!(s.fitness() <= MAX_FITNESS);
    }
}

#[test]
fn capped_run_terminates_within_cap() {
    for cap in [1usize, 2, 7] {
        let config = config().with_stop_mode(StopMode::GenerationCount(cap));
        let problem = MosaicProblem::new(white(), tiles(), &config).unwrap();
        let result = EvolutionRunner::run(&problem, &config).unwrap();

        assert!(result.generations <= cap);
        assert!(result.fitness_history.len() <= cap + 1);
        assert!(matches!(
            result.termination,
            Termination::CapReached | Termination::Optimal
        ));
        assert!(result.best.chromosome().is_valid(5));
        assert_eq!(result.initial_best.dimensions(), (20, 20));
    }
}

#[test]
fn convergence_run_stops_at_first_repeat() {
    let config = config().with_stop_mode(StopMode::Convergence);
    let problem = MosaicProblem::new(white(), tiles(), &config).unwrap();
    let result = EvolutionRunner::run(&problem, &config).unwrap();

    let h = &result.fitness_history;
    let first_repeat = h.windows(2).position(|w| w[0] == w[1]).map(|i| i + 1);
    match result.termination {
        Termination::Stagnated => assert_eq!(first_repeat, Some(h.len() - 1)),
        Termination::Optimal => assert_eq!(result.best_fitness, MAX_FITNESS),
        other => panic!("unexpected termination {other:?}"),
    }
}

#[test]
fn winning_mosaic_matches_its_chromosome() {
    let config = config().with_stop_mode(StopMode::GenerationCount(3));
    let problem = MosaicProblem::new(white(), tiles(), &config).unwrap();
    let result = EvolutionRunner::run(&problem, &config).unwrap();

    let rerendered = problem.specimen(result.best.chromosome().clone()).unwrap();
    assert_eq!(rerendered.mosaic(), result.best.mosaic());
    assert_eq!(rerendered.fitness(), result.best_fitness);
}
