//! Criterion benchmarks for u-mosaic.
//!
//! Uses synthetic gradient sources and solid-color tiles so that timings
//! reflect rendering, scoring and loop overhead only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgb, RgbImage};
use u_mosaic::ga::{EvolutionRunner, MosaicProblem, RunConfig, StopMode};
use u_mosaic::random::create_rng;
use u_mosaic::tiles::TileSet;

// ===========================================================================
// Fixtures
// ===========================================================================

fn tiles(count: u8, size: u32) -> TileSet {
    TileSet::from_images(
        (0..count)
            .map(|i| {
                let v = (u32::from(i) * 255 / u32::from(count.max(2) - 1)) as u8;
                RgbImage::from_pixel(size, size, Rgb([v, 255 - v, v / 2]))
            })
            .collect(),
    )
    .expect("fixture tiles are uniform")
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
    })
}

fn problem(grid: u32, tile: u32, config: &RunConfig) -> MosaicProblem {
    MosaicProblem::new(gradient(grid * tile, grid * tile), tiles(32, tile), config)
        .expect("fixture problem is valid")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_specimen(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_and_score");

    for &grid in &[10u32, 30, 50] {
        let config = RunConfig::default().with_grid(grid, grid);
        let problem = problem(grid, 8, &config);
        let mut rng = create_rng(42);
        let chromosome = problem.random_chromosome(&mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(grid), &chromosome, |b, chrom| {
            b.iter(|| black_box(problem.specimen(black_box(chrom.clone()))))
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution_run");
    group.sample_size(10);

    for (grid, pop, gen) in [(10u32, 20usize, 20usize), (30, 50, 10)] {
        let config = RunConfig::default()
            .with_grid(grid, grid)
            .with_population_size(pop)
            .auto_tournament()
            .with_stop_mode(StopMode::GenerationCount(gen))
            .with_seed(42);
        let problem = problem(grid, 6, &config);
        group.bench_with_input(
            BenchmarkId::new(format!("g{}_p{}_n{}", grid, pop, gen), grid),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = EvolutionRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_specimen, bench_run);
criterion_main!(benches);
