//! Genetic operators for tile chromosomes.
//!
//! # Crossover
//!
//! - [`segment_crossover`]: multi-point crossover with `len / 5` random cuts.
//!   Tile and mirror genes are cut at the same points, so a cell's tile and
//!   its mirror flag are always inherited together.
//!
//! # Mutation
//!
//! - [`mutate_tiles`]: `len / 100` random cells get a random tile — O(len/100)
//! - [`flip_mirrors`]: `len / 100` random cells have their mirror flag
//!   toggled, drawn independently of the tile mutation — O(len/100)
//!
//! Positions are drawn with replacement in both mutations, so fewer than
//! `len / 100` distinct cells may change.

use super::types::Chromosome;
use rand::Rng;

/// Cells per crossover cut.
const CELLS_PER_CUT: usize = 5;

/// Cells per mutated gene.
const CELLS_PER_MUTATION: usize = 100;

// ============================================================================
// Crossover
// ============================================================================

/// Multi-point segment crossover.
///
/// Draws `len / 5` cut positions uniformly in `0..len` (duplicates allowed),
/// then delegates to [`crossover_at`].
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn segment_crossover<R: Rng>(
    mother: &Chromosome,
    father: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let cuts = cut_points(mother.len(), rng);
    crossover_at(mother, father, &cuts)
}

/// Random cut positions for a chromosome of length `len`.
///
/// Returns `len / 5` positions drawn from `0..len` followed by a final cut at
/// `len`, sorted ascending.
pub fn cut_points<R: Rng>(len: usize, rng: &mut R) -> Vec<usize> {
    let count = len / CELLS_PER_CUT;
    let mut cuts: Vec<usize> = (0..count).map(|_| rng.random_range(0..len)).collect();
    cuts.push(len);
    cuts.sort_unstable();
    cuts
}

/// Splices two parents at the given sorted cut positions.
///
/// Segment `i` spans `[cuts[i-1], cuts[i])` (the first one starts at 0).
/// `child0` takes even segments from `mother` and odd ones from `father`;
/// `child1` is the complement. Repeated cuts produce empty segments that
/// still switch sources. Cells past the last cut are copied from the
/// parent whose turn it would be next.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn crossover_at(
    mother: &Chromosome,
    father: &Chromosome,
    cuts: &[usize],
) -> (Chromosome, Chromosome) {
    let n = mother.len();
    assert_eq!(n, father.len(), "parents must have equal length");

    let mut child0 = mother.clone();
    let mut child1 = father.clone();

    let mut start = 0usize;
    let mut from_mother = true;
    for &cut in cuts {
        let end = cut.min(n);
        if !from_mother && start < end {
            swap_range(&mut child0, &mut child1, start, end);
        }
        start = start.max(end);
        from_mother = !from_mother;
    }
    if !from_mother && start < n {
        swap_range(&mut child0, &mut child1, start, n);
    }

    (child0, child1)
}

/// Exchanges the genes of `[start, end)` between two children.
fn swap_range(a: &mut Chromosome, b: &mut Chromosome, start: usize, end: usize) {
    let (a_tiles, a_mirror) = a.genes_mut();
    let (b_tiles, b_mirror) = b.genes_mut();
    a_tiles[start..end].swap_with_slice(&mut b_tiles[start..end]);
    a_mirror[start..end].swap_with_slice(&mut b_mirror[start..end]);
}

// ============================================================================
// Mutation
// ============================================================================

/// Number of draws per mutation process for a chromosome of length `len`.
pub fn mutation_draws(len: usize) -> usize {
    len / CELLS_PER_MUTATION
}

/// Overwrites `len / 100` randomly drawn cells with random tile indices
/// from `0..tile_count`.
pub fn mutate_tiles<R: Rng>(chromosome: &mut Chromosome, tile_count: usize, rng: &mut R) {
    let n = chromosome.len();
    let (tiles, _) = chromosome.genes_mut();
    for _ in 0..mutation_draws(n) {
        let pos = rng.random_range(0..n);
        tiles[pos] = rng.random_range(0..tile_count);
    }
}

/// Toggles the mirror flag of `len / 100` randomly drawn cells.
pub fn flip_mirrors<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    let n = chromosome.len();
    let (_, mirror) = chromosome.genes_mut();
    for _ in 0..mutation_draws(n) {
        let pos = rng.random_range(0..n);
        mirror[pos] = !mirror[pos];
    }
}

// ============================================================================
// Tests
// ============================================================================
