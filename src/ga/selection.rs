//! Tournament selection.
//!
//! A tournament draws `size` **distinct** population indices uniformly at
//! random and returns the fittest of them. Ties go to the entrant that was
//! drawn first.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Population;
use crate::error::{MosaicError, Result};
use crate::fitness::FitnessMode;
use rand::Rng;

/// Tournament selection without replacement.
///
/// # Examples
///
/// ```
/// use u_mosaic::ga::Tournament;
///
/// // Five entrants, give up after 10 000 consecutive collisions
/// let t = Tournament::new(5, 10_000);
/// assert_eq!(t.size(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    size: usize,
    resample_limit: usize,
}

impl Tournament {
    /// Creates a tournament of `size` entrants.
    ///
    /// `resample_limit` bounds the consecutive colliding draws tolerated while
    /// filling one entrant slot.
    pub fn new(size: usize, resample_limit: usize) -> Self {
        Self {
            size,
            resample_limit,
        }
    }

    /// Number of entrants.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Selects a parent index from `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(
        &self,
        population: &Population,
        mode: FitnessMode,
        rng: &mut R,
    ) -> Result<usize> {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let entrants = sample_distinct(population.len(), self.size, self.resample_limit, rng)?;
        let mut best = entrants[0];
        for &idx in &entrants[1..] {
            if mode.is_better(population.fitness(idx), population.fitness(best)) {
                best = idx;
            }
        }
        Ok(best)
    }
}

/// Draws `k` distinct indices from `0..n` by rejection sampling, in draw
/// order.
///
/// `k` is clamped to `1..=n`.
fn sample_distinct<R: Rng>(n: usize, k: usize, limit: usize, rng: &mut R) -> Result<Vec<usize>> {
    let k = k.clamp(1, n);
    let mut taken = vec![false; n];
    let mut picked = Vec::with_capacity(k);

    while picked.len() < k {
        let mut collisions = 0usize;
        loop {
            let idx = rng.random_range(0..n);
            if !taken[idx] {
                taken[idx] = true;
                picked.push(idx);
                break;
            }
            collisions += 1;
            if collisions >= limit {
                return Err(MosaicError::ResampleLimit {
                    what: "tournament entrant sampling",
                    limit,
                });
            }
        }
    }
    Ok(picked)
}
