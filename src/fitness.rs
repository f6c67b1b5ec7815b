//! Mosaic scoring.
//!
//! Scores compare a rendered mosaic with the source image channel by channel
//! using the raw absolute difference of the 8-bit values. The scoring
//! direction is configurable:
//!
//! - [`FitnessMode::Similarity`]: sum of `255 - |s - m|`, higher is better.
//!   A pixel-perfect match scores `W * H * 3 * 255`.
//! - [`FitnessMode::Difference`]: sum of `|s - m|`, lower is better.
//!   A pixel-perfect match scores 0.

use crate::error::{MosaicError, Result};
use image::RgbImage;

const CHANNEL_MAX: u64 = 255;

/// Direction of the fitness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessMode {
    /// Accumulated similarity; maximized.
    #[default]
    Similarity,
    /// Accumulated absolute difference; minimized.
    Difference,
}

impl FitnessMode {
    /// Returns `true` if `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: u64, b: u64) -> bool {
        match self {
            FitnessMode::Similarity => a > b,
            FitnessMode::Difference => a < b,
        }
    }

    /// Score of a pixel-perfect match over `pixels` RGB pixels.
    pub fn optimum(self, pixels: u64) -> u64 {
        match self {
            FitnessMode::Similarity => pixels * 3 * CHANNEL_MAX,
            FitnessMode::Difference => 0,
        }
    }

    /// Index of the best score, the lowest index winning ties.
    ///
    /// Returns `None` for an empty iterator.
    pub fn best_index<I: IntoIterator<Item = u64>>(self, scores: I) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (i, s) in scores.into_iter().enumerate() {
            match best {
                Some((_, b)) if !self.is_better(s, b) => {}
                _ => best = Some((i, s)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Scores mosaics against a fixed source image.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    source: RgbImage,
    mode: FitnessMode,
}

impl FitnessEvaluator {
    /// Creates an evaluator for `source`.
    pub fn new(source: RgbImage, mode: FitnessMode) -> Self {
        Self { source, mode }
    }

    /// The reference image.
    pub fn source(&self) -> &RgbImage {
        &self.source
    }

    /// The scoring direction.
    pub fn mode(&self) -> FitnessMode {
        self.mode
    }

    /// Score of a pixel-perfect match against this source.
    pub fn optimum(&self) -> u64 {
        self.mode.optimum(pixel_count(&self.source))
    }

    /// Scores `mosaic` against the source.
    pub fn score(&self, mosaic: &RgbImage) -> Result<u64> {
        score(&self.source, mosaic, self.mode)
    }
}

/// Scores `mosaic` against `source`.
///
/// Both images must have identical dimensions.
pub fn score(source: &RgbImage, mosaic: &RgbImage, mode: FitnessMode) -> Result<u64> {
    if source.dimensions() != mosaic.dimensions() {
        return Err(MosaicError::ImageSize {
            expected: source.dimensions(),
            actual: mosaic.dimensions(),
        });
    }

    let diff: u64 = source
        .as_raw()
        .iter()
        .zip(mosaic.as_raw())
        .map(|(&s, &m)| u64::from(s.abs_diff(m)))
        .sum();

    Ok(match mode {
        FitnessMode::Difference => diff,
        FitnessMode::Similarity => mode.optimum(pixel_count(source)) - diff,
    })
}

fn pixel_count(img: &RgbImage) -> u64 {
    u64::from(img.width()) * u64::from(img.height())
}
