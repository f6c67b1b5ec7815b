//! Crate error type.
//!
//! Configuration and input problems are reported up front by
//! [`RunConfig::validate`](crate::ga::RunConfig::validate) and
//! [`MosaicProblem::new`](crate::ga::MosaicProblem::new). Once a run has
//! started, the only error the engine can surface is
//! [`MosaicError::ResampleLimit`].

use thiserror::Error;

/// Errors produced by the mosaic engine and its input helpers.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// A [`RunConfig`](crate::ga::RunConfig) field is out of range.
    #[error("invalid run configuration: {0}")]
    InvalidConfig(String),

    /// The tile set is empty or its tiles are not uniformly sized.
    #[error("invalid tile set: {0}")]
    TileSet(String),

    /// A chromosome does not fit the problem's grid or tile set.
    #[error("invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// Two images that must line up have incompatible dimensions.
    #[error("image size mismatch: expected {expected:?}, got {actual:?}")]
    ImageSize {
        /// Required `(width, height)`.
        expected: (u32, u32),
        /// Observed `(width, height)`.
        actual: (u32, u32),
    },

    /// A resampling loop exhausted its retry budget.
    ///
    /// Unreachable for validated configurations in practice.
    #[error("{what} did not succeed within {limit} draws")]
    ResampleLimit {
        /// Which loop gave up.
        what: &'static str,
        /// Configured retry cap.
        limit: usize,
    },

    /// Image decoding failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Filesystem access failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MosaicError>;
