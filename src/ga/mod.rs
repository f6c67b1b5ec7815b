//! Genetic search over tile arrangements.
//!
//! A candidate mosaic is encoded as a [`Chromosome`]: one tile index and one
//! mirror flag per grid cell. [`MosaicProblem`] renders and scores
//! chromosomes into [`Specimen`]s; [`EvolutionRunner`] evolves a
//! [`Population`] of them by tournament selection, segment crossover and
//! point mutation under strict generational replacement.
//!
//! # Key Types
//!
//! - [`RunConfig`]: Search parameters (grid, population, operators, stop mode)
//! - [`MosaicProblem`]: Source image, tiles and scoring for one run
//! - [`EvolutionRunner`]: Executes the generational loop
//! - [`EvolutionResult`]: Winning specimen, terminal state and history
//!
//! # Submodules
//!
//! - [`operators`]: Segment crossover and tile/mirror mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod problem;
mod reproduction;
mod runner;
mod selection;
mod types;

pub use config::{RunConfig, StopMode};
pub use problem::MosaicProblem;
pub use reproduction::Reproduction;
pub use runner::{EvolutionResult, EvolutionRunner, GenerationReport, Termination};
pub use selection::Tournament;
pub use types::{Chromosome, Population, Specimen};
