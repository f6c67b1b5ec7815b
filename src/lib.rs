//! Photomosaic synthesis by genetic search.
//!
//! Approximates a source image with a grid of smaller tile images. The
//! arrangement (which tile goes in which cell, and whether it is mirrored)
//! is found by a genetic algorithm scored pixel by pixel against the source.
//!
//! - [`tiles`]: Tile collections ([`TileSource`](tiles::TileSource),
//!   [`TileSet`](tiles::TileSet)) and directory loading.
//! - [`compositor`]: Renders a chromosome into a mosaic image.
//! - [`fitness`]: Per-channel absolute-difference scoring, maximized as
//!   similarity or minimized as difference.
//! - [`ga`]: Chromosomes, populations, operators and the generational loop.
//!
//! # Example
//!
//! ```no_run
//! use u_mosaic::ga::{EvolutionRunner, MosaicProblem, RunConfig, StopMode};
//! use u_mosaic::tiles::{tile_size_for, TileSet};
//!
//! # fn main() -> u_mosaic::Result<()> {
//! let config = RunConfig::default()
//!     .with_stop_mode(StopMode::GenerationCount(200))
//!     .with_seed(7);
//! let source = image::open("photo.jpg")?.to_rgb8();
//! let (tw, th) = tile_size_for(source.dimensions(), config.tiles_x, config.tiles_y)?;
//! let tiles = TileSet::load_dir("pictures", tw, th)?;
//!
//! let problem = MosaicProblem::new(source, tiles, &config)?;
//! let result = EvolutionRunner::run(&problem, &config)?;
//! result.best.mosaic().save("mosaic.png")?;
//! # Ok(())
//! # }
//! ```

pub mod compositor;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod random;
pub mod tiles;

pub use error::{MosaicError, Result};
