//! Public-facing crate root: re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    config::{Config, ConfigBuilder, Mode, OutputKind},
    data::{BlockReader, Dataset, EMPTY, Point, ReadOptions, open_input},
    error::{ConfigError, PlotError},
    theme::{Palette, Theme},
};

pub use render::{Renderer, backend, draw, draw_to};

/// Render an in-memory data set with `cfg`.
///
/// Returns an empty buffer when the data set has no non-empty point.
///
/// # Errors
/// [`PlotError::LogDomain`] for values a log axis cannot take.
pub fn plot(ds: &Dataset, cfg: &Config) -> Result<Vec<u8>, PlotError> {
    draw(cfg, ds)
}
