//! Output back-ends and the shared bounds → state → render pipeline.

pub mod ascii;
pub mod braille;
pub mod grid;
pub mod svg;

use std::io::Write;

use tracing::debug;

use crate::core::{
    bounds::Bounds,
    config::{Config, Mode, OutputKind},
    counter::Counter,
    data::Dataset,
    error::PlotError,
    scale::PlotState,
    transform::Transform,
};

pub use ascii::AsciiRenderer;
pub use braille::BrailleRenderer;
pub use svg::SvgRenderer;

/// One output format. Produces the complete bytes for a single data set.
pub trait Renderer {
    /// # Errors
    /// Transform and encoding failures.
    fn render(&self, state: &PlotState, ds: &Dataset) -> Result<Vec<u8>, PlotError>;
}

/// Renderer selected by `cfg.output`.
#[must_use]
pub fn backend(cfg: &Config) -> Box<dyn Renderer> {
    match cfg.output {
        OutputKind::Ascii => Box::new(AsciiRenderer),
        OutputKind::Braille => Box::new(BrailleRenderer),
        OutputKind::Svg => Box::new(SvgRenderer::new(cfg)),
    }
}

/// One counter per column, fed with every non-empty projected point.
///
/// # Errors
/// Transform failures.
pub fn count_points(state: &PlotState, ds: &Dataset) -> Result<Vec<Counter>, PlotError> {
    ds.columns()
        .iter()
        .map(|column| -> Result<Counter, PlotError> {
            let mut counter = Counter::with_rows(ds.rows());
            for p in column.iter().filter(|p| !p.is_empty()) {
                counter.increment(state.project(*p)?);
            }
            Ok(counter)
        })
        .collect()
}

/// Plot state for `ds` under `cfg`, or `None` when there is nothing to draw.
///
/// # Errors
/// [`PlotError::LogDomain`] for values a log axis cannot take.
pub fn prepare(cfg: &Config, ds: &Dataset) -> Result<Option<PlotState>, PlotError> {
    let transform = Transform::new(cfg.log_x, cfg.log_y);
    let Some(bounds) = Bounds::compute(ds, transform)? else {
        return Ok(None);
    };

    let mut state = PlotState::new(bounds, transform, cfg.width, cfg.height);
    if cfg.axis {
        state.axis = Some(state.axis_position());
    }
    if cfg.mode == Mode::Count {
        state.counters = Some(count_points(&state, ds)?);
    }
    Ok(Some(state))
}

/// Render `ds` to bytes. An all-empty data set renders nothing.
///
/// # Errors
/// See [`prepare`] and [`Renderer::render`].
pub fn draw(cfg: &Config, ds: &Dataset) -> Result<Vec<u8>, PlotError> {
    let Some(state) = prepare(cfg, ds)? else {
        debug!("nothing to draw");
        return Ok(Vec::new());
    };
    backend(cfg).render(&state, ds)
}

/// Render `ds` and hand it to `out` in a single write.
///
/// # Errors
/// Rendering failures and I/O errors from `out`.
pub fn draw_to<W: Write>(cfg: &Config, ds: &Dataset, out: &mut W) -> Result<(), PlotError> {
    let bytes = draw(cfg, ds)?;
    debug!(bytes = bytes.len(), rows = ds.rows(), "rendered");
    out.write_all(&bytes)?;
    out.flush()?;
    Ok(())
}
