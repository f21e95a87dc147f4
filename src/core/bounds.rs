//! Geometry helpers: value-space bounds, axis placement + terminal size
//! plumbing.

use terminal_size::{Height, Width, terminal_size};
use tracing::debug;

use crate::core::{
    config::OutputKind,
    constants::{BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR, CROSS_PAD},
    data::{Dataset, Point},
    error::PlotError,
    scale::PlotState,
    transform::Transform,
};

/// Post-transform extent of a data set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Always > 0.
    pub range_x: f64,
    /// Always > 0.
    pub range_y: f64,
}

impl Bounds {
    /// Bounds over every non-empty point of `ds` in transformed space.
    ///
    /// * `Ok(None)` when no point is non-empty; nothing should be drawn.
    /// * A zero range is widened to 1 so the scaler never divides by zero.
    /// * An axis whose zero lies within [`CROSS_PAD`] ranges of the data is
    ///   pulled into view.
    ///
    /// # Errors
    /// [`PlotError::LogDomain`] for any value ≤ 0 on a log axis.
    pub fn compute(ds: &Dataset, t: Transform) -> Result<Option<Self>, PlotError> {
        let (mut low, mut high) = (
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        );
        let mut seen = false;

        for p in ds.points() {
            if t.log_x() && p.x <= 0.0 {
                return Err(PlotError::LogDomain(p.x));
            }
            if t.log_y() && p.y <= 0.0 {
                return Err(PlotError::LogDomain(p.y));
            }
            seen = true;
            low.x = low.x.min(p.x);
            low.y = low.y.min(p.y);
            high.x = high.x.max(p.x);
            high.y = high.y.max(p.y);
        }

        if !seen {
            debug!("no non-empty points");
            return Ok(None);
        }

        // log is monotonic, so transforming the extrema is enough
        let low = t.apply(low)?;
        let high = t.apply(high)?;

        let (min_x, max_x, range_x) = pad_axis(low.x, high.x);
        let (min_y, max_y, range_y) = pad_axis(low.y, high.y);

        let b = Self {
            min_x,
            max_x,
            min_y,
            max_y,
            range_x,
            range_y,
        };
        debug!(
            min_x = b.min_x,
            max_x = b.max_x,
            min_y = b.min_y,
            max_y = b.max_y,
            "bounds"
        );
        Ok(Some(b))
    }
}

/// Degenerate-range bump followed by the cross-pad pull towards zero.
#[allow(clippy::float_cmp)]
fn pad_axis(mut min: f64, mut max: f64) -> (f64, f64, f64) {
    if min == max {
        max = min + 1.0;
    }
    let mut range = max - min;

    let crosses = min <= 0.0 && max >= 0.0;
    if !crosses {
        if 0.0 < min && 0.0 > min - range * CROSS_PAD {
            min = 0.0;
            range = max;
        } else if 0.0 > max && 0.0 < max + range * CROSS_PAD {
            max = 0.0;
            range = -min;
        }
    }
    (min, max, range)
}

/// Where the axes cross, in grid cells, and whether each is at true zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AxisPosition {
    pub x: usize,
    pub y: usize,
    /// The horizontal axis sits at y = 0.
    pub draw_x_axis: bool,
    /// The vertical axis sits at x = 0.
    pub draw_y_axis: bool,
}

impl PlotState {
    /// Place the axes. An axis whose zero is out of range is moved to the
    /// nearest data edge and reported as not drawable.
    #[must_use]
    pub fn axis_position(&self) -> AxisPosition {
        let b = &self.bounds;
        let draw_x_axis = 0.0 >= b.min_y && 0.0 <= b.max_y;
        let draw_y_axis = 0.0 >= b.min_x && 0.0 <= b.max_x;

        let mut origin = Point::new(0.0, 0.0);
        if !draw_y_axis {
            origin.x = if 0.0 < b.min_x { b.min_x } else { b.max_x };
        }
        if !draw_x_axis {
            origin.y = if 0.0 < b.min_y { b.min_y } else { b.max_y };
        }

        // bounds already live in transformed space
        let sp = self.scale(origin);
        let axis = AxisPosition {
            x: sp.col(),
            y: sp.row(),
            draw_x_axis,
            draw_y_axis,
        };
        debug!(
            origin_x = origin.x,
            origin_y = origin.y,
            x = axis.x,
            y = axis.y,
            "axis position"
        );
        axis
    }
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Convert terminal dimensions to a grid for the text renderers.
/// Leaves one line for the header and one for the prompt.
#[inline]
#[must_use]
pub fn graph_dims((w, h): (Width, Height), output: OutputKind) -> (usize, usize) {
    let cols = usize::from(w.0);
    let lines = usize::from(h.0).saturating_sub(2);
    match output {
        OutputKind::Braille => (cols * HR, lines * VR),
        OutputKind::Ascii | OutputKind::Svg => (cols, lines),
    }
}
