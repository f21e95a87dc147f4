//! Per-render plot state and the value-space → grid-cell scaler.

use tracing::trace;

use crate::core::{
    bounds::{AxisPosition, Bounds},
    constants::{SCALE_EPSILON, SCALE_PAD},
    counter::Counter,
    data::Point,
    error::PlotError,
    transform::Transform,
};

/// Integer grid cell, y = 0 is the top row.
///
/// Signed: regression endpoints may legitimately land above or below the
/// visible rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ScaledPoint {
    pub x: i64,
    pub y: i64,
}

impl ScaledPoint {
    #[inline]
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Column index, clamped at zero.
    #[inline]
    #[must_use]
    pub fn col(self) -> usize {
        usize::try_from(self.x).unwrap_or(0)
    }

    /// Row index, clamped at zero.
    #[inline]
    #[must_use]
    pub fn row(self) -> usize {
        usize::try_from(self.y).unwrap_or(0)
    }
}

/// Everything a renderer needs besides the data set itself.
/// Built fresh for every render call.
#[derive(Debug)]
pub struct PlotState {
    pub bounds: Bounds,
    pub transform: Transform,
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// `None` when axes are disabled.
    pub axis: Option<AxisPosition>,
    /// One counter per column, count mode only.
    pub counters: Option<Vec<Counter>>,
}

impl PlotState {
    #[must_use]
    pub fn new(bounds: Bounds, transform: Transform, width: usize, height: usize) -> Self {
        Self {
            bounds,
            transform,
            width,
            height,
            axis: None,
            counters: None,
        }
    }

    /// Map an already transformed point onto the grid, keeping a two-cell
    /// margin so edge points stay visible.
    ///
    /// # Panics
    /// When `p.x` lies outside the bounds (beyond a small epsilon); that
    /// means the bounds were computed wrong.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn scale(&self, p: Point) -> ScaledPoint {
        let b = &self.bounds;
        assert!(
            p.x >= b.min_x - SCALE_EPSILON && p.x <= b.max_x + SCALE_EPSILON,
            "x = {} outside [{}, {}]",
            p.x,
            b.min_x,
            b.max_x
        );

        let w = self.width as f64;
        let h = self.height as f64;
        let cell_w = b.range_x / w;
        let cell_h = b.range_y / h;

        let x = ((w - SCALE_PAD as f64) * ((p.x - b.min_x + cell_w / 2.0) / b.range_x)) as i64;
        let raw_y = ((h - SCALE_PAD as f64) * ((p.y - b.min_y + cell_h / 2.0) / b.range_y)) as i64;
        // flip: row 0 is the top
        let y = self.height as i64 - raw_y - 1;

        trace!(px = p.x, py = p.y, x, y, "scaled");
        ScaledPoint { x, y }
    }

    /// Transform a raw point, then scale it.
    ///
    /// # Errors
    /// [`PlotError::LogDomain`] from the transform.
    pub fn project(&self, p: Point) -> Result<ScaledPoint, PlotError> {
        Ok(self.scale(self.transform.apply(p)?))
    }

    /// Coincident-point count at `sp` for column `c`, when counting.
    #[inline]
    #[must_use]
    pub fn count_at(&self, c: usize, sp: ScaledPoint) -> Option<usize> {
        self.counters.as_ref().map(|cs| cs[c].get(sp))
    }
}
