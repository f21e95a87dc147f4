//! Character grid shared by the text renderers, plus the range header.

use std::fmt::Write;

use crate::core::{
    data::Dataset,
    error::PlotError,
    scale::{PlotState, ScaledPoint},
};

/// `height` rows of `width` bytes, blank is a space.
pub struct CharGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl CharGrid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![b' '; width * height],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Write `c` at (`x`, `y`). An off-grid cell means the scaler broke its
    /// contract: debug builds panic, release builds drop the write.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: u8) {
        debug_assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) off a {}x{} grid",
            self.width,
            self.height
        );
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    #[inline]
    #[must_use]
    pub fn is_blank(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == b' '
    }

    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Axis lines at `state.axis`, if axes are on.
    ///
    /// `vertical(i, real)` / `horizontal(i, real)` pick the glyph for cell
    /// `i` along each line; `real` is false when the axis was moved off
    /// zero. The crossing is always `+`.
    pub fn draw_axes(
        &mut self,
        state: &PlotState,
        vertical: impl Fn(usize, bool) -> u8,
        horizontal: impl Fn(usize, bool) -> u8,
    ) {
        let Some(axis) = state.axis else { return };
        for i in 0..self.height {
            self.set(axis.x, i, vertical(i, axis.draw_y_axis));
        }
        for i in 0..self.width {
            self.set(i, axis.y, horizontal(i, axis.draw_x_axis));
        }
        self.set(axis.x, axis.y, b'+');
    }

    /// Every non-empty point projected to the grid, column by column, with
    /// its column index.
    ///
    /// # Errors
    /// Propagates transform failures.
    pub fn plot_points(
        &mut self,
        state: &PlotState,
        ds: &Dataset,
        mut mark: impl FnMut(usize, ScaledPoint) -> u8,
    ) -> Result<(), PlotError> {
        for (c, column) in ds.columns().iter().enumerate() {
            for p in column.iter().filter(|p| !p.is_empty()) {
                let sp = state.project(*p)?;
                debug_assert!(sp.x >= 0 && sp.y >= 0, "cell ({}, {}) off grid", sp.x, sp.y);
                let m = mark(c, sp);
                self.set(sp.col(), sp.row(), m);
            }
        }
        Ok(())
    }
}

/// `    x: [lo - hi]    y: [lo - hi]`, reporting log axes in input units.
#[must_use]
pub fn range_header(state: &PlotState) -> String {
    let b = &state.bounds;
    let t = state.transform;
    let mut s = String::new();
    push_axis(&mut s, "x", t.log_x(), t.invert_x(b.min_x), t.invert_x(b.max_x));
    push_axis(&mut s, "y", t.log_y(), t.invert_y(b.min_y), t.invert_y(b.max_y));
    s
}

fn push_axis(s: &mut String, name: &str, log: bool, lo: f64, hi: f64) {
    let log = if log { "log " } else { "" };
    let _ = write!(s, "    {name}: {log}[{} - {}]", general(lo), general(hi));
}

/// Shortest-form float with six significant digits, trailing zeros
/// stripped, switching to exponent notation outside 1e-4..1e6.
#[must_use]
pub fn general(v: f64) -> String {
    const PRECISION: i32 = 6;
    if v == 0.0 {
        return "0".to_owned();
    }
    if !v.is_finite() {
        return v.to_string();
    }

    // {:.5e} is six significant digits
    let sci = format!("{v:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs())
    } else {
        let decimals = usize::try_from(PRECISION - 1 - exp).unwrap_or(0);
        trim_zeros(&format!("{v:.decimals$}")).to_owned()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
