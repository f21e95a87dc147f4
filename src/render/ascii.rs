//! Plain-text renderer: one character per grid cell.

use crate::{
    core::{
        constants::ASCII_TICK_EVERY, data::Dataset, error::PlotError, scale::PlotState,
    },
    render::{
        Renderer,
        grid::{CharGrid, range_header},
    },
};

/// Per-column marker glyphs.
const MARKERS: &[u8] = b"#@*^!~%ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Columns past the marker alphabet.
const FALLBACK_MARKER: u8 = b'*';

/// Marker for column `c`.
#[inline]
#[must_use]
pub fn column_marker(c: usize) -> u8 {
    MARKERS.get(c).copied().unwrap_or(FALLBACK_MARKER)
}

/// Glyph for `n` coincident samples: `0-9`, then `a-z`, then `#`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn count_glyph(n: usize) -> u8 {
    match n {
        0..=9 => b'0' + n as u8,
        10..=35 => b'a' + (n - 10) as u8,
        _ => b'#',
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    fn header(state: &PlotState, columns: usize) -> String {
        let mut h = range_header(state);
        if state.counters.is_none() {
            h.push_str(" -- ");
            let legend: Vec<String> = (0..columns)
                .map(|c| format!("{c}: {}", char::from(column_marker(c))))
                .collect();
            h.push_str(&legend.join(", "));
        }
        h.push('\n');
        h
    }
}

impl Renderer for AsciiRenderer {
    fn render(&self, state: &PlotState, ds: &Dataset) -> Result<Vec<u8>, PlotError> {
        let mut grid = CharGrid::new(state.width, state.height);
        grid.draw_axes(
            state,
            |i, real| match (real, i % ASCII_TICK_EVERY == 0) {
                (true, true) => b'+',
                (true, false) => b'|',
                (false, true) => b'.',
                (false, false) => b' ',
            },
            |i, real| match (real, i % ASCII_TICK_EVERY == 0) {
                (true, true) => b'+',
                (true, false) => b'-',
                (false, true) => b'.',
                (false, false) => b' ',
            },
        );

        grid.plot_points(state, ds, |c, sp| match state.count_at(c, sp) {
            Some(n) => count_glyph(n),
            None => column_marker(c),
        })?;

        let header = Self::header(state, ds.column_count());
        let mut out = Vec::with_capacity(header.len() + (grid.width() + 1) * grid.height());
        out.extend_from_slice(header.as_bytes());
        for y in 0..grid.height() {
            out.extend_from_slice(grid.row(y));
            out.push(b'\n');
        }
        Ok(out)
    }
}
