//! Grid at dot resolution, folded into UTF-8 braille cells.
//!
//! ### Workflow
//! 1. Draw axes and points into a [`CharGrid`] with one cell per dot.
//! 2. Fold every 2×4 block of dots into one mask, OR the mask onto
//!    U+2800 and encode the scalar.
//!
//! Dot numbering follows the Unicode braille block: the left column is
//! dots 1, 2, 3, 7 and the right column 4, 5, 6, 8, top to bottom.
//! <https://en.wikipedia.org/wiki/Braille_Patterns>

use crate::{
    core::{
        constants::{BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR},
        data::Dataset,
        error::PlotError,
        scale::PlotState,
    },
    render::{
        Renderer,
        grid::{CharGrid, range_header},
    },
};

/// U+2800, the blank braille pattern.
pub const BRAILLE_BASE: u32 = 0x2800;

/// `DOT_BITS[row][col]` is the mask bit for the dot at (`col`, `row`) in a cell.
const DOT_BITS: [[u8; HR]; VR] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

const POINT: u8 = b'@';

/// Mask for the cell whose top-left dot is (`x0`, `y0`).
#[inline]
fn cell_mask(grid: &CharGrid, x0: usize, y0: usize) -> u8 {
    let mut mask = 0;
    for (i, row) in DOT_BITS.iter().enumerate() {
        for (j, bit) in row.iter().enumerate() {
            if !grid.is_blank(x0 + j, y0 + i) {
                mask |= bit;
            }
        }
    }
    mask
}

/// Append the UTF-8 encoding of `cp` to `out`.
///
/// # Errors
/// [`PlotError::CodePoint`] when `cp` is not a Unicode scalar value.
#[inline]
pub fn push_code_point(out: &mut Vec<u8>, cp: u32) -> Result<(), PlotError> {
    let ch = char::from_u32(cp).ok_or(PlotError::CodePoint(cp))?;
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    Ok(())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrailleRenderer;

impl Renderer for BrailleRenderer {
    fn render(&self, state: &PlotState, ds: &Dataset) -> Result<Vec<u8>, PlotError> {
        let mut grid = CharGrid::new(state.width, state.height);
        grid.draw_axes(
            state,
            |_, real| if real { b'|' } else { b' ' },
            |_, real| if real { b'-' } else { b' ' },
        );
        grid.plot_points(state, ds, |_, _| POINT)?;

        let cols = grid.width() / HR;
        let lines = grid.height() / VR;

        let mut out = range_header(state).into_bytes();
        out.push(b'\n');
        // three bytes per braille scalar
        out.reserve(lines * (cols * 3 + 1));
        for cy in 0..lines {
            for cx in 0..cols {
                let mask = cell_mask(&grid, cx * HR, cy * VR);
                push_code_point(&mut out, BRAILLE_BASE | u32::from(mask))?;
            }
            out.push(b'\n');
        }
        Ok(out)
    }
}
