//! Column-major sample storage plus the block-oriented text loader that
//! fills it.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};

use tracing::{debug, trace};

use crate::core::{constants::MAX_COLUMNS, error::PlotError};

/// Marker for a missing coordinate.
pub const EMPTY: f64 = f64::NAN;

// --- Public Row Structs ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point is empty when either coordinate is missing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

/// Ordered columns of equal length. `columns[c][r]` is row `r` of column `c`.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    columns: Vec<Vec<Point>>,
    rows: usize,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ready-made columns, padding short ones with empty points.
    #[must_use]
    pub fn from_columns(mut columns: Vec<Vec<Point>>) -> Self {
        columns.truncate(MAX_COLUMNS);
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        for (c, col) in columns.iter_mut().enumerate() {
            let start = col.len();
            col.extend((start..rows).map(|r| Point::new(r as f64, EMPTY)));
            trace!(column = c, padded = rows - start, "column padded");
        }
        Self { columns, rows }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Vec<Point>] {
        &self.columns
    }

    #[inline]
    #[must_use]
    pub fn column(&self, c: usize) -> &[Point] {
        &self.columns[c]
    }

    /// Every non-empty point, column by column.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.columns.iter().flatten().filter(|p| !p.is_empty())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Store `p` at (`col`, `row`), growing either dimension as needed.
    fn set(&mut self, col: usize, row: usize, p: Point) {
        while self.columns.len() <= col {
            let filler = (0..self.rows).map(|r| Point::new(r as f64, EMPTY)).collect();
            self.columns.push(filler);
        }
        if row >= self.rows {
            self.rows = row + 1;
            for column in &mut self.columns {
                let start = column.len();
                column.extend((start..self.rows).map(|r| Point::new(r as f64, EMPTY)));
            }
        }
        self.columns[col][row] = p;
    }
}

/// How the loader maps text fields onto points.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReadOptions {
    /// First field of every line is x for the remaining columns.
    pub x_column: bool,
    /// Swap x and y on store.
    pub flip_xy: bool,
    /// A blank line ends the current block (otherwise it ends the input).
    pub stream: bool,
}

/// Outcome of one [`BlockReader::next_block`] call.
#[derive(Debug)]
pub struct Block {
    pub dataset: Dataset,
    pub end_of_stream: bool,
}

/// What a single line contributed.
#[derive(Debug, Eq, PartialEq)]
pub enum LineKind {
    Row,
    Blank,
    Comment,
}

// --- Helpers ---
#[inline]
fn is_comment_marker(b: u8) -> bool {
    matches!(b, b'#' | b'/')
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b',')
}

#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

/// Empty, unparsable and infinite fields all read as [`EMPTY`].
#[inline]
fn parse_field(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return EMPTY;
    }
    match lexical_core::parse::<f64>(bytes) {
        Ok(v) if v.is_finite() => v,
        _ => EMPTY,
    }
}

/// Fold one line of text into `ds` as row `row`.
pub fn sink_line(opts: &ReadOptions, ds: &mut Dataset, line: &[u8], row: usize) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if is_comment_marker(line[0]) {
        return LineKind::Comment;
    }

    let mut x = row as f64;
    let mut has_x = false;
    let mut col = 0;

    for field in line.split(|&b| is_separator(b)) {
        if field.first().copied().is_some_and(is_comment_marker) {
            break;
        }
        let v = parse_field(field);
        if opts.x_column && !has_x {
            x = v;
            has_x = true;
            continue;
        }
        let p = if opts.flip_xy {
            Point::new(v, x)
        } else {
            Point::new(x, v)
        };
        ds.set(col, row, p);
        col += 1;
        if col == MAX_COLUMNS {
            break;
        }
    }

    for c in col..ds.column_count() {
        ds.set(c, row, Point::new(x, EMPTY));
    }
    if ds.rows() <= row {
        // x column alone, or nothing but a trailing comment
        ds.set(0, row, Point::new(x, EMPTY));
    }
    LineKind::Row
}

// --- Block ingest ---
const BUF_CAP: usize = 64 * 1024;

/// Reads successive data sets separated by blank lines.
pub struct BlockReader<R> {
    rdr: R,
    opts: ReadOptions,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(rdr: R, opts: ReadOptions) -> Self {
        Self {
            rdr,
            opts,
            buf: Vec::with_capacity(256),
            line_no: 0,
        }
    }

    /// Read up to the next block boundary.
    ///
    /// # Errors
    /// Propagates I/O failures from the underlying reader.
    pub fn next_block(&mut self) -> Result<Block, PlotError> {
        let mut ds = Dataset::new();
        let mut row = 0usize;

        loop {
            self.buf.clear();
            let n = self.rdr.read_until(b'\n', &mut self.buf)?;
            if n == 0 {
                debug!(rows = ds.rows(), columns = ds.column_count(), "end of stream");
                return Ok(Block {
                    dataset: ds,
                    end_of_stream: true,
                });
            }
            self.line_no += 1;

            if self.buf.ends_with(b"\n") {
                self.buf.pop();
            }
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
            normalize_unicode_minus(&mut self.buf);

            match sink_line(&self.opts, &mut ds, &self.buf, row) {
                LineKind::Row => row += 1,
                LineKind::Comment => {}
                LineKind::Blank => {
                    debug!(
                        line = self.line_no,
                        rows = ds.rows(),
                        columns = ds.column_count(),
                        "block complete"
                    );
                    return Ok(Block {
                        dataset: ds,
                        end_of_stream: !self.opts.stream,
                    });
                }
            }
        }
    }
}

/// `-` (or no path) is stdin.
///
/// # Errors
/// Fails when the file cannot be opened.
pub fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>, PlotError> {
    match path {
        None | Some("-") => Ok(Box::new(BufReader::with_capacity(BUF_CAP, io::stdin()))),
        Some(p) => Ok(Box::new(BufReader::with_capacity(BUF_CAP, File::open(p)?))),
    }
}
