//! A collection of constants.

/// Pull an axis into view when zero lies within this many ranges of the
/// nearest boundary.
pub const CROSS_PAD: f64 = 2.0;

/// Slack allowed on the x precondition of the scaler.
pub const SCALE_EPSILON: f64 = 0.001;

/// Cells reserved along each axis so edge points stay visible.
pub const SCALE_PAD: usize = 2;

/// Upper bound on y columns per data set.
pub const MAX_COLUMNS: usize = 255;

/// Default text grid, in characters (ascii) or dots (braille).
pub const DEFAULT_TEXT_WIDTH: usize = 72;
pub const DEFAULT_TEXT_HEIGHT: usize = 40;

/// Default SVG canvas, in pixels.
pub const DEFAULT_SVG_WIDTH: usize = 320;
pub const DEFAULT_SVG_HEIGHT: usize = 200;

/// Grids smaller than this in either direction are rejected.
pub const MIN_GRID: usize = 4;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Axis tick marks every n-th cell in the ASCII renderer.
pub const ASCII_TICK_EVERY: usize = 5;

/// Base circle radius in SVG dot/count mode.
pub const SVG_POINT_SIZE: usize = 2;
/// Stroke width of regression lines.
pub const REGRESSION_LINE_WIDTH: usize = 2;
/// Dash pattern for substituted axes and regression lines.
pub const SVG_DASH: &str = "2,5";

/// Environment prefix for theme and geometry overrides.
pub const ENV_PREFIX: &str = "PLOTGRID_";
