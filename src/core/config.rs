//! Run-time configuration object + fluent builder.

use crate::core::{
    constants::{
        DEFAULT_SVG_HEIGHT, DEFAULT_SVG_WIDTH, DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH, MIN_GRID,
    },
    data::ReadOptions,
    error::ConfigError,
    theme::{Palette, Theme},
};

/// Which renderer produces the output stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputKind {
    #[default]
    Ascii,
    Braille,
    Svg,
}

impl OutputKind {
    /// Grid used when no dimensions are given.
    #[must_use]
    pub const fn default_dims(self) -> (usize, usize) {
        match self {
            Self::Ascii | Self::Braille => (DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT),
            Self::Svg => (DEFAULT_SVG_WIDTH, DEFAULT_SVG_HEIGHT),
        }
    }
}

/// How samples are marked. `Line` only changes SVG output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Dot,
    Count,
    Line,
}

/// Immutable parameters handed to the renderer.
#[derive(Debug, Clone)]
pub struct Config {
    pub output: OutputKind,
    pub mode: Mode,
    pub width: usize,
    pub height: usize,
    pub log_x: bool,
    pub log_y: bool,
    pub log_count: bool,
    pub axis: bool,
    pub regression: bool,
    pub x_column: bool,
    pub flip_xy: bool,
    pub stream: bool,
    /// Resolved styling, SVG only.
    pub theme: Theme,
}

impl Config {
    #[inline]
    pub fn builder(output: OutputKind) -> ConfigBuilder {
        ConfigBuilder::new(output)
    }

    /// Loader settings implied by this configuration.
    #[inline]
    #[must_use]
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            x_column: self.x_column,
            flip_xy: self.flip_xy,
            stream: self.stream,
        }
    }
}

/// Fluent builder; unset fields fall back to per-output defaults in `build`.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConfigBuilder {
    output: OutputKind,
    mode: Mode,
    dims: Option<(usize, usize)>,
    log_x: bool,
    log_y: bool,
    log_count: bool,
    axis: bool,
    regression: bool,
    colorblind: bool,
    x_column: bool,
    flip_xy: bool,
    stream: bool,
    theme: Option<Theme>,
}

impl ConfigBuilder {
    pub(crate) fn new(output: OutputKind) -> Self {
        Self {
            output,
            mode: Mode::Dot,
            dims: None,
            log_x: false,
            log_y: false,
            log_count: false,
            axis: true,
            regression: false,
            colorblind: false,
            x_column: false,
            flip_xy: false,
            stream: true,
            theme: None,
        }
    }

    #[inline]
    pub fn mode(mut self, m: Mode) -> Self {
        self.mode = m;
        self
    }
    #[inline]
    pub fn dims(mut self, width: usize, height: usize) -> Self {
        self.dims = Some((width, height));
        self
    }
    #[inline]
    pub fn log_x(mut self, on: bool) -> Self {
        self.log_x = on;
        self
    }
    #[inline]
    pub fn log_y(mut self, on: bool) -> Self {
        self.log_y = on;
        self
    }
    #[inline]
    pub fn log_count(mut self, on: bool) -> Self {
        self.log_count = on;
        self
    }
    #[inline]
    pub fn axis(mut self, on: bool) -> Self {
        self.axis = on;
        self
    }
    #[inline]
    pub fn regression(mut self, on: bool) -> Self {
        self.regression = on;
        self
    }
    #[inline]
    pub fn colorblind(mut self, on: bool) -> Self {
        self.colorblind = on;
        self
    }
    #[inline]
    pub fn x_column(mut self, on: bool) -> Self {
        self.x_column = on;
        self
    }
    #[inline]
    pub fn flip(mut self, on: bool) -> Self {
        self.flip_xy = on;
        self
    }
    #[inline]
    pub fn stream(mut self, on: bool) -> Self {
        self.stream = on;
        self
    }
    /// Use an already resolved theme instead of the built-in palette.
    #[inline]
    pub fn theme(mut self, t: Theme) -> Self {
        self.theme = Some(t);
        self
    }

    /// # Errors
    /// [`ConfigError::GridTooSmall`] for grids under the minimum size.
    pub fn build(self) -> Result<Config, ConfigError> {
        let (width, height) = self.dims.unwrap_or_else(|| self.output.default_dims());
        if width < MIN_GRID || height < MIN_GRID {
            return Err(ConfigError::GridTooSmall {
                width,
                height,
                min: MIN_GRID,
            });
        }
        let palette = if self.colorblind {
            Palette::ColorblindSafe
        } else {
            Palette::Qualitative
        };
        Ok(Config {
            output: self.output,
            mode: self.mode,
            width,
            height,
            log_x: self.log_x,
            log_y: self.log_y,
            log_count: self.log_count,
            axis: self.axis,
            regression: self.regression,
            x_column: self.x_column,
            flip_xy: self.flip_xy,
            stream: self.stream,
            theme: self
                .theme
                .unwrap_or_else(|| Theme::resolve(palette, |_| None)),
        })
    }
}
