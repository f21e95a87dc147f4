use std::ffi::OsStr;

use clap::Parser;

use crate::core::{config::Mode, error::ConfigError};

/// Any value, even empty or `0`, turns flipping on.
pub const FLIP_ENV: &str = "PLOTGRID_FLIP";

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "plotgrid",
    version,
    about = "Plot columns of numbers as ASCII, braille or SVG",
    after_help = "SVG colours and widths can be overridden with PLOTGRID_BG_COLOR, \
                  PLOTGRID_BORDER_COLOR, PLOTGRID_AXIS_COLOR, PLOTGRID_COLOR0..8, \
                  PLOTGRID_BORDER_WIDTH, PLOTGRID_LINE_WIDTH and PLOTGRID_AXIS_WIDTH."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input path (use `-` or omit for stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Don't draw axes
    #[arg(short = 'A', long)]
    pub no_axis: bool,

    /// Render to UTF-8 braille characters
    #[arg(short, long, conflicts_with = "svg")]
    pub braille: bool,

    /// Render to SVG
    #[arg(short, long)]
    pub svg: bool,

    /// Use colourblind-safe default colours (SVG only)
    #[arg(short, long)]
    pub colorblind: bool,

    /// Width and height, e.g. `72x40` or `640x480`
    #[arg(short, long, value_name = "WxH", value_parser = parse_dims)]
    pub dims: Option<(usize, usize)>,

    /// Default width, overridden by `--dims`
    #[arg(long, env = "PLOTGRID_WIDTH", hide = true)]
    pub width: Option<usize>,

    /// Default height, overridden by `--dims`
    #[arg(long, env = "PLOTGRID_HEIGHT", hide = true)]
    pub height: Option<usize>,

    /// Size ascii/braille output to the terminal
    #[arg(long, conflicts_with = "dims")]
    pub fit: bool,

    /// Flip x & y axes (also on whenever PLOTGRID_FLIP is set)
    #[arg(short, long)]
    pub flip: bool,

    /// Any of `x`, `y`, `c`: log-scale X, Y and/or count
    #[arg(short, long, value_name = "xyc")]
    pub log: Option<String>,

    /// dot, count, line (line is SVG only)
    #[arg(short, long, default_value = "dot", value_parser = parse_mode)]
    pub mode: Mode,

    /// Draw linear regression lines (SVG only)
    #[arg(short, long)]
    pub regression: bool,

    /// Disable stream mode: read the whole input as one data set
    #[arg(short = 'S', long)]
    pub no_stream: bool,

    /// Treat the first column as X for all following Y columns
    #[arg(short, long)]
    pub x_column: bool,

    /// Emit debug diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// `(log_x, log_y, log_count)` from `--log`.
    #[must_use]
    pub fn log_flags(&self) -> (bool, bool, bool) {
        let l = self.log.as_deref().unwrap_or_default();
        (l.contains('x'), l.contains('y'), l.contains('c'))
    }

    /// `--flip`, or `PLOTGRID_FLIP` present with any value.
    #[must_use]
    pub fn wants_flip(&self, env_flip: Option<&OsStr>) -> bool {
        self.flip || env_flip.is_some()
    }

    /// `--dims` if given, else whatever the environment seeded. When `fit`
    /// is in effect the terminal decides and the seeds are ignored.
    #[must_use]
    pub fn requested_dims(&self, fit: bool) -> (Option<usize>, Option<usize>) {
        match self.dims {
            Some((w, h)) => (Some(w), Some(h)),
            None if fit => (None, None),
            None => (self.width, self.height),
        }
    }
}

/// `WxH` → `(W, H)`.
///
/// # Errors
/// [`ConfigError::BadDims`] when either side is missing or not a number.
pub fn parse_dims(s: &str) -> Result<(usize, usize), ConfigError> {
    let bad = || ConfigError::BadDims(s.to_owned());
    let (w, h) = s.split_once('x').ok_or_else(bad)?;
    let w = w.trim().parse().map_err(|_| bad())?;
    let h = h.trim().parse().map_err(|_| bad())?;
    Ok((w, h))
}

/// Matches on the first letter, so `c`, `cnt` and `count` all count.
///
/// # Errors
/// When the word starts with none of `d`, `c`, `l`.
pub fn parse_mode(s: &str) -> Result<Mode, String> {
    match s.chars().next() {
        Some('d') => Ok(Mode::Dot),
        Some('c') => Ok(Mode::Count),
        Some('l') => Ok(Mode::Line),
        _ => Err(format!("bad mode `{s}`: must be 'count', 'dot', or 'line'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("plotgrid").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dims_parse() {
        assert_eq!(parse_dims("72x40").unwrap(), (72, 40));
        assert_eq!(parse_dims("640x480").unwrap(), (640, 480));
        assert!(matches!(parse_dims("72"), Err(ConfigError::BadDims(_))));
        assert!(matches!(parse_dims("ax40"), Err(ConfigError::BadDims(_))));
        assert!(matches!(parse_dims("72x"), Err(ConfigError::BadDims(_))));
    }

    #[test]
    fn mode_by_first_letter() {
        assert_eq!(parse_mode("dot").unwrap(), Mode::Dot);
        assert_eq!(parse_mode("c").unwrap(), Mode::Count);
        assert_eq!(parse_mode("line").unwrap(), Mode::Line);
        assert!(parse_mode("scatter").is_err());
        assert!(parse_mode("").is_err());
    }

    #[test]
    fn short_flags() {
        let c = cli(&["-A", "-s", "-c", "-r", "-S", "-x", "-d", "640x480", "-l", "yc", "-m", "line", "data.txt"]);
        assert!(c.no_axis && c.svg && c.colorblind && c.regression && c.no_stream && c.x_column);
        assert_eq!(c.dims, Some((640, 480)));
        assert_eq!(c.log_flags(), (false, true, true));
        assert_eq!(c.mode, Mode::Line);
        assert_eq!(c.file.as_deref(), Some("data.txt"));
    }

    #[test]
    fn defaults() {
        let c = cli(&[]);
        assert_eq!(c.mode, Mode::Dot);
        assert_eq!(c.log_flags(), (false, false, false));
        assert!(c.file.is_none());
        assert!(!c.braille && !c.svg);
    }

    #[test]
    fn dims_override_seeded_size() {
        let mut c = cli(&["-d", "10x20"]);
        c.width = Some(99);
        c.height = Some(98);
        assert_eq!(c.requested_dims(false), (Some(10), Some(20)));
        c.dims = None;
        assert_eq!(c.requested_dims(false), (Some(99), Some(98)));
    }

    #[test]
    fn fit_outranks_seeded_size() {
        let mut c = cli(&["--fit"]);
        c.width = Some(99);
        c.height = Some(98);
        assert_eq!(c.requested_dims(true), (None, None));
    }

    #[test]
    fn flip_env_only_needs_to_exist() {
        let c = cli(&[]);
        assert!(!c.wants_flip(None));
        for v in ["", "0", "false", "yes"] {
            assert!(c.wants_flip(Some(OsStr::new(v))), "PLOTGRID_FLIP={v:?}");
        }
        assert!(cli(&["-f"]).wants_flip(None));
    }

    #[test]
    fn braille_and_svg_conflict() {
        let r = Cli::try_parse_from(["plotgrid", "-b", "-s"]);
        assert!(r.is_err());
    }
}
