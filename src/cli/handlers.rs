use std::io::{self, BufRead, IsTerminal, Write};

use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    core::{
        bounds::{graph_dims, terminal_geometry},
        config::{Config, OutputKind},
        constants::ENV_PREFIX,
        data::{BlockReader, open_input},
        error::PlotError,
        theme::{Palette, Theme},
    },
    render::draw_to,
};

use super::parse::{Cli, FLIP_ENV};

const STDIN_HINT: &str = " -- Reading from stdin. Use `plotgrid -h` for usage info, ^D to exit.";

/// stderr logging. `RUST_LOG` wins over `--debug`.
pub fn init_logging(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    // a second init (tests, embedding) is harmless
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .try_init();
}

/// Theme override named `name`, read from `PLOTGRID_<name>`.
fn env_override(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{name}")).ok()
}

/// Turn parsed arguments into a finished [`Config`].
///
/// # Errors
/// [`PlotError::Config`] for grids below the minimum size.
pub fn config_from(cli: &Cli) -> Result<Config, PlotError> {
    let output = if cli.svg {
        OutputKind::Svg
    } else if cli.braille {
        OutputKind::Braille
    } else {
        OutputKind::Ascii
    };

    // svg has no terminal to fit
    let fit = cli.fit && output != OutputKind::Svg;
    let (default_w, default_h) = if fit {
        graph_dims(terminal_geometry(), output)
    } else {
        output.default_dims()
    };
    let (w, h) = cli.requested_dims(fit);
    let dims = (w.unwrap_or(default_w), h.unwrap_or(default_h));

    let (log_x, log_y, log_count) = cli.log_flags();
    let palette = if cli.colorblind {
        Palette::ColorblindSafe
    } else {
        Palette::Qualitative
    };

    let cfg = Config::builder(output)
        .mode(cli.mode)
        .dims(dims.0, dims.1)
        .log_x(log_x)
        .log_y(log_y)
        .log_count(log_count)
        .axis(!cli.no_axis)
        .regression(cli.regression)
        .colorblind(cli.colorblind)
        .x_column(cli.x_column)
        .flip(cli.wants_flip(std::env::var_os(FLIP_ENV).as_deref()))
        .stream(!cli.no_stream)
        .theme(Theme::resolve(palette, env_override))
        .build()?;
    debug!(output = ?cfg.output, width = cfg.width, height = cfg.height, "configured");
    Ok(cfg)
}

/// Read blocks until the input runs dry, rendering each one to `out`.
///
/// A block without rows ends the stream once something has been drawn;
/// a leading blank line is allowed. Blocks are separated by one newline.
///
/// # Errors
/// Reader, render and I/O failures, on the first block that hits one.
pub fn stream<R: BufRead, W: Write>(cfg: &Config, input: R, out: &mut W) -> Result<(), PlotError> {
    let mut reader = BlockReader::new(input, cfg.read_options());
    let mut rendered = false;
    loop {
        let block = reader.next_block()?;
        debug!(
            rows = block.dataset.rows(),
            columns = block.dataset.column_count(),
            end = block.end_of_stream,
            "block"
        );
        if block.dataset.is_empty() && rendered {
            return Ok(());
        }

        draw_to(cfg, &block.dataset, out)?;
        rendered = true;

        if block.end_of_stream {
            return Ok(());
        }
        out.write_all(b"\n")?;
        out.flush()?;
    }
}

/// Whole program: config, input, stream loop on stdout.
///
/// # Errors
/// Anything [`config_from`], [`open_input`] or [`stream`] reports.
pub fn plot(cli: &Cli) -> Result<(), PlotError> {
    let cfg = config_from(cli)?;
    let path = cli.file.as_deref().filter(|p| *p != "-");
    if path.is_none() && io::stdin().is_terminal() {
        eprintln!("{STDIN_HINT}");
    }
    info!(input = path.unwrap_or("<stdin>"), "reading");

    let input = open_input(path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    stream(&cfg, input, &mut out)
}
