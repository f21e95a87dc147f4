mod handlers;
pub mod parse;

use clap::Parser;
pub use handlers::{config_from, stream};
pub use parse::Cli;

use crate::core::error::PlotError;

/// Parse the command line, set up logging and plot the input.
///
/// # Errors
/// Configuration, input, render and I/O failures.
pub fn run() -> Result<(), PlotError> {
    let cli = Cli::parse();
    handlers::init_logging(cli.debug);
    handlers::plot(&cli)
}
