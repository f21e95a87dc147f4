//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

/// Precise configuration faults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min}×{min}, got {width}×{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("bad dimensions `{0}`, should be formatted like 72x40")]
    BadDims(String),
}

/// Top-level error type bubbled up by public APIs.
///
/// Contract violations inside the pipeline (scaler precondition, counter
/// misses) are not represented here; they panic.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A log-scaled axis met a value it cannot take the log of.
    #[error("floating point error: log({0})")]
    LogDomain(f64),
    #[error("codepoint out of range: {0:#x}")]
    CodePoint(u32),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
