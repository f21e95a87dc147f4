//! Aggregates the “business logic” layer.

pub mod bounds;
pub mod config;
pub mod constants;
pub mod counter;
pub mod data;
pub mod error;
pub mod regression;
pub mod scale;
pub mod theme;
pub mod transform;

// re-export frequently-used items for convenience
pub use bounds::{AxisPosition, Bounds};
pub use config::{Config, ConfigBuilder, Mode, OutputKind};
pub use counter::Counter;
pub use data::{BlockReader, Dataset, EMPTY, Point, ReadOptions};
pub use error::{ConfigError, PlotError};
pub use regression::{LinearFit, fit};
pub use scale::{PlotState, ScaledPoint};
pub use theme::{Palette, Theme};
pub use transform::Transform;
