#![forbid(unsafe_code)]
//! tile_scatter: density-region placement sampling over tile grids.
//!
//! Modules:
//! - grid: load wall/floor grids from whitespace-delimited text
//! - density: ordered density regions, first-match resolution, baked per-cell cache
//! - sampling: uniform draws used by the sampler
//! - scatter: runner, per-row streams, events
//! - output: flat text placement writer
//! - config: RON region tables (features `serde` + `ron`)
#[cfg(feature = "serde")]
pub mod config;
pub mod density;
pub mod error;
pub mod grid;
pub mod output;
pub mod sampling;
pub mod scatter;

/// Convenient re-exports for common types. Import with `use tile_scatter::prelude::*;`.
pub mod prelude {
    #[cfg(feature = "serde")]
    pub use crate::config::{RegionDef, ScatterConfig};
    pub use crate::density::{
        expected_placements, DensityRaster, DensityRegion, DensitySource, DensityTable,
    };
    pub use crate::error::{Error, Result};
    pub use crate::grid::{is_wall_marker, Grid};
    pub use crate::output::{write_placements, write_placements_file};
    pub use crate::scatter::events::{
        EventSink, FnSink, ScatterEvent, ScatterEventKind, VecSink,
    };
    pub use crate::scatter::runner::{
        generate, generate_with_events, Placement, RunConfig, RunResult, ScatterRunner,
        StreamMode,
    };
    pub use crate::scatter::stream::seed_for_row;
}
