//! Runner that samples floor cells of a [`Grid`] against a density table.
//!
//! Cells are visited in scan order (rows top to bottom, ascending x within a row). Walls
//! are skipped without consuming randomness; every floor cell consumes exactly one draw
//! and is accepted iff the draw is below its density.
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::density::{expected_placements, DensityRaster, DensitySource, DensityTable};
use crate::grid::Grid;
use crate::sampling::bernoulli;
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::stream::seed_for_row;

/// Represents a sampled occupant at the center of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Source cell as `(x, y)`.
    pub cell: (usize, usize),
    /// Cell-center position, `(x + 0.5, y + 0.5)`.
    pub position: DVec2,
}

impl Placement {
    pub fn at_cell(x: usize, y: usize) -> Self {
        Self {
            cell: (x, y),
            position: DVec2::new(x as f64 + 0.5, y as f64 + 0.5),
        }
    }
}

/// How random draws are assigned to cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamMode {
    /// One stream consumed across the whole scan.
    #[default]
    Sequential,
    /// Each row draws from its own stream seeded with [`seed_for_row`]. The parent seed is
    /// the first `u64` taken from the supplied RNG, so a seeded RNG stays reproducible and
    /// rows are independent of the order they are sampled in.
    PerRow,
}

/// Configuration for a placement run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Stream assignment for random draws.
    pub streams: StreamMode,
    /// Bake densities into a per-cell raster once the table has at least this many regions.
    pub bake_threshold: Option<usize>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stream mode.
    pub fn with_streams(mut self, streams: StreamMode) -> Self {
        self.streams = streams;
        self
    }

    /// Sets the region count at which densities are baked per cell.
    pub fn with_bake_threshold(mut self, regions: usize) -> Self {
        self.bake_threshold = Some(regions);
        self
    }
}

/// Result of a placement run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Placements in scan order.
    pub placements: Vec<Placement>,
    /// Floor cells sampled.
    pub cells_evaluated: usize,
    /// Wall cells skipped.
    pub walls_skipped: usize,
    /// Sum of acceptance probabilities over floor cells.
    pub expected_placements: f64,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor cells that were sampled but not accepted.
    pub fn cells_rejected(&self) -> usize {
        self.cells_evaluated.saturating_sub(self.placements.len())
    }
}

pub struct ScatterRunner {
    /// Run configuration applied to this runner.
    pub config: RunConfig,
}

impl ScatterRunner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Samples `grid` against `table`, returning the result.
    pub fn run(&self, grid: &Grid, table: &DensityTable, rng: &mut impl Rng) -> RunResult {
        run_internal(grid, table, &self.config, rng, &mut ())
    }

    pub fn run_with_events(
        &self,
        grid: &Grid,
        table: &DensityTable,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> RunResult {
        run_internal(grid, table, &self.config, rng, sink)
    }
}

/// Sample every floor cell once in scan order and return the accepted cell centers.
pub fn generate<R: Rng>(grid: &Grid, table: &DensityTable, rng: &mut R) -> Vec<Placement> {
    let mut result = RunResult::new();
    for y in 0..grid.height() {
        sample_row(grid, table, y, rng, &mut (), &mut result);
    }
    result.placements
}

/// Sequential run over an arbitrary [`DensitySource`], reporting events to `sink`.
pub fn generate_with_events<R: Rng>(
    grid: &Grid,
    source: &dyn DensitySource,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> RunResult {
    sequential(grid, source, rng, sink)
}

fn sequential(
    grid: &Grid,
    source: &dyn DensitySource,
    rng: &mut dyn Rng,
    sink: &mut dyn EventSink,
) -> RunResult {
    let mut result = RunResult::new();
    for y in 0..grid.height() {
        sample_row(grid, source, y, rng, sink, &mut result);
    }
    result.expected_placements = expected_placements(grid, source);
    result
}

fn run_internal(
    grid: &Grid,
    table: &DensityTable,
    config: &RunConfig,
    rng: &mut dyn Rng,
    sink: &mut dyn EventSink,
) -> RunResult {
    if sink.wants(ScatterEventKind::RunStarted) {
        sink.send(ScatterEvent::RunStarted {
            size: grid.size(),
            region_count: table.regions().len(),
            streams: config.streams,
        });
    }

    if grid.is_empty() {
        warn!("Grid has no cells; nothing to place.");
        if sink.wants(ScatterEventKind::Warning) {
            sink.send(ScatterEvent::Warning {
                context: "grid".into(),
                message: "Grid has no cells".into(),
            });
        }
    }

    let baked;
    let source: &dyn DensitySource = match config.bake_threshold {
        Some(threshold) if table.regions().len() >= threshold => {
            debug!(
                "Baking {} regions over {}x{} cells.",
                table.regions().len(),
                grid.width(),
                grid.height()
            );
            baked = DensityRaster::bake(table, grid.width(), grid.height());
            &baked
        }
        _ => table,
    };

    let result = match config.streams {
        StreamMode::Sequential => sequential(grid, source, rng, sink),
        StreamMode::PerRow => {
            let base_seed = rng.next_u64();
            let mut result = RunResult::new();
            for y in 0..grid.height() {
                let mut row_rng = StdRng::seed_from_u64(seed_for_row(base_seed, y));
                sample_row(grid, source, y, &mut row_rng, sink, &mut result);
            }
            result.expected_placements = expected_placements(grid, source);
            result
        }
    };

    info!(
        "Placed {} of {} floor cells (expected {:.2}, {} walls skipped).",
        result.placements.len(),
        result.cells_evaluated,
        result.expected_placements,
        result.walls_skipped,
    );

    if sink.wants(ScatterEventKind::RunFinished) {
        sink.send(ScatterEvent::RunFinished {
            result: result.clone(),
        });
    }

    result
}

fn sample_row(
    grid: &Grid,
    source: &dyn DensitySource,
    y: usize,
    rng: &mut dyn Rng,
    sink: &mut dyn EventSink,
    result: &mut RunResult,
) {
    for x in 0..grid.width() {
        if grid.is_wall(x, y) {
            result.walls_skipped += 1;
            continue;
        }

        let density = source.density_at(x, y);
        let accepted = bernoulli(rng, density);
        result.cells_evaluated += 1;

        if sink.wants(ScatterEventKind::CellEvaluated) {
            sink.send(ScatterEvent::CellEvaluated {
                x,
                y,
                density,
                accepted,
            });
        }

        if accepted {
            let placement = Placement::at_cell(x, y);
            if sink.wants(ScatterEventKind::PlacementMade) {
                sink.send(ScatterEvent::PlacementMade { placement });
            }
            result.placements.push(placement);
        }
    }
}
