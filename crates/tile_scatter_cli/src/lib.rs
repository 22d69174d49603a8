#![forbid(unsafe_code)]
//! Command line front end: load a map and a region table, sample placements, write them out.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tile_scatter::prelude::*;
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Place occupants on floor cells of a tile map by region density", long_about = None)]
pub struct Cli {
    /// Map file: one row per line, whitespace-separated markers, non-zero integers are walls.
    #[arg(long, default_value = "map.txt")]
    pub map: PathBuf,

    /// Output file for placements, one `x y` pair per line.
    #[arg(long, default_value = "enemies.txt")]
    pub out: PathBuf,

    /// RON region table. Without it every floor cell uses the default density.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Density for cells outside every region; overrides the config value.
    #[arg(long)]
    pub default_density: Option<f64>,

    /// Seed for reproducible runs; overrides the config value.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw each row from its own seeded stream.
    #[arg(long)]
    pub row_streams: bool,
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub seed: u64,
    pub placed: usize,
    pub out: PathBuf,
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

pub fn run(cli: &Cli) -> Result<RunSummary> {
    let mut config = match &cli.config {
        Some(path) => ScatterConfig::load(path)
            .with_context(|| format!("load region config {}", path.display()))?,
        None => ScatterConfig::default(),
    };
    if let Some(density) = cli.default_density {
        config.default_density = density;
    }
    let table = config.to_table().context("invalid region config")?;

    let grid = Grid::load(&cli.map).with_context(|| format!("load map {}", cli.map.display()))?;
    info!(
        "Map {}: {}x{} ({} floor cells), {} regions.",
        cli.map.display(),
        grid.width(),
        grid.height(),
        grid.floor_count(),
        table.regions().len()
    );

    let seed = cli.seed.or(config.seed).unwrap_or_else(fresh_seed);
    info!("Seed {seed}.");

    let streams = if cli.row_streams {
        StreamMode::PerRow
    } else {
        StreamMode::Sequential
    };
    let runner = ScatterRunner::new(RunConfig::new().with_streams(streams));
    let mut rng = StdRng::seed_from_u64(seed);
    let result = runner.run(&grid, &table, &mut rng);

    write_placements_file(&cli.out, &result.placements)
        .with_context(|| format!("write placements to {}", cli.out.display()))?;
    info!(
        "Placed {} placements -> {}.",
        result.placements.len(),
        cli.out.display()
    );

    Ok(RunSummary {
        seed,
        placed: result.placements.len(),
        out: cli.out.clone(),
    })
}

fn fresh_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    seed_for_row(nanos ^ u64::from(std::process::id()), 0)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn cli_for(dir: &std::path::Path) -> Cli {
        Cli::parse_from([
            "tile-scatter",
            "--map",
            dir.join("map.txt").to_str().unwrap(),
            "--out",
            dir.join("out.txt").to_str().unwrap(),
            "--config",
            dir.join("regions.ron").to_str().unwrap(),
        ])
    }

    fn write_inputs(dir: &std::path::Path) {
        fs::write(
            dir.join("map.txt"),
            "0 0 0 0 0\n0 0 0 0 0\n\n0 0 0 0 0\n0 0 0 0 0\n0 0 0 0 0\n",
        )
        .unwrap();
        fs::write(
            dir.join("regions.ron"),
            "(default_density: 0.0, regions: [(x1: 1, y1: 1, x2: 2, y2: 2, density: 1.0)])",
        )
        .unwrap();
    }

    #[test]
    fn defaults_match_conventional_file_names() {
        let cli = Cli::parse_from(["tile-scatter"]);
        assert_eq!(cli.map, PathBuf::from("map.txt"));
        assert_eq!(cli.out, PathBuf::from("enemies.txt"));
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.row_streams);
    }

    #[test]
    fn certain_region_writes_its_cells() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_inputs(dir);
        let summary = run(&cli_for(dir)).expect("run succeeds");
        assert_eq!(summary.placed, 4);
        assert_eq!(
            fs::read_to_string(dir.join("out.txt")).unwrap(),
            "1.5 1.5\n2.5 1.5\n1.5 2.5\n2.5 2.5\n"
        );
    }

    #[test]
    fn seeded_runs_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_inputs(dir);
        let mut cli = cli_for(dir);
        cli.default_density = Some(0.3);
        cli.seed = Some(42);

        run(&cli).expect("first run");
        let first = fs::read(dir.join("out.txt")).unwrap();
        run(&cli).expect("second run");
        let second = fs::read(dir.join("out.txt")).unwrap();
        assert_eq!(first, second);

        cli.row_streams = true;
        let summary = run(&cli).expect("row stream run");
        assert_eq!(summary.seed, 42);
    }

    #[test]
    fn ragged_map_fails_without_output() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_inputs(dir);
        fs::write(dir.join("map.txt"), "0 0 0\n0 0\n").unwrap();
        let err = run(&cli_for(dir)).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(!dir.join("out.txt").exists());
    }

    #[test]
    fn out_of_range_default_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_inputs(dir);
        let mut cli = cli_for(dir);
        cli.default_density = Some(1.5);
        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("outside [0, 1]"));
    }

    #[test]
    fn missing_map_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        write_inputs(dir);
        fs::remove_file(dir.join("map.txt")).unwrap();
        assert!(run(&cli_for(dir)).is_err());
    }
}
