use clap::Parser;
use tile_scatter_cli::{init_tracing, run, Cli};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(&cli)?;
    Ok(())
}
