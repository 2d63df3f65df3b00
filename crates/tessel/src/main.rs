use std::path::PathBuf;

use clap::Parser;
use tessel::world::TileRegistry;
use tessel::{DemoScenario, SimConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON); defaults to ./tessel.ron if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// World seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of steps to simulate (overrides config)
    #[arg(long)]
    steps: Option<u64>,

    /// Level width in tiles (overrides config)
    #[arg(long)]
    width: Option<i32>,

    /// Level height in tiles (overrides config)
    #[arg(long)]
    height: Option<i32>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,

    /// List registered tiles and exit
    #[arg(long)]
    list_tiles: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = SimConfig::load_from(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(steps) = args.steps {
        config.simulation.steps = steps;
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }

    let verbose = args.verbose || config.debug.verbose_logging;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "info" }),
    )
    .init();

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    if args.list_tiles {
        list_tiles();
        return Ok(());
    }

    log::info!(
        "Starting Tessel: seed {}, {}x{} tiles, {} steps",
        config.world.seed,
        config.world.width,
        config.world.height,
        config.simulation.steps
    );

    let mut scenario = DemoScenario::build(&config);
    let summary = scenario.run(config.simulation.steps);

    log::info!(
        "Finished {} steps: {} entities left, {} moves ({} succeeded), {} redraws",
        summary.steps,
        summary.entities_left,
        summary.totals.moves_attempted,
        summary.totals.moves_succeeded,
        summary.totals.redraw_cells
    );
    log::info!(
        "Items dropped {}, picked up {}; tiles destroyed {}; deaths {}",
        summary.items_dropped,
        summary.items_picked_up,
        summary.tiles_destroyed,
        summary.deaths
    );

    let registry = scenario.level.registry().clone();
    for (id, count) in &summary.tile_counts {
        log::info!("  {:>5} x {}", count, registry.get(*id).name());
    }

    Ok(())
}

fn list_tiles() {
    let registry = TileRegistry::new();
    println!("    id  name");
    for tile in registry.base_tiles() {
        println!("{:>6}  {}", tile.id(), tile.name());
    }
}
