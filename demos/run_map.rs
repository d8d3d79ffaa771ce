// Run a map to completion under one coordination mode and print the report.
//
//   cargo run --example run_map -- --map maps/warehouse.txt --mode cooperative --render
//
// Set RUST_LOG=gridfleet=debug to see assignments, claims and deliveries.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use gridfleet::{Mode, SimConfig, Simulation};

/// Grid robots collecting tasks and delivering them to a collection point.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Map file (`X` wall, `R` robot, `M` task, `0` collection point).
    #[arg(long, default_value = "maps/small.txt")]
    map: PathBuf,

    /// Coordination mode: centralized, cooperative or decentralized.
    #[arg(long, default_value_t = Mode::Centralized)]
    mode: Mode,

    /// Seed for the exploration fallback.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Give up after this many ticks.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Print the grid after every tick.
    #[arg(long)]
    render: bool,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = SimConfig {
        mode: args.mode,
        seed: args.seed,
        tick_limit: Some(args.max_ticks),
    };
    let mut sim = match Simulation::from_file(&args.map, config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.map.display(), e);
            return ExitCode::from(2);
        }
    };

    if args.render {
        println!("{}", sim.grid_snapshot().render());
        while !sim.step() && sim.steps_taken() < args.max_ticks {
            println!("tick {}", sim.steps_taken());
            println!("{}", sim.grid_snapshot().render());
        }
        println!("{}", sim.report());
        return if sim.is_finished() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match sim.run() {
        Ok(report) => {
            println!("Strategy: {}", sim.strategy_name());
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", sim.report());
            ExitCode::FAILURE
        }
    }
}
