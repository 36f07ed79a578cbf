use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;

use train_sim::simulation::{
    search_feasible_route, SearchConfig, SimWorld, Train, DEFAULT_DELTA_T, DEFAULT_MAX_TIME,
    DEFAULT_SEGMENT_COUNT, DEFAULT_TRAIN_MASS, DEFAULT_TRAIN_MAX_FORCE,
};

#[derive(Parser)]
#[command(name = "train_sim")]
#[command(about = "Single-train route simulation with generate-and-validate route search")]
struct Cli {
    /// Seed the route search starts from
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of segments per synthesized route
    #[arg(long, default_value_t = DEFAULT_SEGMENT_COUNT)]
    segments: usize,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 6000)]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value_t = DEFAULT_DELTA_T)]
    delta: f64,

    /// Simulated time budget for validating one route, in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_TIME)]
    max_time: f64,

    /// Train mass in kilograms
    #[arg(long, default_value_t = DEFAULT_TRAIN_MASS)]
    mass: f64,

    /// Largest force the train withstands, in newtons
    #[arg(long, default_value_t = DEFAULT_TRAIN_MAX_FORCE)]
    max_force: f64,

    /// Give up a route search after this many seeds
    #[arg(long, default_value_t = 100_000)]
    max_attempts: u64,

    /// Give up a route search after this many wall-clock seconds
    #[arg(long)]
    search_seconds: Option<u64>,

    /// Only search for a feasible route and print it
    #[arg(long)]
    search_only: bool,

    /// Print a summary every this many simulated seconds
    #[arg(long, default_value_t = 10.0)]
    report_every: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,train_sim=info"),
    )
    .init();

    let cli = Cli::parse();

    ensure!(cli.mass > 0.0, "train mass must be positive, got {}", cli.mass);
    ensure!(
        cli.max_force > 0.0,
        "train max force must be positive, got {}",
        cli.max_force
    );
    ensure!(cli.segments > 0, "a route needs at least one segment");
    ensure!(
        cli.delta > 0.0 && cli.delta.is_finite(),
        "time delta must be positive, got {}",
        cli.delta
    );

    let train = Train::new(cli.mass, cli.max_force);
    let config = SearchConfig {
        segment_count: cli.segments,
        max_time: cli.max_time,
        delta_t: cli.delta,
        max_attempts: Some(cli.max_attempts),
        time_budget: cli.search_seconds.map(Duration::from_secs),
        ..SearchConfig::default()
    };

    if cli.search_only {
        run_search(&train, cli.seed, &config)
    } else {
        run_headless(train, config, &cli)
    }
}

/// Find one feasible route and print it
fn run_search(train: &Train, seed: u64, config: &SearchConfig) -> Result<()> {
    let found = search_feasible_route(train, seed, config)
        .with_context(|| format!("No feasible route found starting at seed {}", seed))?;

    println!("Seed: {}", found.seed);
    println!("Completion time: {:.2}s", found.completion_time);
    println!(
        "End speed limit: {:.2}m/s",
        found.route.route_end_speed_limit()
    );
    for (index, segment) in found.route.segments().iter().enumerate() {
        println!("  {:>3}: {:?}", index, segment);
    }
    Ok(())
}

/// Run the live simulation in headless mode (no graphics)
fn run_headless(train: Train, config: SearchConfig, cli: &Cli) -> Result<()> {
    println!("Running train simulation in headless mode...");
    println!("Ticks: {}, Delta: {}s", cli.ticks, cli.delta);

    let ticks_per_report = (cli.report_every / cli.delta).ceil().max(1.0) as u32;
    println!();

    let mut world = SimWorld::new(train, config, cli.seed)
        .with_context(|| format!("No feasible route found starting at seed {}", cli.seed))?;

    println!("Initial state:");
    world.print_summary();
    world.draw_map();

    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_report.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(cli.delta);
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            f64::from(tick) * cli.delta
        );
        world.print_summary();
        world.draw_map();
    }

    info!("=== SIMULATION COMPLETE ===");
    info!("Simulated time: {:.2}s", world.stats.time);
    info!("Runs started: {}", world.stats.runs_started);
    info!("Runs completed: {}", world.stats.runs_completed);
    info!("Runs failed: {}", world.stats.total_failures());
    info!("Current seed: {}", world.seed);
    info!("Success rate: {:.1}%", world.stats.success_rate());

    Ok(())
}
