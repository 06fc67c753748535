//! Meadow CLI: headless host for the ecosystem engine.
//!
//! Runs the simulation for a bounded number of ticks and prints periodic
//! statistics; the graphical host lives elsewhere.

use clap::{Parser, Subcommand};
use meadow::{benchmark, Config, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "meadow")]
#[command(version)]
#[command(about = "Predator-prey ecosystem simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "meadow.yaml")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "3600")]
        ticks: u64,

        /// Fixed frame delta in seconds
        #[arg(long, default_value = "0.016666668")]
        dt: f32,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write the stats history JSON here when done
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run a quick throughput benchmark
    Bench {
        /// Number of ticks
        #[arg(short, long, default_value = "100000")]
        ticks: u64,
    },

    /// Generate a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "meadow.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            dt,
            seed,
            output,
            quiet,
        } => run_simulation(config, ticks, dt, seed, output, quiet),

        Commands::Bench { ticks } => run_benchmark(ticks),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    ticks: u64,
    dt: f32,
    seed: Option<u64>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    let mut world = if let Some(s) = seed {
        println!("Using seed: {}", s);
        World::new_with_seed(config, s)
    } else {
        World::new(config)
    };

    let summary_interval = world.config.logging.stats_interval.max(1);

    println!("Starting simulation");
    println!("  Ticks: {} at dt={:.4}s", ticks, dt);
    println!("  {}", world.statistics().summary());
    println!();

    let start = Instant::now();
    for i in 0..ticks {
        world.tick(dt);

        if !quiet && i % summary_interval == 0 {
            println!("{}", world.statistics().summary());
        }
    }
    let elapsed = start.elapsed();

    let stats = world.statistics();
    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s wall, {:.1}s simulated", elapsed.as_secs_f64(), stats.time);
    println!("Speed: {:.0} ticks/s", ticks as f64 / elapsed.as_secs_f64());
    println!("{}", stats.summary());
    println!("Reseeds: {}", stats.reseeds);
    println!("Seed: {}", world.seed());

    if let Some(path) = output {
        world
            .stats_history
            .save(path.to_str().ok_or("invalid output path")?)?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn run_benchmark(ticks: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Meadow Benchmark ===");
    println!("Ticks: {}", ticks);
    println!();

    let result = benchmark(ticks, 1.0 / 60.0);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
