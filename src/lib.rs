//! # Meadow
//!
//! Predator-prey ecosystem simulation engine: grass, sheep and wolves in a
//! bounded rectangular world.
//!
//! ## Features
//!
//! - **Self-contained engine**: the host supplies a frame delta and the
//!   world rectangle; the engine publishes entity shapes and statistics
//! - **Configurable**: YAML configuration with every behavioral constant
//!   as a named field
//! - **Reproducible**: seeded random number generation
//! - **Resilient**: extinction triggers an automatic reseed; degenerate
//!   frame deltas and world rectangles are absorbed, never propagated
//!
//! ## Quick Start
//!
//! ```rust
//! use meadow::{Config, World};
//!
//! let mut world = World::new_with_seed(Config::default(), 42);
//!
//! // Host render loop: one tick per frame.
//! for _ in 0..600 {
//!     world.tick(1.0 / 60.0);
//! }
//!
//! let stats = world.statistics();
//! println!("{}", stats.summary());
//! ```
//!
//! ## Host integration
//!
//! ```rust
//! use meadow::{Config, Species, World};
//!
//! let mut world = World::new(Config::default());
//!
//! // Viewport resized: replace the world rectangle wholesale.
//! world.set_bounds(0.0, 1920.0, 0.0, 1080.0);
//!
//! // God mode: drop a wolf where the user clicked.
//! world.spawn(Species::Wolf, 640.0, 360.0);
//! ```

pub mod config;
pub mod entity;
pub mod grass;
pub mod sheep;
pub mod stats;
pub mod wolf;
pub mod world;

// Re-export main types
pub use config::Config;
pub use entity::{Bounds, Growth, Species, Vitals};
pub use stats::{StatsHistory, StatsSnapshot};
pub use world::{Color, Surface, World};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick throughput measurement
pub fn benchmark(ticks: u64, dt: f32) -> BenchmarkResult {
    use std::time::Instant;

    let mut world = World::new(Config::default());

    let start = Instant::now();
    for _ in 0..ticks {
        world.tick(dt);
    }
    let elapsed = start.elapsed();

    let stats = world.statistics();
    BenchmarkResult {
        ticks,
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: ticks as f64 / elapsed.as_secs_f64(),
        final_sheep: stats.sheep,
        final_wolves: stats.wolves,
        reseeds: stats.reseeds,
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
    pub final_sheep: usize,
    pub final_wolves: usize,
    pub reseeds: u64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.0} ticks/s", self.ticks_per_second)?;
        writeln!(f, "Final sheep: {}", self.final_sheep)?;
        writeln!(f, "Final wolves: {}", self.final_wolves)?;
        writeln!(f, "Reseeds: {}", self.reseeds)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let mut world = World::new_with_seed(Config::default(), 1);
        for _ in 0..100 {
            world.tick(1.0 / 60.0);
        }
        assert_eq!(world.ticks(), 100);
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(100, 1.0 / 60.0);

        assert_eq!(result.ticks, 100);
        assert!(result.ticks_per_second > 0.0);
    }
}
