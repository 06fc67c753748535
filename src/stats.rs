//! Statistics tracking for the simulation.

use serde::{Deserialize, Serialize};

/// Read-only statistics snapshot published by the orchestrator. The host's
/// HUD renders this without touching simulation state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Elapsed simulation time in seconds
    pub time: f64,
    /// Ticks processed so far
    pub ticks: u64,
    /// Live grass tufts
    pub grass: usize,
    /// Live sheep (all stages)
    pub sheep: usize,
    /// Live adult sheep
    pub sheep_adults: usize,
    /// Live wolves (all stages)
    pub wolves: usize,
    /// Live adult wolves
    pub wolf_adults: usize,
    /// Cumulative sheep born
    pub sheep_births: u64,
    /// Cumulative wolves born
    pub wolf_births: u64,
    /// Cumulative sheep deaths (starvation, predation, boundary kills)
    pub sheep_deaths: u64,
    /// Cumulative wolf deaths
    pub wolf_deaths: u64,
    /// Times the extinction guard repopulated the world
    pub reseeds: u64,
}

impl StatsSnapshot {
    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:7.1} | Grass:{:4} | Sheep:{:4} ({} adult) | Wolves:{:3} ({} adult) | Born S:{} W:{} | Dead S:{} W:{}",
            self.time,
            self.grass,
            self.sheep,
            self.sheep_adults,
            self.wolves,
            self.wolf_adults,
            self.sheep_births,
            self.wolf_births,
            self.sheep_deaths,
            self.wolf_deaths,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded snapshots
    pub snapshots: Vec<StatsSnapshot>,
    /// Ticks between records
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with a recording interval in ticks
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// True when `tick` falls on the recording interval
    pub fn due(&self, tick: u64) -> bool {
        tick % self.interval == 0
    }

    /// Record a snapshot
    pub fn record(&mut self, stats: StatsSnapshot) {
        self.snapshots.push(stats);
    }

    /// Population over time as (tick, sheep, wolves) triples
    pub fn population_series(&self) -> Vec<(u64, usize, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.ticks, s.sheep, s.wolves))
            .collect()
    }

    /// Grass count over time
    pub fn grass_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.ticks, s.grass)).collect()
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
