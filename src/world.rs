//! World orchestrator: owns the populations and runs the per-tick pipeline.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::entity::{resolve_collision, Bounds, Growth, Species};
use crate::grass::Grass;
use crate::sheep::Sheep;
use crate::stats::{StatsHistory, StatsSnapshot};
use crate::wolf::Wolf;

/// RGBA color with components in `[0, 1]`, handed to the host renderer.
pub type Color = [f32; 4];

/// Host-side rendering primitive. The engine hands each live entity's
/// position, radius and color to it; layout and windowing stay on the host.
pub trait Surface {
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// The simulation world
pub struct World {
    // Populations
    pub grass: Vec<Grass>,
    pub sheep: Vec<Sheep>,
    pub wolves: Vec<Wolf>,

    // Configuration
    pub config: Config,

    // Statistics
    pub stats_history: StatsHistory,

    bounds: Bounds,
    time: f64,
    ticks: u64,

    // Cumulative counters
    sheep_births: u64,
    wolf_births: u64,
    sheep_deaths: u64,
    wolf_deaths: u64,
    reseeds: u64,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Create a new world with the given configuration and a wall-clock
    /// derived seed.
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let bounds = Bounds::new(0.0, config.world.width, 0.0, config.world.height);
        let mut world = Self {
            grass: Vec::new(),
            sheep: Vec::new(),
            wolves: Vec::new(),
            stats_history: StatsHistory::new(config.logging.stats_interval),
            config,
            bounds,
            time: 0.0,
            ticks: 0,
            sheep_births: 0,
            wolf_births: 0,
            sheep_deaths: 0,
            wolf_deaths: 0,
            reseeds: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        };
        world.initialize();
        world
    }

    /// (Re)seed the whole population from scratch. Also the handler for an
    /// external reset command. Cumulative counters and the sim clock are
    /// left untouched so statistics stay cumulative across reseeds.
    pub fn initialize(&mut self) {
        self.grass.clear();
        self.sheep.clear();
        self.wolves.clear();

        let margin = self.config.world.spawn_margin;
        for _ in 0..self.config.grass.initial_count {
            let pos = self.bounds.random_interior(&mut self.rng, margin);
            self.grass.push(Grass::new(pos, &self.config.grass));
        }
        for _ in 0..self.config.sheep.initial_count {
            let pos = self.bounds.random_interior(&mut self.rng, margin);
            self.sheep.push(Sheep::new(pos, &self.config.sheep, &mut self.rng));
        }
        for _ in 0..self.config.wolves.initial_count {
            let pos = self.bounds.random_interior(&mut self.rng, margin);
            self.wolves.push(Wolf::new(pos, &self.config.wolves, &mut self.rng));
        }
    }

    /// Replace the world rectangle wholesale. Safe to call every frame,
    /// including before the first tick; entities left outside are handled
    /// by the normal boundary policy on the next tick.
    pub fn set_bounds(&mut self, x_min: f32, x_max: f32, y_min: f32, y_max: f32) {
        self.bounds = Bounds::new(x_min, x_max, y_min, y_max);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance the simulation by one frame.
    ///
    /// Non-finite or negative deltas are treated as zero so a bad host
    /// frame time can never corrupt energy or positions.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.time += f64::from(dt);

        self.update_grass(dt);
        let wolf_newborns = self.update_wolves(dt);
        let sheep_newborns = self.update_sheep(dt);
        self.resolve_collisions();
        self.commit_newborns(sheep_newborns, wolf_newborns);
        self.remove_dead();
        self.extinction_guard();

        self.ticks += 1;
        if self.stats_history.due(self.ticks) {
            let snapshot = self.statistics();
            self.stats_history.record(snapshot);
        }
    }

    /// Host-triggered manual injection. The point is not validated against
    /// the bounds: an out-of-bounds entity is lazily killed by the normal
    /// boundary check on the next tick.
    pub fn spawn(&mut self, species: Species, x: f32, y: f32) {
        let pos = Vec2::new(x, y);
        match species {
            Species::Grass => self.grass.push(Grass::new(pos, &self.config.grass)),
            Species::Sheep => self
                .sheep
                .push(Sheep::new(pos, &self.config.sheep, &mut self.rng)),
            Species::Wolf => self
                .wolves
                .push(Wolf::new(pos, &self.config.wolves, &mut self.rng)),
        }
        log::debug!("spawned {:?} at ({:.1}, {:.1})", species, x, y);
    }

    /// Current statistics snapshot. Read-only; callable from the host's
    /// render step.
    pub fn statistics(&self) -> StatsSnapshot {
        let sheep_adults = self
            .sheep
            .iter()
            .filter(|s| s.vitals.alive && s.growth == Growth::Adult)
            .count();
        let wolf_adults = self
            .wolves
            .iter()
            .filter(|w| w.vitals.alive && w.growth == Growth::Adult)
            .count();
        StatsSnapshot {
            time: self.time,
            ticks: self.ticks,
            grass: self.grass.iter().filter(|g| g.vitals.alive).count(),
            sheep: self.sheep.iter().filter(|s| s.vitals.alive).count(),
            sheep_adults,
            wolves: self.wolves.iter().filter(|w| w.vitals.alive).count(),
            wolf_adults,
            sheep_births: self.sheep_births,
            wolf_births: self.wolf_births,
            sheep_deaths: self.sheep_deaths,
            wolf_deaths: self.wolf_deaths,
            reseeds: self.reseeds,
        }
    }

    /// Hand every live entity's shape to the host renderer. Energy shows
    /// as opacity, so starving animals fade out.
    pub fn draw(&self, surface: &mut impl Surface) {
        for tuft in self.grass.iter().filter(|g| g.vitals.alive) {
            let v = &tuft.vitals;
            surface.circle(v.pos, v.radius, [0.0, 1.0, 0.0, v.energy_ratio()]);
        }
        for sheep in self.sheep.iter().filter(|s| s.vitals.alive) {
            let v = &sheep.vitals;
            surface.circle(v.pos, v.radius, [1.0, 1.0, 1.0, v.energy_ratio()]);
        }
        for wolf in self.wolves.iter().filter(|w| w.vitals.alive) {
            let v = &wolf.vitals;
            surface.circle(v.pos, v.radius, [0.55, 0.27, 0.07, v.energy_ratio()]);
        }
    }

    /// Elapsed simulation time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ----- pipeline phases -----

    /// Phase 1: probabilistic spawn, regeneration, lazy bounds-kill.
    fn update_grass(&mut self, dt: f32) {
        if self.rng.gen::<f32>() < self.config.grass.spawn_chance {
            let pos = self
                .bounds
                .random_interior(&mut self.rng, self.config.world.spawn_margin);
            self.grass.push(Grass::new(pos, &self.config.grass));
        }

        let bounds = self.bounds;
        for tuft in &mut self.grass {
            tuft.update(dt);
            // Grass never walks into a wall; finding it outside means the
            // bounds shrank over it.
            if !bounds.contains(tuft.vitals.pos) {
                tuft.vitals.alive = false;
            }
        }
    }

    /// Phase 2: wolves in index order, then buffered reproduction pairing.
    fn update_wolves(&mut self, dt: f32) -> Vec<Wolf> {
        let time = self.time as f32;
        let padding = self.config.world.bounds_padding;
        let kill_threshold = self.config.world.kill_threshold;

        for i in 0..self.wolves.len() {
            let config = &self.config.wolves;
            let wolf = &mut self.wolves[i];
            if !wolf.vitals.alive {
                continue;
            }
            wolf.metabolism(dt, config);
            wolf.steer(dt, time, &self.sheep, config);
            wolf.feed(&mut self.sheep, config);
            wolf.vitals.check_bounds(&self.bounds, padding, kill_threshold);
        }

        self.pair_wolves()
    }

    /// Phase 3: sheep in index order, then buffered reproduction pairing.
    fn update_sheep(&mut self, dt: f32) -> Vec<Sheep> {
        let time = self.time as f32;
        let padding = self.config.world.bounds_padding;
        let kill_threshold = self.config.world.kill_threshold;
        let bite = self.config.grass.bite;

        for i in 0..self.sheep.len() {
            let config = &self.config.sheep;
            let sheep = &mut self.sheep[i];
            if !sheep.vitals.alive {
                continue;
            }
            sheep.metabolism(dt, config);
            sheep.steer(dt, time, &self.wolves, &self.grass, config);
            sheep.graze(&mut self.grass, bite, config);
            sheep.vitals.check_bounds(&self.bounds, padding, kill_threshold);
        }

        self.pair_sheep()
    }

    /// Reproduction pairing for sheep: first eligible partner in iteration
    /// order within the pairing radius, one pairing per individual per
    /// tick. Offspring are buffered, never inserted mid-scan.
    fn pair_sheep(&mut self) -> Vec<Sheep> {
        let config = self.config.sheep.clone();
        let mut paired = vec![false; self.sheep.len()];
        let mut newborns = Vec::new();

        for i in 0..self.sheep.len() {
            if paired[i] || !self.sheep[i].can_reproduce(&config) {
                continue;
            }
            for j in (i + 1)..self.sheep.len() {
                if paired[j] || !self.sheep[j].can_reproduce(&config) {
                    continue;
                }
                let dist = self.sheep[i].vitals.distance(self.sheep[j].vitals.pos);
                if dist < config.reproduction_radius {
                    let pos = self.sheep[i].vitals.pos;
                    newborns.push(Sheep::new(pos, &config, &mut self.rng));
                    self.sheep[i].pay_reproduction(&config);
                    self.sheep[j].pay_reproduction(&config);
                    paired[i] = true;
                    paired[j] = true;
                    break;
                }
            }
        }
        newborns
    }

    /// Reproduction pairing for wolves, same mechanics as sheep.
    fn pair_wolves(&mut self) -> Vec<Wolf> {
        let config = self.config.wolves.clone();
        let mut paired = vec![false; self.wolves.len()];
        let mut newborns = Vec::new();

        for i in 0..self.wolves.len() {
            if paired[i] || !self.wolves[i].can_reproduce(&config) {
                continue;
            }
            for j in (i + 1)..self.wolves.len() {
                if paired[j] || !self.wolves[j].can_reproduce(&config) {
                    continue;
                }
                let dist = self.wolves[i].vitals.distance(self.wolves[j].vitals.pos);
                if dist < config.reproduction_radius {
                    let pos = self.wolves[i].vitals.pos;
                    newborns.push(Wolf::new(pos, &config, &mut self.rng));
                    self.wolves[i].pay_reproduction(&config);
                    self.wolves[j].pay_reproduction(&config);
                    paired[i] = true;
                    paired[j] = true;
                    break;
                }
            }
        }
        newborns
    }

    /// Phase 4: O(n²) pairwise overlap resolution within each species.
    /// Intentionally simple; populations are tens of individuals.
    fn resolve_collisions(&mut self) {
        for i in 0..self.sheep.len() {
            let (head, tail) = self.sheep.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                resolve_collision(&mut a.vitals, &mut b.vitals);
            }
        }
        for i in 0..self.wolves.len() {
            let (head, tail) = self.wolves.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                resolve_collision(&mut a.vitals, &mut b.vitals);
            }
        }
    }

    /// Phase 5: append buffered newborns and count births.
    fn commit_newborns(&mut self, sheep_newborns: Vec<Sheep>, wolf_newborns: Vec<Wolf>) {
        self.sheep_births += sheep_newborns.len() as u64;
        self.wolf_births += wolf_newborns.len() as u64;
        self.sheep.extend(sheep_newborns);
        self.wolves.extend(wolf_newborns);
    }

    /// Phase 6: drop dead entities, counting sheep and wolf deaths.
    /// Grass is removed silently.
    fn remove_dead(&mut self) {
        self.grass.retain(|g| g.vitals.alive);

        let sheep_before = self.sheep.len();
        self.sheep.retain(|s| s.vitals.alive);
        self.sheep_deaths += (sheep_before - self.sheep.len()) as u64;

        let wolves_before = self.wolves.len();
        self.wolves.retain(|w| w.vitals.alive);
        self.wolf_deaths += (wolves_before - self.wolves.len()) as u64;
    }

    /// Phase 7: the world must never stay empty. Losing every sheep
    /// triggers a full repopulation.
    fn extinction_guard(&mut self) {
        if self.sheep.is_empty() {
            self.reseeds += 1;
            log::info!(
                "sheep extinct at t={:.1}s; reseeding (reseed #{})",
                self.time,
                self.reseeds
            );
            self.initialize();
        }
    }
}
