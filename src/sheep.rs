//! Sheep: grazing prey with a flee > forage > wander priority order.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use crate::config::SheepConfig;
use crate::entity::{Growth, Vitals, SEPARATION_EPSILON};
use crate::grass::Grass;
use crate::wolf::Wolf;

/// A sheep. Juveniles graze their way to adulthood; only adults reproduce.
#[derive(Debug, Clone)]
pub struct Sheep {
    pub vitals: Vitals,
    pub speed: f32,
    pub reproduction_cooldown: f32,
    pub growth: Growth,
    pub eaten_count: u32,
    /// Per-individual phase offset so wandering herds desynchronize.
    wander_seed: f32,
}

impl Sheep {
    pub fn new<R: Rng>(pos: Vec2, config: &SheepConfig, rng: &mut R) -> Self {
        Self {
            vitals: Vitals::new(pos, config.max_energy, config.radius),
            speed: config.speed,
            reproduction_cooldown: config.reproduction_cooldown,
            growth: Growth::Juvenile,
            eaten_count: 0,
            wander_seed: rng.gen_range(0.0..TAU),
        }
    }

    /// Burn energy and tick down the reproduction cooldown. Starvation
    /// kills.
    pub fn metabolism(&mut self, dt: f32, config: &SheepConfig) {
        if !self.vitals.alive {
            return;
        }
        self.vitals.drain(config.hunger * dt);
        self.reproduction_cooldown = (self.reproduction_cooldown - dt).max(0.0);
    }

    /// Movement decision for this frame, in strict priority order:
    /// flee the nearest wolf inside the panic radius, else head for the
    /// nearest grass inside the vision radius, else wander.
    pub fn steer(
        &mut self,
        dt: f32,
        time: f32,
        wolves: &[Wolf],
        grass: &[Grass],
        config: &SheepConfig,
    ) {
        if !self.vitals.alive {
            return;
        }

        // Danger pre-empts foraging entirely.
        if let Some((idx, dist)) = self.nearest_wolf(wolves) {
            if dist < config.panic_radius {
                let away = self.vitals.pos - wolves[idx].vitals.pos;
                self.advance(away, self.speed * config.flee_factor, dt);
                return;
            }
        }

        if let Some((idx, dist)) = self.nearest_grass(grass) {
            if dist < config.vision_radius {
                let toward = grass[idx].vitals.pos - self.vitals.pos;
                self.advance(toward, self.speed, dt);
                return;
            }
        }

        self.wander(dt, time, config);
    }

    /// Eat the nearest live tuft within contact distance, if any. Returns
    /// true when a tuft was consumed.
    pub fn graze(&mut self, grass: &mut [Grass], bite: f32, config: &SheepConfig) -> bool {
        if !self.vitals.alive {
            return false;
        }
        let Some((idx, dist)) = self.nearest_grass(grass) else {
            return false;
        };
        if dist >= config.eat_radius {
            return false;
        }
        let gained = grass[idx].consume(bite);
        self.vitals.gain(gained);
        self.eaten_count += 1;
        self.try_mature(config);
        true
    }

    /// Eligible to pair this frame?
    pub fn can_reproduce(&self, config: &SheepConfig) -> bool {
        self.vitals.alive
            && self.vitals.energy > config.reproduction_threshold
            && self.reproduction_cooldown <= 0.0
            && self.growth == Growth::Adult
    }

    /// Pay the energy cost of a successful pairing and restart the cooldown.
    pub fn pay_reproduction(&mut self, config: &SheepConfig) {
        self.vitals.drain(config.reproduction_cost);
        self.reproduction_cooldown = config.reproduction_cooldown;
    }

    /// One-way promotion once enough grass has been eaten: faster, larger,
    /// bigger energy reserve.
    fn try_mature(&mut self, config: &SheepConfig) {
        if self.growth == Growth::Adult || self.eaten_count < config.growth_threshold {
            return;
        }
        self.growth = Growth::Adult;
        self.speed = config.speed * config.adult_factor;
        self.vitals.max_energy = config.max_energy * config.adult_factor;
        self.vitals.radius = config.radius * config.adult_factor;
    }

    /// Smooth pseudo-random heading from a sinusoid of simulation time plus
    /// the per-entity seed, at cruising speed.
    fn wander(&mut self, dt: f32, time: f32, config: &SheepConfig) {
        let angle = self.wander_seed + (time * 0.6 + self.wander_seed).sin() * PI;
        self.advance(Vec2::from_angle(angle), self.speed * config.wander_factor, dt);
    }

    /// Move along `dir` normalized, skipping the frame when the direction
    /// is too short to normalize safely.
    fn advance(&mut self, dir: Vec2, speed: f32, dt: f32) {
        let len_sq = dir.length_squared();
        if len_sq > SEPARATION_EPSILON * SEPARATION_EPSILON {
            self.vitals.pos += dir / len_sq.sqrt() * speed * dt;
        }
    }

    /// Index and distance of the nearest live wolf. Ties resolve to the
    /// first wolf found at the minimum distance (strict less-than scan).
    fn nearest_wolf(&self, wolves: &[Wolf]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, wolf) in wolves.iter().enumerate() {
            if !wolf.vitals.alive {
                continue;
            }
            let d = self.vitals.distance(wolf.vitals.pos);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best
    }

    /// Index and distance of the nearest live tuft.
    fn nearest_grass(&self, grass: &[Grass]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, tuft) in grass.iter().enumerate() {
            if !tuft.vitals.alive {
                continue;
            }
            let d = self.vitals.distance(tuft.vitals.pos);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GrassConfig, WolfConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn sheep_at(x: f32, y: f32) -> Sheep {
        Sheep::new(Vec2::new(x, y), &SheepConfig::default(), &mut rng())
    }

    #[test]
    fn test_starvation_kills() {
        let cfg = SheepConfig::default();
        let mut sheep = sheep_at(100.0, 100.0);
        sheep.vitals.energy = 0.5;
        sheep.metabolism(1.0, &cfg);
        assert!(!sheep.vitals.alive);
        assert_eq!(sheep.vitals.energy, 0.0);
    }

    #[test]
    fn test_flee_overrides_foraging() {
        let cfg = SheepConfig::default();
        let mut sheep = sheep_at(100.0, 100.0);
        // Grass to the east, wolf closer to the west: both in range.
        let grass = vec![Grass::new(Vec2::new(140.0, 100.0), &GrassConfig::default())];
        let wolves = vec![Wolf::new(
            Vec2::new(60.0, 100.0),
            &WolfConfig::default(),
            &mut rng(),
        )];

        sheep.steer(0.1, 0.0, &wolves, &grass, &cfg);

        // Movement points away from the wolf, not toward the grass.
        assert!(sheep.vitals.pos.x > 100.0);
        // Fleeing is faster than full foraging speed.
        let moved = sheep.vitals.pos.x - 100.0;
        assert!((moved - cfg.speed * cfg.flee_factor * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_forages_toward_nearest_grass() {
        let cfg = SheepConfig::default();
        let mut sheep = sheep_at(100.0, 100.0);
        let grass = vec![
            Grass::new(Vec2::new(300.0, 100.0), &GrassConfig::default()),
            Grass::new(Vec2::new(160.0, 100.0), &GrassConfig::default()),
        ];

        sheep.steer(0.1, 0.0, &[], &grass, &cfg);

        // Heads east toward the closer tuft.
        assert!(sheep.vitals.pos.x > 100.0);
        assert_eq!(sheep.vitals.pos.y, 100.0);
    }

    #[test]
    fn test_wanders_when_nothing_in_range() {
        let cfg = SheepConfig::default();
        let mut sheep = sheep_at(100.0, 100.0);
        let start = sheep.vitals.pos;

        sheep.steer(0.1, 3.0, &[], &[], &cfg);

        let moved = sheep.vitals.pos.distance(start);
        assert!(moved > 0.0);
        // Cruising, not sprinting.
        assert!(moved <= cfg.speed * cfg.wander_factor * 0.1 + 1e-4);
        assert!(sheep.vitals.pos.is_finite());
    }

    #[test]
    fn test_graze_requires_contact() {
        let cfg = SheepConfig::default();
        let grass_cfg = GrassConfig::default();
        let mut sheep = sheep_at(100.0, 100.0);
        let mut grass = vec![Grass::new(Vec2::new(160.0, 100.0), &grass_cfg)];

        assert!(!sheep.graze(&mut grass, grass_cfg.bite, &cfg));
        assert!(grass[0].vitals.alive);

        grass[0].vitals.pos = Vec2::new(105.0, 100.0);
        sheep.vitals.energy = 50.0;
        assert!(sheep.graze(&mut grass, grass_cfg.bite, &cfg));
        assert!(!grass[0].vitals.alive);
        assert_eq!(sheep.vitals.energy, 50.0 + grass_cfg.bite);
        assert!(sheep.vitals.energy <= sheep.vitals.max_energy);
    }

    #[test]
    fn test_maturation_is_one_way() {
        let cfg = SheepConfig::default();
        let grass_cfg = GrassConfig::default();
        let mut sheep = sheep_at(100.0, 100.0);

        for _ in 0..cfg.growth_threshold {
            let mut grass = vec![Grass::new(Vec2::new(101.0, 100.0), &grass_cfg)];
            assert!(sheep.graze(&mut grass, grass_cfg.bite, &cfg));
        }

        assert_eq!(sheep.growth, Growth::Adult);
        assert_eq!(sheep.speed, cfg.speed * cfg.adult_factor);
        assert_eq!(sheep.vitals.max_energy, cfg.max_energy * cfg.adult_factor);
        assert_eq!(sheep.vitals.radius, cfg.radius * cfg.adult_factor);

        // Further grazing changes nothing about the stage.
        let speed = sheep.speed;
        let mut grass = vec![Grass::new(Vec2::new(101.0, 100.0), &grass_cfg)];
        sheep.graze(&mut grass, grass_cfg.bite, &cfg);
        assert_eq!(sheep.growth, Growth::Adult);
        assert_eq!(sheep.speed, speed);
    }

    #[test]
    fn test_reproduction_eligibility() {
        let cfg = SheepConfig::default();
        let mut sheep = sheep_at(100.0, 100.0);

        // Fresh juvenile with a running cooldown: not eligible.
        assert!(!sheep.can_reproduce(&cfg));

        sheep.growth = Growth::Adult;
        sheep.reproduction_cooldown = 0.0;
        sheep.vitals.energy = cfg.reproduction_threshold + 10.0;
        assert!(sheep.can_reproduce(&cfg));

        let before = sheep.vitals.energy;
        sheep.pay_reproduction(&cfg);
        assert!(sheep.vitals.energy < before);
        assert!(sheep.reproduction_cooldown > 0.0);
        assert!(!sheep.can_reproduce(&cfg));
    }
}
