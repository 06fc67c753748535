//! Wolves: hunting predators with a hunt > wander priority order.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use crate::config::WolfConfig;
use crate::entity::{Growth, Vitals, SEPARATION_EPSILON};
use crate::sheep::Sheep;

/// A wolf. Burns energy faster than a sheep and sees farther than sheep can
/// sense danger; kills mature it.
#[derive(Debug, Clone)]
pub struct Wolf {
    pub vitals: Vitals,
    pub speed: f32,
    pub reproduction_cooldown: f32,
    pub growth: Growth,
    pub kill_count: u32,
    wander_seed: f32,
}

impl Wolf {
    pub fn new<R: Rng>(pos: Vec2, config: &WolfConfig, rng: &mut R) -> Self {
        Self {
            vitals: Vitals::new(pos, config.max_energy, config.radius),
            speed: config.speed,
            reproduction_cooldown: config.reproduction_cooldown,
            growth: Growth::Juvenile,
            kill_count: 0,
            wander_seed: rng.gen_range(0.0..TAU),
        }
    }

    /// Burn energy and tick down the reproduction cooldown. Starvation
    /// kills.
    pub fn metabolism(&mut self, dt: f32, config: &WolfConfig) {
        if !self.vitals.alive {
            return;
        }
        self.vitals.drain(config.hunger * dt);
        self.reproduction_cooldown = (self.reproduction_cooldown - dt).max(0.0);
    }

    /// Movement decision: chase the nearest visible sheep at full speed,
    /// otherwise wander at reduced speed.
    pub fn steer(&mut self, dt: f32, time: f32, sheep: &[Sheep], config: &WolfConfig) {
        if !self.vitals.alive {
            return;
        }

        if let Some((idx, dist)) = self.nearest_sheep(sheep) {
            if dist < config.vision_radius {
                let toward = sheep[idx].vitals.pos - self.vitals.pos;
                self.advance(toward, self.speed, dt);
                return;
            }
        }

        let angle = self.wander_seed + (time * 0.6 + self.wander_seed).sin() * PI;
        self.advance(Vec2::from_angle(angle), self.speed * config.wander_factor, dt);
    }

    /// Kill the first live sheep within contact distance. At most one kill
    /// per tick; the scan exits on the first successful feed. Returns true
    /// when a sheep was taken.
    pub fn feed(&mut self, sheep: &mut [Sheep], config: &WolfConfig) -> bool {
        if !self.vitals.alive {
            return false;
        }
        for prey in sheep.iter_mut() {
            if !prey.vitals.alive {
                continue;
            }
            if self.vitals.distance(prey.vitals.pos) < config.eat_radius {
                prey.vitals.alive = false;
                self.vitals.gain(config.feed_energy);
                self.kill_count += 1;
                self.try_mature(config);
                return true;
            }
        }
        false
    }

    /// Eligible to pair this frame?
    pub fn can_reproduce(&self, config: &WolfConfig) -> bool {
        self.vitals.alive
            && self.vitals.energy > config.reproduction_threshold
            && self.reproduction_cooldown <= 0.0
            && self.growth == Growth::Adult
    }

    /// Pay the energy cost of a successful pairing and restart the cooldown.
    pub fn pay_reproduction(&mut self, config: &WolfConfig) {
        self.vitals.drain(config.reproduction_cost);
        self.reproduction_cooldown = config.reproduction_cooldown;
    }

    fn try_mature(&mut self, config: &WolfConfig) {
        if self.growth == Growth::Adult || self.kill_count < config.growth_threshold {
            return;
        }
        self.growth = Growth::Adult;
        self.speed = config.speed * config.adult_factor;
        self.vitals.max_energy = config.max_energy * config.adult_factor;
        self.vitals.radius = config.radius * config.adult_factor;
    }

    fn advance(&mut self, dir: Vec2, speed: f32, dt: f32) {
        let len_sq = dir.length_squared();
        if len_sq > SEPARATION_EPSILON * SEPARATION_EPSILON {
            self.vitals.pos += dir / len_sq.sqrt() * speed * dt;
        }
    }

    /// Index and distance of the nearest live sheep, first-found wins ties.
    fn nearest_sheep(&self, sheep: &[Sheep]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, prey) in sheep.iter().enumerate() {
            if !prey.vitals.alive {
                continue;
            }
            let d = self.vitals.distance(prey.vitals.pos);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best
    }
}
