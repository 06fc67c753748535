//! Grass tufts: the stationary, regenerating energy source.

use glam::Vec2;

use crate::config::GrassConfig;
use crate::entity::Vitals;

/// A tuft of grass. It never moves; it regenerates energy until a grazer
/// eats it, which destroys the tuft immediately.
#[derive(Debug, Clone)]
pub struct Grass {
    pub vitals: Vitals,
    regen: f32,
}

impl Grass {
    pub fn new(pos: Vec2, config: &GrassConfig) -> Self {
        Self {
            vitals: Vitals::new(pos, config.max_energy, config.radius),
            regen: config.regen,
        }
    }

    /// Regenerate stored energy toward the maximum.
    pub fn update(&mut self, dt: f32) {
        if !self.vitals.alive {
            return;
        }
        self.vitals.gain(self.regen * dt);
    }

    /// Eat the tuft. Returns the energy the grazer receives: at most one
    /// `bite`, less if the tuft held less. The tuft dies either way.
    pub fn consume(&mut self, bite: f32) -> f32 {
        if !self.vitals.alive {
            return 0.0;
        }
        let taken = bite.min(self.vitals.energy);
        self.vitals.energy = 0.0;
        self.vitals.alive = false;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GrassConfig {
        GrassConfig::default()
    }

    #[test]
    fn test_regen_capped_at_max() {
        let cfg = config();
        let mut grass = Grass::new(Vec2::new(10.0, 10.0), &cfg);
        grass.vitals.energy = cfg.max_energy - 1.0;
        grass.update(10.0);
        assert_eq!(grass.vitals.energy, cfg.max_energy);
    }

    #[test]
    fn test_consume_yields_one_bite_and_kills() {
        let cfg = config();
        let mut grass = Grass::new(Vec2::ZERO, &cfg);
        let taken = grass.consume(cfg.bite);
        assert_eq!(taken, cfg.bite);
        assert!(!grass.vitals.alive);
        assert_eq!(grass.vitals.energy, 0.0);
    }

    #[test]
    fn test_consume_depleted_tuft_yields_less() {
        let cfg = config();
        let mut grass = Grass::new(Vec2::ZERO, &cfg);
        grass.vitals.energy = 10.0;
        let taken = grass.consume(cfg.bite);
        assert_eq!(taken, 10.0);
        assert!(!grass.vitals.alive);
    }

    #[test]
    fn test_dead_tuft_is_inert() {
        let cfg = config();
        let mut grass = Grass::new(Vec2::ZERO, &cfg);
        grass.consume(cfg.bite);
        assert!(!grass.vitals.alive);

        grass.update(100.0);
        assert!(!grass.vitals.alive, "a dead tuft never resurrects");
        assert_eq!(grass.consume(cfg.bite), 0.0);
    }
}
