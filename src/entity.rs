//! Shared vital state and physics primitives for all entities.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum center distance below which two overlapping entities are treated
/// as coincident and left alone (avoids dividing by a near-zero separation).
pub const SEPARATION_EPSILON: f32 = 0.01;

/// The three kinds of entity the world can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Grass,
    Sheep,
    Wolf,
}

/// Discrete maturity stage. Promotion is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Growth {
    #[default]
    Juvenile,
    Adult,
}

/// Physical and vital state shared by every entity.
///
/// Invariants: `energy` stays in `[0, max_energy]` after every mutation,
/// and `alive` only ever transitions true -> false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    pub pos: Vec2,
    pub energy: f32,
    pub max_energy: f32,
    pub alive: bool,
    pub radius: f32,
}

impl Vitals {
    /// Create a live entity at full energy.
    pub fn new(pos: Vec2, max_energy: f32, radius: f32) -> Self {
        Self {
            pos,
            energy: max_energy,
            max_energy,
            alive: true,
            radius,
        }
    }

    /// Euclidean distance to a point. Every AI ranking uses this metric.
    pub fn distance(&self, other: Vec2) -> f32 {
        self.pos.distance(other)
    }

    /// Add energy, capped at `max_energy`.
    pub fn gain(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(self.max_energy);
    }

    /// Subtract energy. Hitting zero kills the entity.
    pub fn drain(&mut self, amount: f32) {
        self.energy -= amount;
        if self.energy <= 0.0 {
            self.energy = 0.0;
            self.alive = false;
        }
    }

    /// Fraction of maximum energy remaining, in `[0, 1]`.
    pub fn energy_ratio(&self) -> f32 {
        if self.max_energy > 0.0 {
            (self.energy / self.max_energy).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Enforce the world boundary with the dual clamp/kill policy.
    ///
    /// An entity within `radius + padding` of a wall walked into it and is
    /// clamped back to the safe margin. An entity found more than
    /// `kill_threshold` *past* the wall was overrun by a moving boundary
    /// (window shrink) and is killed rather than teleported.
    pub fn check_bounds(&mut self, bounds: &Bounds, padding: f32, kill_threshold: f32) {
        if !self.alive {
            return;
        }
        let pad = self.radius + padding;

        if self.pos.x < bounds.x_min + pad {
            if self.pos.x < bounds.x_min - kill_threshold {
                self.alive = false;
            } else {
                self.pos.x = bounds.x_min + pad;
            }
        } else if self.pos.x > bounds.x_max - pad {
            if self.pos.x > bounds.x_max + kill_threshold {
                self.alive = false;
            } else {
                self.pos.x = bounds.x_max - pad;
            }
        }

        if self.pos.y < bounds.y_min + pad {
            if self.pos.y < bounds.y_min - kill_threshold {
                self.alive = false;
            } else {
                self.pos.y = bounds.y_min + pad;
            }
        } else if self.pos.y > bounds.y_max - pad {
            if self.pos.y > bounds.y_max + kill_threshold {
                self.alive = false;
            } else {
                self.pos.y = bounds.y_max - pad;
            }
        }
    }
}

/// Push two overlapping entities apart by half the overlap each, along the
/// separation vector. Squared distances are compared first so the common
/// disjoint case never pays for a square root.
pub fn resolve_collision(a: &mut Vitals, b: &mut Vitals) {
    if !a.alive || !b.alive {
        return;
    }
    let min_dist = a.radius + b.radius;
    let delta = a.pos - b.pos;
    let dist_sq = delta.length_squared();
    if dist_sq >= min_dist * min_dist {
        return;
    }
    let dist = dist_sq.sqrt();
    if dist <= SEPARATION_EPSILON {
        // Coincident centers have no usable separation direction.
        return;
    }
    let push = delta / dist;
    let overlap = min_dist - dist;
    a.pos += push * (overlap * 0.5);
    b.pos -= push * (overlap * 0.5);
}

/// The world rectangle. Owned by the orchestrator and replaced wholesale on
/// resize; entities only ever read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Horizontal span, floored at 1 so degenerate rectangles (mid-resize
    /// transients) never produce an empty random range.
    pub fn width(&self) -> f32 {
        (self.x_max - self.x_min).max(1.0)
    }

    /// Vertical span, floored at 1.
    pub fn height(&self) -> f32 {
        (self.y_max - self.y_min).max(1.0)
    }

    /// Point-in-rectangle test (used by the lazy grass bounds-kill).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// Uniform random point inset from the walls by `margin`. The inset
    /// span is also floored at 1 so a tiny rectangle still yields a point.
    pub fn random_interior<R: Rng>(&self, rng: &mut R, margin: f32) -> Vec2 {
        let w = (self.width() - 2.0 * margin).max(1.0);
        let h = (self.height() - 2.0 * margin).max(1.0);
        Vec2::new(
            self.x_min + margin + rng.gen::<f32>() * w,
            self.y_min + margin + rng.gen::<f32>() * h,
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 1280.0, 0.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 800.0, 0.0, 600.0)
    }

    #[test]
    fn test_energy_capped_at_max() {
        let mut v = Vitals::new(Vec2::ZERO, 100.0, 10.0);
        v.energy = 90.0;
        v.gain(50.0);
        assert_eq!(v.energy, 100.0);
    }

    #[test]
    fn test_drain_kills_at_zero() {
        let mut v = Vitals::new(Vec2::ZERO, 100.0, 10.0);
        v.drain(150.0);
        assert_eq!(v.energy, 0.0);
        assert!(!v.alive);
    }

    #[test]
    fn test_shallow_violation_clamps() {
        // 10 units past the left wall: under the kill threshold, so the
        // entity is pushed back to the safe margin and survives.
        let mut v = Vitals::new(Vec2::new(-10.0, 300.0), 100.0, 10.0);
        v.check_bounds(&bounds(), 2.0, 50.0);
        assert!(v.alive);
        assert_eq!(v.pos.x, 12.0); // x_min + radius + padding
    }

    #[test]
    fn test_deep_violation_kills() {
        // 60 units past the wall: the boundary moved over the entity.
        let mut v = Vitals::new(Vec2::new(-60.0, 300.0), 100.0, 10.0);
        v.check_bounds(&bounds(), 2.0, 50.0);
        assert!(!v.alive);
    }

    #[test]
    fn test_surviving_entity_is_contained() {
        let b = bounds();
        for start in [
            Vec2::new(-20.0, -20.0),
            Vec2::new(820.0, 610.0),
            Vec2::new(400.0, 630.0),
            Vec2::new(400.0, 300.0),
        ] {
            let mut v = Vitals::new(start, 100.0, 10.0);
            v.check_bounds(&b, 2.0, 50.0);
            if v.alive {
                let pad = v.radius + 2.0;
                assert!(v.pos.x >= b.x_min + pad && v.pos.x <= b.x_max - pad);
                assert!(v.pos.y >= b.y_min + pad && v.pos.y <= b.y_max - pad);
            }
        }
    }

    #[test]
    fn test_collision_reduces_overlap() {
        let mut a = Vitals::new(Vec2::new(100.0, 100.0), 100.0, 10.0);
        let mut b = Vitals::new(Vec2::new(105.0, 100.0), 100.0, 10.0);
        let target = a.radius + b.radius;
        let before = (a.pos.distance(b.pos) - target).abs();
        resolve_collision(&mut a, &mut b);
        let after = (a.pos.distance(b.pos) - target).abs();
        assert!(after < before);
    }

    #[test]
    fn test_collision_skips_coincident_centers() {
        let mut a = Vitals::new(Vec2::new(100.0, 100.0), 100.0, 10.0);
        let mut b = Vitals::new(Vec2::new(100.0, 100.0), 100.0, 10.0);
        resolve_collision(&mut a, &mut b);
        // No usable direction: positions stay finite and unchanged.
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
        assert_eq!(b.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_disjoint_entities_untouched() {
        let mut a = Vitals::new(Vec2::new(100.0, 100.0), 100.0, 10.0);
        let mut b = Vitals::new(Vec2::new(200.0, 100.0), 100.0, 10.0);
        resolve_collision(&mut a, &mut b);
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
        assert_eq!(b.pos, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_degenerate_bounds_still_place_points() {
        let b = Bounds::new(100.0, 100.0, 50.0, 50.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let p = b.random_interior(&mut rng, 40.0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
