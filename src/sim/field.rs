//! Force field models
//!
//! Each model turns scene state (pointer, clicks, time) into an acceleration
//! or a radius change for one body. They hold only tunables; scenes own the
//! bodies and the RNG.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::MIN_DISTANCE;
use crate::{centered, random_unit};

/// Pointer attraction with damping and random jitter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractionField {
    /// Acceleration magnitude at (or inside) `range`
    pub force: f32,
    /// Distance over which the pull starts falling off
    pub range: f32,
    /// Width of the uniform jitter added on each axis
    pub dispersal: f32,
}

impl AttractionField {
    /// Velocity damping factor in the raw direction
    const DAMPING: f32 = -0.5;
    /// Weight of the pointer offset in the raw direction
    const PULL: f32 = 2.0;

    /// Overwrite `body.accel` for this frame.
    ///
    /// The direction blends damping, pull toward the pointer and jitter; its
    /// magnitude is `force`, reduced by `range / distance` once the pointer is
    /// farther than `range`. Without a pointer only damping and jitter remain.
    pub fn accelerate<R: Rng + ?Sized>(&self, body: &mut Body, pointer: Option<Vec2>, rng: &mut R) {
        let (offset, falloff) = match pointer {
            Some(p) => {
                let offset = p - body.pos;
                let d = (offset.length() / self.range).max(MIN_DISTANCE);
                (offset, 1.0 / d)
            }
            None => (Vec2::ZERO, 1.0),
        };

        let jitter = Vec2::new(
            centered(rng, self.dispersal),
            centered(rng, self.dispersal),
        );
        let raw = body.vel * Self::DAMPING + offset * Self::PULL + jitter;
        body.accel = raw.normalize_or_zero() * falloff * self.force;
    }
}

/// One-shot radial push away from a click
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub range: f32,
    pub force: f32,
}

impl Explosion {
    /// Acceleration for a body at `pos`, scaled by `range / distance`.
    ///
    /// A body sitting on the origin is pushed in a random direction.
    pub fn impulse<R: Rng + ?Sized>(&self, pos: Vec2, origin: Vec2, rng: &mut R) -> Vec2 {
        let offset = pos - origin;
        let dist = offset.length();
        let dir = if dist > 0.0 {
            offset / dist
        } else {
            random_unit(rng)
        };
        dir * (self.range / dist.max(MIN_DISTANCE)) * self.force
    }
}

/// Grow near the pointer, shrink elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleResponse {
    /// Squared reach of the pointer
    pub reach_sq: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radius change per second
    pub speed: f32,
}

impl BubbleResponse {
    pub fn new(reach: f32, min_radius: f32, max_radius: f32, speed: f32) -> Self {
        Self {
            reach_sq: reach * reach,
            min_radius,
            max_radius,
            speed,
        }
    }

    /// Next radius for a bubble centred at `pos`
    pub fn step(&self, radius: f32, pos: Vec2, pointer: Option<Vec2>, dt: f32) -> f32 {
        let near = pointer.is_some_and(|p| pos.distance_squared(p) <= self.reach_sq);
        if near {
            (radius + dt * self.speed).min(self.max_radius)
        } else {
            (radius - dt * self.speed).max(self.min_radius)
        }
    }
}

/// Map a speed onto 0-1 opacity between `min_vel` and `max_vel`
pub fn speed_alpha(speed: f32, min_vel: f32, max_vel: f32) -> f32 {
    if max_vel <= min_vel {
        return 1.0;
    }
    (speed.clamp(min_vel, max_vel) - min_vel) / (max_vel - min_vel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> AttractionField {
        AttractionField {
            force: 800.0,
            range: 100.0,
            dispersal: 300.0,
        }
    }

    #[test]
    fn test_attraction_magnitude_near_pointer() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut body = Body::new(Vec2::new(50.0, 0.0));
        field().accelerate(&mut body, Some(Vec2::ZERO), &mut rng);
        // Within range: full force
        assert!((body.accel.length() - 800.0).abs() < 1e-2);
    }

    #[test]
    fn test_attraction_falls_off_with_distance() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut body = Body::new(Vec2::new(400.0, 0.0));
        field().accelerate(&mut body, Some(Vec2::ZERO), &mut rng);
        assert!((body.accel.length() - 200.0).abs() < 1e-2);
        // Pull of 2 * 400 dominates jitter of at most 150 per axis
        assert!(body.accel.x < 0.0);
    }

    #[test]
    fn test_attraction_without_pointer_is_jitter_only() {
        let mut rng = Pcg32::seed_from_u64(3);
        let f = AttractionField {
            dispersal: 0.0,
            ..field()
        };
        let mut body = Body::new(Vec2::new(10.0, 10.0));
        f.accelerate(&mut body, None, &mut rng);
        // Zero raw direction: normalization skipped, no NaN
        assert_eq!(body.accel, Vec2::ZERO);

        body.vel = Vec2::new(10.0, 0.0);
        f.accelerate(&mut body, None, &mut rng);
        assert!((body.accel - Vec2::new(-800.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn test_explosion_pushes_outward() {
        let mut rng = Pcg32::seed_from_u64(4);
        let boom = Explosion {
            range: 1800.0,
            force: 200.0,
        };
        let a = boom.impulse(Vec2::new(100.0, 0.0), Vec2::ZERO, &mut rng);
        assert!(a.x > 0.0);
        assert!((a.length() - 3600.0).abs() < 1e-1);

        // On the origin: random direction, distance floored at 1
        let a = boom.impulse(Vec2::ZERO, Vec2::ZERO, &mut rng);
        assert!(a.is_finite());
        assert!((a.length() - 360_000.0).abs() < 1.0);
    }

    #[test]
    fn test_bubble_grows_and_caps() {
        let bubble = BubbleResponse::new(150.0, 10.0, 40.0, 50.0);
        let pointer = Some(Vec2::new(100.0, 0.0));
        let mut r = 10.0;
        let mut prev = r;
        for _ in 0..120 {
            r = bubble.step(r, Vec2::ZERO, pointer, 1.0 / 60.0);
            assert!(r >= prev);
            assert!(r <= 40.0);
            prev = r;
        }
        assert_eq!(r, 40.0);
    }

    #[test]
    fn test_bubble_shrinks_without_pointer() {
        let bubble = BubbleResponse::new(150.0, 10.0, 40.0, 50.0);
        let mut r = 40.0;
        let mut prev = r;
        for _ in 0..120 {
            r = bubble.step(r, Vec2::ZERO, None, 1.0 / 60.0);
            assert!(r <= prev);
            assert!(r >= 10.0);
            prev = r;
        }
        assert_eq!(r, 10.0);
        // Pointer present but out of reach also shrinks
        assert_eq!(bubble.step(20.0, Vec2::ZERO, Some(Vec2::new(151.0, 0.0)), 0.1), 15.0);
    }

    #[test]
    fn test_speed_alpha() {
        assert_eq!(speed_alpha(0.0, 10.0, 150.0), 0.0);
        assert_eq!(speed_alpha(500.0, 10.0, 150.0), 1.0);
        assert!((speed_alpha(80.0, 10.0, 150.0) - 0.5).abs() < 1e-6);
        assert_eq!(speed_alpha(3.0, 5.0, 5.0), 1.0);
    }
}
