//! Kinematic bodies and their named force contributions
//!
//! A body carries position, velocity and a base acceleration that force
//! fields overwrite each frame. Standing forces (gravity on comets) live in a
//! small enum-keyed table and are summed in at integration time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Rect;

/// Names for standing force contributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceKind {
    /// Constant pull on comets
    Gravity,
    /// One-step push from a click
    Impulse,
}

impl ForceKind {
    /// Number of force slots in a table
    pub const COUNT: usize = 2;

    #[inline]
    fn slot(self) -> usize {
        match self {
            ForceKind::Gravity => 0,
            ForceKind::Impulse => 1,
        }
    }
}

/// Fixed-capacity force table, one optional vector per [`ForceKind`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceTable {
    slots: [Option<Vec2>; ForceKind::COUNT],
}

impl ForceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a force
    pub fn set(&mut self, kind: ForceKind, force: Vec2) {
        self.slots[kind.slot()] = Some(force);
    }

    /// Remove a force, returning the previous value
    pub fn remove(&mut self, kind: ForceKind) -> Option<Vec2> {
        self.slots[kind.slot()].take()
    }

    pub fn get(&self, kind: ForceKind) -> Option<Vec2> {
        self.slots[kind.slot()]
    }

    /// Sum of all present forces
    pub fn net(&self) -> Vec2 {
        self.slots.iter().flatten().fold(Vec2::ZERO, |acc, f| acc + *f)
    }
}

/// A simulated point with position, velocity and acceleration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Base acceleration, overwritten by force fields each frame
    pub accel: Vec2,
    pub forces: ForceTable,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn set_force(&mut self, kind: ForceKind, force: Vec2) {
        self.forces.set(kind, force);
    }

    pub fn remove_force(&mut self, kind: ForceKind) -> Option<Vec2> {
        self.forces.remove(kind)
    }

    /// Base acceleration plus every standing force
    #[inline]
    pub fn net_acceleration(&self) -> Vec2 {
        self.accel + self.forces.net()
    }

    /// Advance by `dt` seconds.
    ///
    /// Position takes the second-order term, velocity the first-order one:
    /// `p += a*dt²/2 + v*dt`, `v += a*dt`. A zero step leaves the body as is.
    pub fn integrate(&mut self, dt: f32) {
        if dt == 0.0 {
            return;
        }
        let a = self.net_acceleration();
        self.pos += a * (dt * dt / 2.0) + self.vel * dt;
        self.vel += a * dt;
    }

    /// Axis-aligned bounds of a bare point (1x1 box anchored at the position)
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, 1.0, 1.0)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec2, b: Vec2, tol: f32) -> bool {
        (a - b).abs().max_element() <= tol
    }

    #[test]
    fn test_force_table_insert_or_replace() {
        let mut table = ForceTable::new();
        assert_eq!(table.net(), Vec2::ZERO);
        table.set(ForceKind::Gravity, Vec2::new(0.0, 150.0));
        table.set(ForceKind::Gravity, Vec2::new(0.0, 10.0));
        assert_eq!(table.get(ForceKind::Gravity), Some(Vec2::new(0.0, 10.0)));
        assert_eq!(table.get(ForceKind::Impulse), None);

        table.set(ForceKind::Impulse, Vec2::new(3.0, 0.0));
        assert_eq!(table.net(), Vec2::new(3.0, 10.0));

        assert_eq!(table.remove(ForceKind::Impulse), Some(Vec2::new(3.0, 0.0)));
        assert_eq!(table.remove(ForceKind::Impulse), None);
        assert_eq!(table.net(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_standing_force_summed_with_base() {
        let mut body = Body::new(Vec2::ZERO);
        body.accel = Vec2::new(1.0, 0.0);
        body.set_force(ForceKind::Gravity, Vec2::new(0.0, 2.0));
        assert_eq!(body.net_acceleration(), Vec2::new(1.0, 2.0));

        body.integrate(1.0);
        assert!(approx(body.pos, Vec2::new(0.5, 1.0), 1e-6));
        assert!(approx(body.vel, Vec2::new(1.0, 2.0), 1e-6));
    }

    #[test]
    fn test_gravity_persists_across_steps() {
        let mut body = Body::new(Vec2::ZERO);
        body.set_force(ForceKind::Gravity, Vec2::new(0.0, 150.0));
        for _ in 0..10 {
            body.integrate(0.1);
        }
        // v = g*t exactly under this scheme
        assert!((body.vel.y - 150.0).abs() < 1e-3);
        // p = g*t²/2 exactly under this scheme
        assert!((body.pos.y - 75.0).abs() < 1e-2);
    }

    #[test]
    fn test_bounds_is_unit_box() {
        let body = Body::new(Vec2::new(4.0, 5.0));
        assert_eq!(body.bounds(), Rect::new(4.0, 5.0, 1.0, 1.0));
    }

    proptest! {
        #[test]
        fn prop_integrate_matches_closed_form(
            px in -1000.0f32..1000.0, py in -1000.0f32..1000.0,
            vx in -500.0f32..500.0, vy in -500.0f32..500.0,
            ax in -800.0f32..800.0, ay in -800.0f32..800.0,
            dt in 0.0f32..0.5,
        ) {
            let p0 = Vec2::new(px, py);
            let v0 = Vec2::new(vx, vy);
            let a = Vec2::new(ax, ay);
            let mut body = Body::new(p0).with_velocity(v0);
            body.accel = a;
            body.integrate(dt);

            let expected_p = p0 + v0 * dt + a * dt * dt / 2.0;
            let expected_v = v0 + a * dt;
            prop_assert!(approx(body.pos, expected_p, 1e-2));
            prop_assert!(approx(body.vel, expected_v, 1e-2));
        }

        #[test]
        fn prop_zero_dt_is_identity(
            px in -1000.0f32..1000.0, py in -1000.0f32..1000.0,
            vx in -500.0f32..500.0, vy in -500.0f32..500.0,
            ax in -800.0f32..800.0, ay in -800.0f32..800.0,
        ) {
            let mut body = Body::new(Vec2::new(px, py)).with_velocity(Vec2::new(vx, vy));
            body.accel = Vec2::new(ax, ay);
            body.set_force(ForceKind::Gravity, Vec2::new(0.0, 150.0));
            let before = body.clone();
            body.integrate(0.0);
            prop_assert_eq!(body, before);
        }
    }
}
