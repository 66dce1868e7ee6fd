//! Boundary handling against rectangular regions
//!
//! Two policies, never combined on the same body:
//! - reflect-and-correct: push the body back onto the edge and flip the
//!   violated velocity component (bubbles)
//! - soft clamp: pin the position inside an oversized region, velocity
//!   untouched (attraction dots roaming past the visible edges)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// Axis-aligned rectangle, origin at top-left
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Rectangle centred on `center` with half extents `half`
    pub fn centered(center: Vec2, half: f32) -> Self {
        Self::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Grow by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2.0,
            self.h + margin * 2.0,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Which axes were reflected by [`reflect_and_correct`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Keep `own` (the body's bounds) inside `container`.
///
/// Each axis is checked independently: when the box leaves on a side the body
/// is translated so the box sits exactly on that edge and the velocity
/// component for that axis is negated.
pub fn reflect_and_correct(body: &mut Body, own: Rect, container: Rect) -> Bounce {
    let mut bounce = Bounce::default();

    if own.x < container.x {
        body.pos.x += container.x - own.x;
        body.vel.x = -body.vel.x;
        bounce.x = true;
    } else if own.right() > container.right() {
        body.pos.x += container.right() - own.right();
        body.vel.x = -body.vel.x;
        bounce.x = true;
    }

    if own.y < container.y {
        body.pos.y += container.y - own.y;
        body.vel.y = -body.vel.y;
        bounce.y = true;
    } else if own.bottom() > container.bottom() {
        body.pos.y += container.bottom() - own.bottom();
        body.vel.y = -body.vel.y;
        bounce.y = true;
    }

    bounce
}

/// Position clamp into an oversized region, velocity left alone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftClamp {
    pub min: Vec2,
    pub max: Vec2,
}

impl SoftClamp {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Region scaled from the viewport: `[-lo*w, hi*w] x [-lo*h, hi*h]`
    pub fn around_viewport(width: f32, height: f32, lo: f32, hi: f32) -> Self {
        Self::new(
            Vec2::new(-lo * width, -lo * height),
            Vec2::new(hi * width, hi * height),
        )
    }

    pub fn apply(&self, body: &mut Body) {
        body.pos = body.pos.clamp(self.min, self.max);
    }
}
