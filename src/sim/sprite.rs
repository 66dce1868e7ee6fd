//! Drawable entities: circles, glowing stars and comets with tails

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, ForceKind};
use super::bounds::Rect;
use crate::renderer::{Glow, Rgba, Surface};

/// Fill or outline a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Fill,
    /// Outline with the given line width
    Stroke(f32),
}

/// A body drawn as a circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub body: Body,
    pub radius: f32,
    pub color: Rgba,
    pub paint: Paint,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32, color: Rgba, paint: Paint) -> Self {
        Self {
            body: Body::new(pos),
            radius,
            color,
            paint,
        }
    }

    pub fn filled(pos: Vec2, radius: f32, color: Rgba) -> Self {
        Self::new(pos, radius, color, Paint::Fill)
    }

    /// Bounding box of the disc
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.body.pos, self.radius)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.draw_with(surface, self.color);
    }

    /// Draw with a color override (per-frame opacity)
    pub fn draw_with(&self, surface: &mut dyn Surface, color: Rgba) {
        match self.paint {
            Paint::Fill => surface.fill_circle(self.body.pos, self.radius, color),
            Paint::Stroke(width) => surface.stroke_circle(self.body.pos, self.radius, width, color),
        }
    }
}

/// Blur radius of the star glow
const STAR_GLOW_BLUR: f32 = 5.0;
/// Star arm length as a multiple of the radius
const STAR_ARM: f32 = 5.0;

/// A static eight-pointed glow point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub circle: Circle,
    pub glow: Rgba,
}

impl Star {
    pub fn new(pos: Vec2, radius: f32, color: Rgba, glow: Rgba) -> Self {
        Self {
            circle: Circle::filled(pos, radius, color),
            glow,
        }
    }

    /// Outline of the four long arms and four short waists, starting left
    pub fn outline(&self) -> [Vec2; 8] {
        let c = self.circle.body.pos;
        let d = self.circle.radius * STAR_ARM;
        let p = self.circle.radius;
        [
            c + Vec2::new(-d, 0.0),
            c + Vec2::new(-p, p),
            c + Vec2::new(0.0, d),
            c + Vec2::new(p, p),
            c + Vec2::new(d, 0.0),
            c + Vec2::new(p, -p),
            c + Vec2::new(0.0, -d),
            c + Vec2::new(-p, -p),
        ]
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.set_glow(Some(Glow {
            color: self.glow,
            blur: STAR_GLOW_BLUR,
        }));
        surface.fill_polygon(&self.outline(), self.glow);
        self.circle.draw(surface);
        surface.set_glow(None);
    }
}

/// Blur radius of the comet glow
const COMET_GLOW_BLUR: f32 = 10.0;

/// A falling head with a triangular tail trailing toward -x
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comet {
    pub circle: Circle,
    /// Head y before the last update
    pub prev_y: f32,
    /// Vertical offset of the tail tip (`prev_y - y`)
    pub tail_dy: f32,
    pub tail_length: f32,
}

impl Comet {
    pub fn new(pos: Vec2, radius: f32, color: Rgba, vel: Vec2, gravity: f32, tail_length: f32) -> Self {
        let mut circle = Circle::filled(pos, radius, color);
        circle.body.vel = vel;
        circle.body.set_force(ForceKind::Gravity, Vec2::new(0.0, gravity));
        Self {
            circle,
            prev_y: pos.y,
            tail_dy: 0.0,
            tail_length,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.prev_y = self.circle.body.pos.y;
        self.circle.body.integrate(dt);
        self.tail_dy = self.prev_y - self.circle.body.pos.y;
    }

    /// Reuse this comet at a new spot instead of reallocating it
    pub fn recycle(&mut self, pos: Vec2, vel_y: f32) {
        self.circle.body.pos = pos;
        self.circle.body.vel.y = vel_y;
        self.prev_y = pos.y;
        self.tail_dy = 0.0;
    }

    /// Tail triangle: head top, tip, head bottom
    pub fn tail(&self) -> [Vec2; 3] {
        let head = self.circle.body.pos;
        let r = self.circle.radius;
        [
            head + Vec2::new(0.0, -r),
            head + Vec2::new(-self.tail_length, self.tail_dy),
            head + Vec2::new(0.0, r),
        ]
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.set_glow(Some(Glow {
            color: Rgba::WHITE,
            blur: COMET_GLOW_BLUR,
        }));
        surface.fill_polygon(&self.tail(), self.circle.color);
        self.circle.draw(surface);
        surface.set_glow(None);
    }
}

/// Anything a scene can draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sprite {
    Star(Star),
    Comet(Comet),
}

impl Sprite {
    pub fn body(&self) -> &Body {
        match self {
            Sprite::Star(s) => &s.circle.body,
            Sprite::Comet(c) => &c.circle.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Sprite::Star(s) => &mut s.circle.body,
            Sprite::Comet(c) => &mut c.circle.body,
        }
    }

    /// Stars hold still; comets integrate
    pub fn update(&mut self, dt: f32) {
        match self {
            Sprite::Star(_) => {}
            Sprite::Comet(c) => c.update(dt),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Sprite::Star(s) => s.draw(surface),
            Sprite::Comet(c) => c.draw(surface),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MeshSurface;

    #[test]
    fn test_circle_bounds() {
        let c = Circle::filled(Vec2::new(10.0, 20.0), 4.0, Rgba::WHITE);
        assert_eq!(c.bounds(), Rect::new(6.0, 16.0, 8.0, 8.0));
    }

    #[test]
    fn test_comet_tail_tracks_vertical_motion() {
        let mut comet = Comet::new(Vec2::new(0.0, 100.0), 5.0, Rgba::WHITE, Vec2::new(800.0, -150.0), 150.0, 50.0);
        assert_eq!(comet.circle.body.forces.get(ForceKind::Gravity), Some(Vec2::new(0.0, 150.0)));

        comet.update(0.1);
        // Rising: y shrinks so the tail tip points down
        assert!(comet.tail_dy > 0.0);
        assert!((comet.tail_dy - (100.0 - comet.circle.body.pos.y)).abs() < 1e-4);
        let tail = comet.tail();
        assert_eq!(tail[1].x, comet.circle.body.pos.x - 50.0);

        comet.recycle(Vec2::new(-20.0, 300.0), -150.0);
        assert_eq!(comet.tail_dy, 0.0);
        assert_eq!(comet.prev_y, 300.0);
        assert_eq!(comet.circle.body.vel, Vec2::new(800.0, -150.0));
    }

    #[test]
    fn test_star_does_not_move() {
        let mut sprite = Sprite::Star(Star::new(Vec2::new(5.0, 5.0), 1.5, Rgba::WHITE, Rgba::WHITE));
        sprite.body_mut().vel = Vec2::new(100.0, 100.0);
        sprite.update(1.0);
        assert_eq!(sprite.body().pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_star_outline_extent() {
        let star = Star::new(Vec2::ZERO, 2.0, Rgba::WHITE, Rgba::WHITE);
        let outline = star.outline();
        assert_eq!(outline[0], Vec2::new(-10.0, 0.0));
        assert_eq!(outline[6], Vec2::new(0.0, -10.0));
    }

    #[test]
    fn test_draw_resets_glow() {
        let mut surface = MeshSurface::new(100.0, 100.0);
        Sprite::Comet(Comet::new(Vec2::new(50.0, 50.0), 5.0, Rgba::WHITE, Vec2::ZERO, 0.0, 50.0))
            .draw(&mut surface);
        assert!(surface.glow().is_none());
        assert_eq!(surface.draw_calls(), 2);
    }
}
