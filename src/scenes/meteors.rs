//! Meteor shower: comets arcing across a field of glowing stars
//!
//! Comets are pooled. One that flies past the right edge is moved back to
//! just left of the screen with a fresh height instead of being replaced.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::{Background, Surface};
use crate::settings::{MeteorSettings, QualityPreset};
use crate::sim::{Comet, Scene, Sprite, Star, Viewport};

/// Horizontal nudge so fresh comets can start just off the left edge
const SPAWN_LEAD_IN: f32 = 10.0;

pub struct MeteorScene {
    settings: MeteorSettings,
    comet_count: usize,
    star_count: usize,
    sprites: Vec<Sprite>,
    recycled: u64,
    rng: Pcg32,
}

impl MeteorScene {
    pub fn new(settings: MeteorSettings, quality: QualityPreset, seed: u64) -> Self {
        Self {
            comet_count: quality.scale(settings.comet_count),
            star_count: quality.scale(settings.star_count),
            settings,
            sprites: Vec::new(),
            recycled: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Comets first, then stars
    pub fn seed(&mut self, viewport: Viewport) {
        let mut sprites = Vec::with_capacity(self.comet_count + self.star_count);
        for _ in 0..self.comet_count {
            let pos = Vec2::new(
                self.rng.random::<f32>() * viewport.width - SPAWN_LEAD_IN,
                self.band_y(viewport.height),
            );
            let vx = self.launch_speed();
            sprites.push(Sprite::Comet(Comet::new(
                pos,
                self.settings.comet_radius,
                self.settings.comet_color,
                Vec2::new(vx, self.settings.comet_launch_vy),
                self.settings.gravity,
                self.settings.tail_length,
            )));
        }
        for _ in 0..self.star_count {
            let pos = Vec2::new(
                self.rng.random::<f32>() * viewport.width,
                self.rng.random::<f32>() * viewport.height,
            );
            let radius = self.rng.random::<f32>() * self.settings.star_max_radius;
            sprites.push(Sprite::Star(Star::new(
                pos,
                radius,
                self.settings.star_color,
                self.settings.star_color,
            )));
        }
        self.sprites = sprites;
        log::info!(
            "Meteors: seeded {} comets and {} stars",
            self.comet_count,
            self.star_count
        );
    }

    /// Height inside the spawn band
    fn band_y(&mut self, height: f32) -> f32 {
        (self.rng.random::<f32>() + self.settings.band_offset) * height * self.settings.band_scale
    }

    fn launch_speed(&mut self) -> f32 {
        let (lo, hi) = (self.settings.comet_speed_min, self.settings.comet_speed_max);
        if hi > lo { self.rng.random_range(lo..hi) } else { lo }
    }

    /// Vertical extent `[top, bottom)` of the spawn band
    pub fn band(&self, height: f32) -> (f32, f32) {
        let scale = height * self.settings.band_scale;
        (
            self.settings.band_offset * scale,
            (1.0 + self.settings.band_offset) * scale,
        )
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn sprites_mut(&mut self) -> &mut [Sprite] {
        &mut self.sprites
    }

    pub fn comets(&self) -> impl Iterator<Item = &Comet> {
        self.sprites.iter().filter_map(|s| match s {
            Sprite::Comet(c) => Some(c),
            _ => None,
        })
    }

    /// Total recycle events since seeding
    pub fn recycled(&self) -> u64 {
        self.recycled
    }
}

impl Scene for MeteorScene {
    fn name(&self) -> &'static str {
        "meteors"
    }

    fn background(&self) -> Background {
        Background::Fill(self.settings.background)
    }

    fn update(&mut self, dt: f32, viewport: Viewport) {
        let limit = viewport.width + self.settings.recycle_margin;
        let lead = self.settings.recycle_margin.max(1.0);
        let vy = self.settings.comet_launch_vy;

        for i in 0..self.sprites.len() {
            self.sprites[i].update(dt);

            let overshoot = match &self.sprites[i] {
                Sprite::Comet(c) if c.circle.body.pos.x > limit => c.circle.body.pos.x - limit,
                _ => continue,
            };
            // Keep the sub-margin remainder so recycled comets stay staggered
            let x = overshoot.rem_euclid(lead) - lead;
            let y = self.band_y(viewport.height);
            if let Sprite::Comet(comet) = &mut self.sprites[i] {
                comet.recycle(Vec2::new(x, y), vy);
                self.recycled += 1;
                log::debug!("Meteors: comet {i} recycled to ({x:.0}, {y:.0})");
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for sprite in &self.sprites {
            sprite.draw(surface);
        }
    }

    fn resize(&mut self, old: Viewport, new: Viewport) {
        if self.sprites.is_empty() {
            self.seed(new);
            return;
        }
        for sprite in &mut self.sprites {
            let body = sprite.body_mut();
            body.pos = new.rescale_from(old, body.pos);
        }
    }

    fn len(&self) -> usize {
        self.sprites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MeshSurface;

    const VIEW: Viewport = Viewport::new(1000.0, 500.0);

    fn scene() -> MeteorScene {
        let mut scene = MeteorScene::new(MeteorSettings::default(), QualityPreset::Medium, 5);
        scene.resize(Viewport::default(), VIEW);
        scene
    }

    #[test]
    fn test_seed_layout() {
        let scene = scene();
        assert_eq!(scene.len(), 60);
        assert_eq!(scene.comets().count(), 20);
        let (top, bottom) = scene.band(VIEW.height);
        for comet in scene.comets() {
            let body = &comet.circle.body;
            assert!(body.pos.y >= top && body.pos.y < bottom);
            assert!(body.vel.x >= 700.0 && body.vel.x < 1100.0);
            assert_eq!(body.vel.y, -150.0);
        }
        for sprite in &scene.sprites()[20..] {
            let Sprite::Star(star) = sprite else {
                panic!("stars follow comets");
            };
            assert!(star.circle.radius < 2.0);
        }
    }

    #[test]
    fn test_comet_recycled_off_right_edge() {
        let mut scene = scene();
        if let Sprite::Comet(c) = &mut scene.sprites_mut()[0] {
            c.circle.body.pos = Vec2::new(1049.0, 100.0);
            c.circle.body.vel = Vec2::new(900.0, 40.0);
            c.tail_dy = 12.0;
        }
        scene.update(1.0 / 60.0, VIEW);

        let (top, bottom) = scene.band(VIEW.height);
        let Sprite::Comet(c) = &scene.sprites()[0] else {
            panic!("first sprite is a comet");
        };
        assert!(c.circle.body.pos.x < 0.0);
        assert!(c.circle.body.pos.x >= -50.0);
        assert!(c.circle.body.pos.y >= top && c.circle.body.pos.y < bottom);
        assert_eq!(c.circle.body.vel.y, -150.0);
        assert_eq!(c.tail_dy, 0.0);
        assert_eq!(scene.len(), 60);
        assert!(scene.recycled() >= 1);
    }

    #[test]
    fn test_population_constant_over_time() {
        let mut scene = scene();
        for _ in 0..600 {
            scene.update(1.0 / 60.0, VIEW);
            assert_eq!(scene.len(), 60);
        }
        assert!(scene.recycled() > 20);
        for comet in scene.comets() {
            assert!(comet.circle.body.pos.x <= VIEW.width + 50.0);
        }
    }

    #[test]
    fn test_stars_hold_still() {
        let mut scene = scene();
        let before: Vec<Vec2> = scene.sprites()[20..].iter().map(|s| s.body().pos).collect();
        scene.update(0.5, VIEW);
        let after: Vec<Vec2> = scene.sprites()[20..].iter().map(|s| s.body().pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_draw_every_sprite() {
        let scene = scene();
        let mut surface = MeshSurface::new(VIEW.width, VIEW.height);
        scene.draw(&mut surface);
        // Tail plus head, or glow plus core
        assert_eq!(surface.draw_calls(), 120);
        assert!(surface.glow().is_none());
    }
}
