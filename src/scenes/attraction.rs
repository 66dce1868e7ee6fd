//! Magnetic dots drawn toward the pointer
//!
//! Each frame every dot gets a fresh acceleration from the attraction field,
//! integrates, then is soft-clamped into a region larger than the screen so
//! dots can drift off the edges and come back. Opacity follows speed, and the
//! translucent background leaves short trails.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::{Background, Rgba, Surface};
use crate::settings::{AttractionSettings, QualityPreset};
use crate::sim::{
    AttractionField, Circle, Explosion, ForceKind, Pointer, PointerButton, Scene, SoftClamp,
    Viewport, speed_alpha,
};

pub struct AttractionScene {
    settings: AttractionSettings,
    population: usize,
    field: AttractionField,
    explosion: Explosion,
    dots: Vec<Circle>,
    pointer: Pointer,
    /// Click origin waiting for the next update
    pending_blast: Option<Vec2>,
    rng: Pcg32,
}

impl AttractionScene {
    pub fn new(settings: AttractionSettings, quality: QualityPreset, seed: u64) -> Self {
        Self {
            population: quality.scale(settings.count),
            field: AttractionField {
                force: settings.force,
                range: settings.range,
                dispersal: settings.dispersal,
            },
            explosion: Explosion {
                range: settings.explosion_range,
                force: settings.explosion_force,
            },
            settings,
            dots: Vec::new(),
            pointer: Pointer::default(),
            pending_blast: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Scatter the population in an ellipse around the viewport centre
    pub fn seed(&mut self, viewport: Viewport) {
        let center = viewport.center();
        let mut dots = Vec::with_capacity(self.population);
        for _ in 0..self.population {
            let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
            let pos = center
                + Vec2::new(
                    theta.cos() * self.rng.random::<f32>() * viewport.width,
                    theta.sin() * self.rng.random::<f32>() * viewport.height,
                );
            let color = self.pick_color();
            dots.push(Circle::filled(pos, self.settings.radius, color));
        }
        self.dots = dots;
        log::info!("Attraction: seeded {} dots", self.dots.len());
    }

    fn pick_color(&mut self) -> Rgba {
        if self.settings.palette.is_empty() {
            return Rgba::WHITE;
        }
        let i = self.rng.random_range(0..self.settings.palette.len());
        self.settings.palette[i]
    }

    pub fn dots(&self) -> &[Circle] {
        &self.dots
    }

    pub fn dots_mut(&mut self) -> &mut [Circle] {
        &mut self.dots
    }

    pub fn has_pending_blast(&self) -> bool {
        self.pending_blast.is_some()
    }
}

impl Scene for AttractionScene {
    fn name(&self) -> &'static str {
        "attraction"
    }

    fn background(&self) -> Background {
        Background::Fill(self.settings.background)
    }

    fn update(&mut self, dt: f32, viewport: Viewport) {
        let clamp = SoftClamp::around_viewport(
            viewport.width,
            viewport.height,
            self.settings.roam_low,
            self.settings.roam_high,
        );
        // A zero-length step cannot carry the impulse; hold it for the next one
        let blast = if dt > 0.0 { self.pending_blast.take() } else { None };
        let pointer = self.pointer.position();

        for dot in &mut self.dots {
            match blast {
                // The blast replaces the field for exactly this step
                Some(origin) => {
                    let push = self.explosion.impulse(dot.body.pos, origin, &mut self.rng);
                    dot.body.accel = Vec2::ZERO;
                    dot.body.set_force(ForceKind::Impulse, push);
                    dot.body.integrate(dt);
                    dot.body.remove_force(ForceKind::Impulse);
                }
                None => {
                    self.field.accelerate(&mut dot.body, pointer, &mut self.rng);
                    dot.body.integrate(dt);
                }
            }
            clamp.apply(&mut dot.body);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for dot in &self.dots {
            let alpha = speed_alpha(dot.body.speed(), self.settings.min_vel, self.settings.max_vel);
            dot.draw_with(surface, dot.color.with_alpha(alpha));
        }
    }

    fn resize(&mut self, old: Viewport, new: Viewport) {
        if self.dots.is_empty() {
            self.seed(new);
            return;
        }
        for dot in &mut self.dots {
            dot.body.pos = new.rescale_from(old, dot.body.pos);
        }
    }

    fn pointer_moved(&mut self, pos: Option<Vec2>) {
        self.pointer.set(pos);
    }

    fn pointer_pressed(&mut self, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        if let Some(origin) = self.pointer.position() {
            log::debug!("Attraction: blast at ({:.0}, {:.0})", origin.x, origin.y);
            self.pending_blast = Some(origin);
        }
    }

    fn len(&self) -> usize {
        self.dots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MeshSurface;

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn scene() -> AttractionScene {
        let mut scene = AttractionScene::new(AttractionSettings::default(), QualityPreset::Medium, 42);
        scene.resize(Viewport::default(), VIEW);
        scene
    }

    #[test]
    fn test_seeded_on_first_resize() {
        let scene = scene();
        assert_eq!(scene.len(), 300);
        let center = VIEW.center();
        for dot in scene.dots() {
            let d = dot.body.pos - center;
            assert!(d.x.abs() <= VIEW.width && d.y.abs() <= VIEW.height);
        }
    }

    #[test]
    fn test_pointer_pulls_dots() {
        let mut scene = scene();
        let target = Vec2::new(400.0, 300.0);
        scene.pointer_moved(Some(target));
        let before: f32 = scene.dots().iter().map(|d| d.body.pos.distance(target)).sum();
        for _ in 0..60 {
            scene.update(1.0 / 60.0, VIEW);
        }
        let after: f32 = scene.dots().iter().map(|d| d.body.pos.distance(target)).sum();
        assert!(after < before);
    }

    #[test]
    fn test_soft_clamp_region() {
        let mut scene = scene();
        scene.dots_mut()[0].body.pos = Vec2::new(10_000.0, -10_000.0);
        scene.dots_mut()[0].body.vel = Vec2::new(500.0, -500.0);
        scene.update(1.0 / 60.0, VIEW);
        let p = scene.dots()[0].body.pos;
        assert_eq!(p, Vec2::new(1600.0, -900.0));
    }

    #[test]
    fn test_blast_applies_once_on_next_update() {
        let mut scene = scene();
        let origin = Vec2::new(400.0, 300.0);
        scene.pointer_pressed(PointerButton::Primary);
        assert!(!scene.has_pending_blast(), "no pointer, no blast");

        scene.pointer_moved(Some(origin));
        scene.pointer_pressed(PointerButton::Secondary);
        assert!(!scene.has_pending_blast());

        scene.pointer_pressed(PointerButton::Primary);
        assert!(scene.has_pending_blast());
        // Recording the click never moves anything
        let snapshot: Vec<Vec2> = scene.dots().iter().map(|d| d.body.pos).collect();
        assert!(scene.dots().iter().zip(&snapshot).all(|(d, p)| d.body.pos == *p));

        scene.update(1.0 / 60.0, VIEW);
        assert!(!scene.has_pending_blast());
        assert!(scene.dots().iter().all(|d| d.body.forces.get(ForceKind::Impulse).is_none()));
        for (dot, before) in scene.dots().iter().zip(&snapshot) {
            let away = (*before - origin).dot(dot.body.vel);
            assert!(away >= 0.0, "velocity should point away from the blast");
        }
    }

    #[test]
    fn test_blast_survives_zero_dt_step() {
        let mut settings = AttractionSettings::default();
        settings.dispersal = 0.0;
        let mut scene = AttractionScene::new(settings, QualityPreset::Medium, 9);
        scene.resize(Viewport::default(), VIEW);
        for dot in scene.dots_mut() {
            dot.body.vel = Vec2::ZERO;
        }
        let origin = VIEW.center();
        scene.pointer_moved(Some(origin));
        scene.pointer_pressed(PointerButton::Primary);

        // First driver frame: the clock reports no elapsed time
        scene.update(0.0, VIEW);
        assert!(scene.has_pending_blast());

        let before: Vec<Vec2> = scene.dots().iter().map(|d| d.body.pos).collect();
        scene.update(1.0 / 60.0, VIEW);
        assert!(!scene.has_pending_blast());
        let outward = scene
            .dots()
            .iter()
            .zip(&before)
            .filter(|(d, p)| (**p - origin).dot(d.body.vel) > 0.0)
            .count();
        assert!(outward > scene.len() / 2, "only {outward} dots pushed outward");
        let fastest = scene.dots().iter().map(|d| d.body.speed()).fold(0.0, f32::max);
        assert!(fastest > 0.0);
    }

    #[test]
    fn test_opacity_follows_speed() {
        let mut scene = scene();
        for dot in scene.dots_mut() {
            dot.body.vel = Vec2::ZERO;
        }
        scene.dots_mut()[0].body.vel = Vec2::new(1000.0, 0.0);
        let mut surface = MeshSurface::new(VIEW.width, VIEW.height);
        scene.draw(&mut surface);
        assert_eq!(surface.draw_calls(), 300);
        // First dot is at full opacity, the rest invisible
        assert_eq!(surface.vertices()[0].color[3], 1.0);
        assert_eq!(surface.vertices().last().map(|v| v.color[3]), Some(0.0));
    }

    #[test]
    fn test_resize_rescales_instead_of_reseeding() {
        let mut scene = scene();
        let first = scene.dots()[0].body.pos;
        scene.resize(VIEW, Viewport::new(400.0, 1200.0));
        assert_eq!(scene.len(), 300);
        let moved = scene.dots()[0].body.pos;
        assert!((moved - Vec2::new(first.x / 2.0, first.y * 2.0)).length() < 1e-3);
    }
}
