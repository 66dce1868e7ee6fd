//! Bubbles bouncing around the screen, swelling near the pointer

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::centered;
use crate::renderer::{Background, Rgba, Surface};
use crate::settings::{BubbleSettings, QualityPreset};
use crate::sim::{BubbleResponse, Circle, Paint, Pointer, Scene, Viewport, reflect_and_correct};

pub struct BubbleScene {
    settings: BubbleSettings,
    population: usize,
    response: BubbleResponse,
    bubbles: Vec<Circle>,
    pointer: Pointer,
    rng: Pcg32,
}

impl BubbleScene {
    pub fn new(settings: BubbleSettings, quality: QualityPreset, seed: u64) -> Self {
        Self {
            population: quality.scale(settings.count),
            response: BubbleResponse::new(
                settings.pointer_distance,
                settings.min_radius,
                settings.max_radius,
                settings.radius_speed,
            ),
            settings,
            bubbles: Vec::new(),
            pointer: Pointer::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fill the viewport with minimum-size bubbles drifting in random directions
    pub fn seed(&mut self, viewport: Viewport) {
        let paint = if self.settings.filled {
            Paint::Fill
        } else {
            Paint::Stroke(self.settings.stroke_width)
        };
        let mut bubbles = Vec::with_capacity(self.population);
        for _ in 0..self.population {
            let pos = Vec2::new(
                (self.rng.random::<f32>() * viewport.width).floor(),
                (self.rng.random::<f32>() * viewport.height).floor(),
            );
            let color = self.pick_color();
            let mut bubble = Circle::new(pos, self.settings.min_radius, color, paint);
            bubble.body.vel = Vec2::new(
                centered(&mut self.rng, self.settings.velocity_range),
                centered(&mut self.rng, self.settings.velocity_range),
            );
            bubbles.push(bubble);
        }
        self.bubbles = bubbles;
        log::info!("Bubbles: seeded {} bubbles", self.bubbles.len());
    }

    fn pick_color(&mut self) -> Rgba {
        if self.settings.palette.is_empty() {
            return Rgba::WHITE;
        }
        let i = self.rng.random_range(0..self.settings.palette.len());
        self.settings.palette[i]
    }

    pub fn bubbles(&self) -> &[Circle] {
        &self.bubbles
    }

    pub fn bubbles_mut(&mut self) -> &mut [Circle] {
        &mut self.bubbles
    }
}

impl Scene for BubbleScene {
    fn name(&self) -> &'static str {
        "bubbles"
    }

    fn background(&self) -> Background {
        Background::Fill(self.settings.background)
    }

    fn update(&mut self, dt: f32, viewport: Viewport) {
        let screen = viewport.rect();
        let pointer = self.pointer.position();
        for bubble in &mut self.bubbles {
            bubble.radius = self.response.step(bubble.radius, bubble.body.pos, pointer, dt);
            bubble.body.integrate(dt);
            let own = bubble.bounds();
            reflect_and_correct(&mut bubble.body, own, screen);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for bubble in &self.bubbles {
            bubble.draw(surface);
        }
    }

    fn resize(&mut self, old: Viewport, new: Viewport) {
        if self.bubbles.is_empty() {
            self.seed(new);
            return;
        }
        for bubble in &mut self.bubbles {
            bubble.body.pos = new.rescale_from(old, bubble.body.pos);
        }
    }

    fn pointer_moved(&mut self, pos: Option<Vec2>) {
        self.pointer.set(pos);
    }

    fn len(&self) -> usize {
        self.bubbles.len()
    }
}
