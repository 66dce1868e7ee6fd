//! Particles chasing each other around the hovered element

use glam::Vec2;

use crate::renderer::{Background, Rgba, Surface};
use crate::settings::{HighlightSettings, QualityPreset};
use crate::sim::{Circle, Follower, HitTarget, Path, Scene, Viewport};

/// Color of the debug path overlay
const PATH_COLOR: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);

pub struct HighlightScene {
    settings: HighlightSettings,
    population: usize,
    target: Option<HitTarget>,
    path: Option<Path>,
    followers: Vec<Follower>,
}

impl HighlightScene {
    pub fn new(settings: HighlightSettings, quality: QualityPreset) -> Self {
        Self {
            population: quality.scale(settings.count),
            settings,
            target: None,
            path: None,
            followers: Vec::new(),
        }
    }

    /// Build a loop around `target` and spread the followers over it
    fn retarget(&mut self, target: HitTarget) {
        let path = Path::around_rect(target.rect.inflate(self.settings.margin));
        let template = Circle::filled(Vec2::ZERO, self.settings.radius, self.settings.color);
        let mut followers = Follower::spread(self.population, self.settings.speed, &template);
        for follower in &mut followers {
            follower.sync(&path);
        }
        log::debug!(
            "Highlight: tracing element {} ({} followers, loop {:.0}px)",
            target.id,
            followers.len(),
            path.total_length()
        );
        self.target = Some(target);
        self.path = Some(path);
        self.followers = followers;
    }

    fn clear_target(&mut self) {
        if self.target.take().is_some() {
            log::debug!("Highlight: target cleared");
        }
        self.path = None;
        self.followers.clear();
    }

    /// Host id of the element being traced
    pub fn hovered_id(&self) -> Option<u32> {
        self.target.map(|t| t.id)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn followers(&self) -> &[Follower] {
        &self.followers
    }
}

impl Scene for HighlightScene {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn background(&self) -> Background {
        Background::Clear
    }

    fn update(&mut self, dt: f32, _viewport: Viewport) {
        let Some(path) = &self.path else {
            return;
        };
        for follower in &mut self.followers {
            follower.update(dt);
            follower.sync(path);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.settings.show_path {
            if let Some(path) = &self.path {
                path.draw_outline(surface, PATH_COLOR);
            }
        }
        for follower in &self.followers {
            follower.circle.draw(surface);
        }
    }

    /// Element rectangles are stale after a resize; wait for the next hover
    fn resize(&mut self, _old: Viewport, _new: Viewport) {
        self.clear_target();
    }

    fn hover(&mut self, target: Option<HitTarget>) {
        match target {
            Some(t) if self.hovered_id() == Some(t.id) => {}
            Some(t) => self.retarget(t),
            None => self.clear_target(),
        }
    }

    fn uses_hit_testing(&self) -> bool {
        true
    }

    fn len(&self) -> usize {
        self.followers.len()
    }
}
