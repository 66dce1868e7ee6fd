//! Scene contract shared by every animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Rect;
use super::pointer::{HitTarget, PointerButton};
use crate::renderer::{Background, Surface};

/// Current drawing surface size in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Map a position proportionally from `old` to `self`.
    ///
    /// An empty `old` viewport has no proportions; the position is kept.
    pub fn rescale_from(&self, old: Viewport, pos: Vec2) -> Vec2 {
        if old.is_empty() {
            return pos;
        }
        Vec2::new(
            pos.x / old.width * self.width,
            pos.y / old.height * self.height,
        )
    }
}

/// One animation: owns its entities, advanced and drawn by the frame driver.
///
/// Input handlers only record state; physics runs in [`Scene::update`].
pub trait Scene {
    fn name(&self) -> &'static str;

    /// How the driver wipes the previous frame before [`Scene::draw`]
    fn background(&self) -> Background;

    /// Advance by `dt` seconds inside `viewport`
    fn update(&mut self, dt: f32, viewport: Viewport);

    fn draw(&self, surface: &mut dyn Surface);

    /// Surface changed size: rescale survivors, seed when empty
    fn resize(&mut self, old: Viewport, new: Viewport);

    /// Latest pointer position, `None` once it leaves the surface
    fn pointer_moved(&mut self, _pos: Option<Vec2>) {}

    fn pointer_pressed(&mut self, _button: PointerButton) {}

    /// Element under the pointer, for scenes that trace host elements
    fn hover(&mut self, _target: Option<HitTarget>) {}

    /// Whether the host should run hit-testing on pointer moves
    fn uses_hit_testing(&self) -> bool {
        false
    }

    /// Live entity count
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn background(&self) -> Background {
        (**self).background()
    }

    fn update(&mut self, dt: f32, viewport: Viewport) {
        (**self).update(dt, viewport)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        (**self).draw(surface)
    }

    fn resize(&mut self, old: Viewport, new: Viewport) {
        (**self).resize(old, new)
    }

    fn pointer_moved(&mut self, pos: Option<Vec2>) {
        (**self).pointer_moved(pos)
    }

    fn pointer_pressed(&mut self, button: PointerButton) {
        (**self).pointer_pressed(button)
    }

    fn hover(&mut self, target: Option<HitTarget>) {
        (**self).hover(target)
    }

    fn uses_hit_testing(&self) -> bool {
        (**self).uses_hit_testing()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
