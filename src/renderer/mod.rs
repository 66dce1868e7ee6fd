//! Drawing surfaces
//!
//! Scenes only talk to [`Surface`]: a handful of immediate-mode primitives
//! (rect, circle, polygon, line, glow). The browser backs it with a canvas 2D
//! context; [`MeshSurface`] tessellates into vertices for headless runs.

pub mod color;
pub mod mesh;
pub mod shapes;
pub mod vertex;

pub use color::Rgba;
pub use mesh::MeshSurface;
pub use vertex::Vertex;

use glam::Vec2;

use crate::sim::Rect;

/// Soft shadow applied to subsequent primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> f32;
    /// Height in pixels
    fn height(&self) -> f32;

    /// Erase everything to transparent
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba);
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgba);
    /// Set or clear the glow for following primitives
    fn set_glow(&mut self, glow: Option<Glow>);

    /// Full-surface rectangle
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width(), self.height())
    }
}

/// How a scene wipes the previous frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Transparent clear (overlay canvases)
    Clear,
    /// Paint over with a color; a translucent one leaves motion trails
    Fill(Rgba),
}

impl Background {
    pub fn paint(&self, surface: &mut dyn Surface) {
        match *self {
            Background::Clear => surface.clear(),
            Background::Fill(color) => {
                let rect = surface.bounds();
                surface.fill_rect(rect, color);
            }
        }
    }
}
