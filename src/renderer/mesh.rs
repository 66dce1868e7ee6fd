//! Surface that tessellates every primitive into a triangle list

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::{Glow, Rgba, Surface};
use crate::sim::Rect;

/// Headless [`Surface`] collecting triangles for upload or inspection.
///
/// Glow is recorded but not rasterized; a GPU pass would add it as a blur.
#[derive(Debug, Clone, Default)]
pub struct MeshSurface {
    width: f32,
    height: f32,
    vertices: Vec<Vertex>,
    glow: Option<Glow>,
    draw_calls: usize,
}

impl MeshSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Primitives issued since the last clear/frame start
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn glow(&self) -> Option<Glow> {
        self.glow
    }

    /// Drop collected geometry and counters
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        self.draw_calls = 0;
    }

    fn push(&mut self, mut verts: Vec<Vertex>) {
        self.vertices.append(&mut verts);
        self.draw_calls += 1;
    }
}

impl Surface for MeshSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.begin_frame();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.push(shapes::quad(rect.min(), rect.max(), color.to_array()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let segments = shapes::circle_segments(radius);
        self.push(shapes::circle(center, radius, color.to_array(), segments));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        let segments = shapes::circle_segments(radius);
        self.push(shapes::ring(center, radius, line_width, color.to_array(), segments));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.push(shapes::polygon(points, color.to_array()));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgba) {
        self.push(shapes::line(from, to, line_width, color.to_array()));
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Background;

    #[test]
    fn test_background_fill_covers_surface() {
        let mut surface = MeshSurface::new(320.0, 200.0);
        Background::Fill(Rgba::BLACK).paint(&mut surface);
        assert_eq!(surface.draw_calls(), 1);
        let max = surface
            .vertices()
            .iter()
            .fold(Vec2::ZERO, |m, v| m.max(Vec2::from(v.position)));
        assert_eq!(max, Vec2::new(320.0, 200.0));
    }

    #[test]
    fn test_clear_resets_frame() {
        let mut surface = MeshSurface::new(10.0, 10.0);
        surface.fill_circle(Vec2::splat(5.0), 2.0, Rgba::WHITE);
        assert!(!surface.vertices().is_empty());
        Background::Clear.paint(&mut surface);
        assert!(surface.vertices().is_empty());
        assert_eq!(surface.draw_calls(), 0);
    }
}
