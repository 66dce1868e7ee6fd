//! Closed polylines sampled by normalized progress
//!
//! A path keeps per-segment lengths (segment `i` runs from point `i` to point
//! `i + 1`, the last one wrapping back to the first) and their running total,
//! so sampling is a single walk and appending a point is O(1).

use glam::Vec2;
use serde::Serialize;

use super::bounds::Rect;
use super::sprite::Circle;
use crate::renderer::{Rgba, Surface};

/// Radius of the vertex markers drawn by [`Path::draw_outline`]
const OUTLINE_MARKER_RADIUS: f32 = 5.0;

/// An ordered closed loop of points with cached arclengths.
///
/// Serialize-only: the cached lengths must come from the points, so paths are
/// only built through [`Path::new`] and [`Path::add_point`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    points: Vec<Vec2>,
    lengths: Vec<f32>,
    total: f32,
}

impl Path {
    /// Two-point loop: there and back again
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        let mut path = Self {
            points: Vec::with_capacity(4),
            lengths: Vec::with_capacity(4),
            total: 0.0,
        };
        path.reset(p0, p1);
        path
    }

    /// Loop around a rectangle, clockwise from the top-left corner
    pub fn around_rect(rect: Rect) -> Self {
        let mut path = Self::new(rect.min(), Vec2::new(rect.right(), rect.y));
        path.add_point(rect.max());
        path.add_point(Vec2::new(rect.x, rect.bottom()));
        path
    }

    /// Drop every point and start over with a two-point loop
    pub fn reset(&mut self, p0: Vec2, p1: Vec2) {
        let d = p0.distance(p1);
        self.points.clear();
        self.points.extend([p0, p1]);
        self.lengths.clear();
        self.lengths.extend([d, d]);
        self.total = d * 2.0;
    }

    /// Append a point just before the closing segment.
    ///
    /// Only the old wrap segment is replaced (last -> new) and one segment is
    /// added (new -> first); the total is patched rather than recomputed.
    pub fn add_point(&mut self, p: Vec2) {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        let before = last.distance(p);
        let after = p.distance(first);

        let wrap = self.lengths.len() - 1;
        self.total += before + after - self.lengths[wrap];
        self.lengths[wrap] = before;
        self.lengths.push(after);
        self.points.push(p);
    }

    /// Point at normalized progress `alpha`, wrapping modulo 1.
    ///
    /// A zero-length path samples as its first point.
    pub fn point_at(&self, alpha: f32) -> Vec2 {
        let first = self.points[0];
        if self.total <= 0.0 {
            return first;
        }

        let mut target = self.total * alpha.rem_euclid(1.0);
        for (i, &len) in self.lengths.iter().enumerate() {
            if target < len {
                let t = target / len;
                let a = self.points[i];
                let b = self.points[(i + 1) % self.points.len()];
                return a.lerp(b, t);
            }
            target -= len;
        }
        first
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn segment_lengths(&self) -> &[f32] {
        &self.lengths
    }

    pub fn total_length(&self) -> f32 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Debug overlay: vertex markers plus every edge of the loop
    pub fn draw_outline(&self, surface: &mut dyn Surface, color: Rgba) {
        let mut prev = self.points[self.points.len() - 1];
        for &p in &self.points {
            surface.fill_circle(p, OUTLINE_MARKER_RADIUS, color);
            surface.stroke_line(prev, p, 1.0, color);
            prev = p;
        }
    }
}

/// A render-only circle riding a shared [`Path`] at constant speed
#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    /// Progress around the path in `[0, 1)`
    pub progress: f32,
    /// Progress units per second
    pub speed: f32,
    pub circle: Circle,
}

impl Follower {
    pub fn new(speed: f32, circle: Circle) -> Self {
        Self {
            progress: 0.0,
            speed,
            circle,
        }
    }

    /// `count` followers spaced evenly around the loop
    pub fn spread(count: usize, speed: f32, template: &Circle) -> Vec<Follower> {
        (0..count)
            .map(|i| {
                let mut follower = Follower::new(speed, template.clone());
                follower.progress = i as f32 / count as f32;
                follower
            })
            .collect()
    }

    pub fn update(&mut self, dt: f32) {
        self.progress = (self.progress + self.speed * dt).rem_euclid(1.0);
    }

    pub fn position(&self, path: &Path) -> Vec2 {
        path.point_at(self.progress)
    }

    /// Move the render circle onto the sampled point
    pub fn sync(&mut self, path: &Path) {
        self.circle.body.pos = self.position(path);
    }
}
