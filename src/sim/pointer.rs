//! Pointer state and hit-testing results
//!
//! Hosts record the latest pointer position between frames; scenes read it
//! during update. "No pointer over the surface" is an explicit `None`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Rect;

/// Latest known pointer position, if any
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pos: Option<Vec2>,
}

impl Pointer {
    /// Record a move, or `None` when the pointer left the surface
    pub fn set(&mut self, pos: Option<Vec2>) {
        self.pos = pos;
    }

    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.pos
    }
}

/// Discrete pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// Element under the pointer, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTarget {
    /// Host identifier; 0 when the host could not supply one
    pub id: u32,
    /// Element bounds in surface coordinates
    pub rect: Rect,
}

/// Host-side lookup of the topmost interactive element under a point
pub trait HitTester {
    fn hit_test(&self, point: Vec2) -> Option<HitTarget>;
}

/// Parse a host identifier, defaulting to 0 when missing or malformed
pub fn parse_target_id(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Fixed set of rectangles, topmost last
#[derive(Debug, Clone, Default)]
pub struct StaticHitTester {
    pub targets: Vec<HitTarget>,
}

impl HitTester for StaticHitTester {
    fn hit_test(&self, point: Vec2) -> Option<HitTarget> {
        self.targets.iter().rev().find(|t| t.rect.contains(point)).copied()
    }
}
