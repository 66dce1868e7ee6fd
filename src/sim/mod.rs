//! Simulation core
//!
//! Everything the animations share lives here. This module must stay free of
//! platform code:
//! - Variable timestep, supplied by the frame driver
//! - Seeded RNG owned by each scene
//! - Stable iteration order (entities live in `Vec`s)
//! - Drawing only through the `Surface` trait

pub mod body;
pub mod bounds;
pub mod clock;
pub mod field;
pub mod path;
pub mod pointer;
pub mod scene;
pub mod sprite;

pub use body::{Body, ForceKind, ForceTable};
pub use bounds::{Bounce, Rect, SoftClamp, reflect_and_correct};
pub use clock::FrameClock;
pub use field::{AttractionField, BubbleResponse, Explosion, speed_alpha};
pub use path::{Follower, Path};
pub use pointer::{HitTarget, HitTester, Pointer, PointerButton, StaticHitTester, parse_target_id};
pub use scene::{Scene, Viewport};
pub use sprite::{Circle, Comet, Paint, Sprite, Star};
