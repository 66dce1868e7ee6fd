//! Canvas Particles - small real-time 2D particle animations
//!
//! Core modules:
//! - `sim`: Simulation core (bodies, boundaries, paths, force fields, sprites)
//! - `scenes`: The four animations built on the core
//! - `driver`: Variable-dt frame driver with cancellable scheduling
//! - `renderer`: Drawing surface abstraction and a tessellating mesh surface
//! - `platform`: Browser glue (canvas 2D context, animation frames, hit-testing)
//! - `settings`: Data-driven scene tunables

pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod scenes;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, FrameHandle, FrameOutcome, FrameScheduler, ManualScheduler};
pub use error::SceneError;
pub use settings::Settings;

use glam::Vec2;
use rand::Rng;

/// Shared constants
pub mod consts {
    /// Nominal frame step used by headless runs and tests (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Distances below this are treated as "on top of" a point
    pub const MIN_DISTANCE: f32 = 1.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn vec_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Uniformly distributed unit vector
#[inline]
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    vec_from_angle(rng.random_range(0.0..std::f32::consts::TAU))
}

/// Uniform sample in `[-half, half)`, the centred jitter used by the fields
#[inline]
pub fn centered<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    rng.random_range(0.0..span) - span / 2.0
}
