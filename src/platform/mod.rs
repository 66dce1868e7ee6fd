//! Platform abstraction layer
//!
//! Browser glue for the wasm build:
//! - `CanvasSurface`: [`Surface`](crate::renderer::Surface) over a canvas 2D context
//! - `RafScheduler`: frames from `requestAnimationFrame`
//! - `DomHitTester`: elements under the pointer via `elementsFromPoint`
//! - `listen`: DOM event listeners recorded in a [`Listeners`] set
//!
//! The helpers at this level do not touch the DOM, so they build and test
//! natively too.

use crate::error::SceneError;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use dom::{DomHitTester, RafScheduler, listen};

/// Class marking elements the highlight scene traces
pub const HIGHLIGHT_CLASS: &str = "highlight-box";

/// Attribute carrying an element's numeric id
pub const TARGET_ID_ATTR: &str = "data-box-index";

/// Animation-frame timestamps arrive in milliseconds
#[inline]
pub fn frame_seconds(ms: f64) -> f64 {
    ms / 1000.0
}

/// Scene name from a location hash (`#meteors`, `#/bubble-particle`)
pub fn scene_from_hash(hash: &str) -> &str {
    hash.trim_start_matches('#').trim_start_matches('/').trim_end_matches('/')
}

/// Drawing surface acquired on first use and re-acquired after it goes stale
pub struct SurfaceSlot<T> {
    surface: Option<T>,
    misses: u64,
}

impl<T> Default for SurfaceSlot<T> {
    fn default() -> Self {
        Self {
            surface: None,
            misses: 0,
        }
    }
}

impl<T> SurfaceSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The held surface, or a fresh one from `acquire`; `None` when that fails
    pub fn get_or_acquire<F>(&mut self, acquire: F) -> Option<&mut T>
    where
        F: FnOnce() -> Result<T, SceneError>,
    {
        if self.surface.is_none() {
            match acquire() {
                Ok(surface) => {
                    if self.misses > 0 {
                        log::info!("Drawing surface acquired after {} attempts", self.misses + 1);
                    }
                    self.misses = 0;
                    self.surface = Some(surface);
                }
                Err(e) => {
                    self.misses += 1;
                    log::debug!("Drawing surface unavailable: {e}");
                }
            }
        }
        self.surface.as_mut()
    }

    /// Forget the surface; the next frame acquires a new one
    pub fn release(&mut self) {
        if self.surface.take().is_some() {
            log::info!("Drawing surface released");
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.surface.is_some()
    }

    /// Failed acquisitions since the last success
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Registered host callbacks, each paired with the code that unregisters it
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: &'static str, detach: impl FnOnce() + 'static) {
        self.entries.push((kind, Box::new(detach)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unregister everything, newest first; returns how many were removed
    pub fn remove_all(&mut self) -> usize {
        let count = self.entries.len();
        while let Some((kind, detach)) = self.entries.pop() {
            detach();
            log::debug!("Removed '{kind}' listener");
        }
        count
    }
}
