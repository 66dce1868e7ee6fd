//! Frame driver
//!
//! Owns one scene and its clock and runs the per-frame sequence:
//! clock, update, background, draw, then schedule the next frame.
//!
//! Scheduling goes through [`FrameScheduler`] so the browser can back it with
//! `requestAnimationFrame` and tests with [`ManualScheduler`]. The driver keeps
//! the handle of the one pending frame so [`FrameDriver::stop`] can cancel it.
//! Input arriving between frames is forwarded to the scene, which only
//! records it; physics runs exclusively inside [`FrameDriver::on_frame`].

use glam::Vec2;

use crate::renderer::Surface;
use crate::sim::{FrameClock, HitTarget, PointerButton, Scene, Viewport};

/// Token for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host service delivering one callback per display refresh
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What a frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Stepped and drew the scene
    Rendered,
    /// No surface this frame; nothing advanced, next frame requested
    Skipped,
    /// The driver was stopped; nothing happened
    Stopped,
}

pub struct FrameDriver<S: Scene> {
    scene: S,
    clock: FrameClock,
    viewport: Viewport,
    pending: Option<FrameHandle>,
    running: bool,
    frames: u64,
    skipped: u64,
}

impl<S: Scene> FrameDriver<S> {
    /// Wrap a scene; it is seeded by the first non-empty [`FrameDriver::resize`]
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            clock: FrameClock::new(),
            viewport: Viewport::default(),
            pending: None,
            running: false,
            frames: 0,
            skipped: 0,
        }
    }

    /// Start the loop with a fresh clock. Does nothing if already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.running {
            return;
        }
        self.clock.reset();
        self.running = true;
        self.pending = Some(scheduler.request_frame());
        log::info!("Started scene '{}'", self.scene.name());
    }

    /// Frame callback; `now` is the host timestamp in seconds
    pub fn on_frame(
        &mut self,
        now: f64,
        surface: Option<&mut dyn Surface>,
        scheduler: &mut dyn FrameScheduler,
    ) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        // The callback that was pending is the one being run
        self.pending = None;

        let Some(surface) = surface else {
            self.skipped += 1;
            log::warn!("Frame skipped: drawing surface unavailable");
            self.pending = Some(scheduler.request_frame());
            return FrameOutcome::Skipped;
        };

        let dt = self.clock.advance(now);
        self.scene.update(dt, self.viewport);
        self.scene.background().paint(surface);
        self.scene.draw(surface);
        self.frames += 1;

        self.pending = Some(scheduler.request_frame());
        FrameOutcome::Rendered
    }

    /// Tear down: cancel the pending frame so nothing touches the scene again
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        if self.running {
            log::info!(
                "Stopped scene '{}' after {} frames ({} skipped)",
                self.scene.name(),
                self.frames,
                self.skipped
            );
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Surface resized: rescale the scene (or seed it when empty)
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            log::warn!("Ignoring resize to {}x{}", viewport.width, viewport.height);
            return;
        }
        let old = self.viewport;
        self.viewport = viewport;
        self.scene.resize(old, viewport);
        log::info!(
            "Viewport {}x{} -> {}x{} ({} entities)",
            old.width,
            old.height,
            viewport.width,
            viewport.height,
            self.scene.len()
        );
    }

    pub fn pointer_moved(&mut self, pos: Option<Vec2>) {
        self.scene.pointer_moved(pos);
    }

    pub fn pointer_pressed(&mut self, button: PointerButton) {
        self.scene.pointer_pressed(button);
    }

    pub fn hover(&mut self, target: Option<HitTarget>) {
        self.scene.hover(target);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Frames rendered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Scheduler driven by hand: headless runs and tests fire frames themselves
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: i32,
    /// Requested and not yet fired or cancelled
    pub queued: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest queued frame, as the host would when it fires
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.queued.is_empty() {
            return None;
        }
        Some(self.queued.remove(0))
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.queued.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queued.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}
