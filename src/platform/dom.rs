//! Animation frames, event listeners and DOM hit-testing

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlCanvasElement, Window};

use super::{HIGHLIGHT_CLASS, Listeners, TARGET_ID_ATTR};
use crate::driver::{FrameHandle, FrameScheduler};
use crate::sim::{HitTarget, HitTester, Rect, parse_target_id};

/// `requestAnimationFrame` scheduler calling back into one fixed function
pub struct RafScheduler {
    window: Window,
    callback: Option<js_sys::Function>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    /// Function run on every frame (receives the timestamp in ms)
    pub fn set_callback(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let Some(callback) = &self.callback else {
            log::error!("Frame requested before the frame callback was set");
            return FrameHandle(0);
        };
        match self.window.request_animation_frame(callback) {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {e:?}", handle.0);
        }
    }
}

/// Add `handler` for `kind` events on `target`, recording its removal in `listeners`
pub fn listen<F>(listeners: &mut Listeners, target: &EventTarget, kind: &'static str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        log::warn!("addEventListener('{kind}') failed: {e:?}");
        return;
    }
    let target = target.clone();
    listeners.push(kind, move || {
        if let Err(e) =
            target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("removeEventListener('{kind}') failed: {e:?}");
        }
    });
}

/// Finds the topmost highlight element under a canvas-space point
pub struct DomHitTester {
    document: Document,
    canvas: HtmlCanvasElement,
}

impl DomHitTester {
    pub fn new(document: Document, canvas: HtmlCanvasElement) -> Self {
        Self { document, canvas }
    }

    fn canvas_origin(&self) -> Vec2 {
        let r = self.canvas.get_bounding_client_rect();
        Vec2::new(r.left() as f32, r.top() as f32)
    }

    fn target_for(&self, element: &Element, origin: Vec2) -> HitTarget {
        let r = element.get_bounding_client_rect();
        let min = Vec2::new(r.left() as f32, r.top() as f32) - origin;
        HitTarget {
            id: parse_target_id(element.get_attribute(TARGET_ID_ATTR).as_deref()),
            rect: Rect::new(min.x, min.y, r.width() as f32, r.height() as f32),
        }
    }
}

impl HitTester for DomHitTester {
    fn hit_test(&self, point: Vec2) -> Option<HitTarget> {
        let origin = self.canvas_origin();
        let client = point + origin;
        // Topmost first
        self.document
            .elements_from_point(client.x, client.y)
            .iter()
            .filter_map(|value| value.dyn_into::<Element>().ok())
            .find(|el| el.class_list().contains(HIGHLIGHT_CLASS))
            .map(|el| self.target_for(&el, origin))
    }
}
