//! Canvas Particles entry point
//!
//! On the web this mounts the scene named by the location hash on `#canvas`
//! and drives it from animation frames. Natively it runs a scene headless
//! for a fixed number of frames and logs what it drew.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, Window};

    use canvas_particles::platform::{
        self, CanvasSurface, DomHitTester, Listeners, RafScheduler, SurfaceSlot, listen,
    };
    use canvas_particles::renderer::Surface;
    use canvas_particles::scenes;
    use canvas_particles::sim::{HitTester, PointerButton, Scene, Viewport};
    use canvas_particles::{FrameDriver, SceneError, Settings};

    /// Everything the page needs between callbacks
    struct App {
        driver: FrameDriver<Box<dyn Scene>>,
        scheduler: RafScheduler,
        canvas: HtmlCanvasElement,
        surface: SurfaceSlot<CanvasSurface>,
        hit_tester: DomHitTester,
        settings: Settings,
        listeners: Listeners,
    }

    impl App {
        fn start(&mut self) {
            self.driver.start(&mut self.scheduler);
        }

        fn stop(&mut self) {
            self.driver.stop(&mut self.scheduler);
        }

        /// Cancel the pending frame and unregister every scene listener
        fn teardown(&mut self) {
            self.stop();
            let removed = self.listeners.remove_all();
            log::info!("Torn down: {removed} listeners removed");
        }

        fn frame(&mut self, time_ms: f64) {
            // A detached canvas has no usable context; retry once it is back
            let surface = if self.canvas.is_connected() {
                let canvas = &self.canvas;
                self.surface
                    .get_or_acquire(|| CanvasSurface::new(canvas.clone()))
                    .map(|s| s as &mut dyn Surface)
            } else {
                self.surface.release();
                None
            };
            self.driver
                .on_frame(platform::frame_seconds(time_ms), surface, &mut self.scheduler);
        }

        /// Stop the running scene and mount another one at the same size
        fn switch_scene(&mut self, name: &str) -> Result<(), SceneError> {
            let scene = scenes::by_name(name, &self.settings, js_sys::Date::now() as u64)?;
            self.stop();
            let viewport = self.driver.viewport();
            self.driver = FrameDriver::new(scene);
            self.driver.resize(viewport);
            self.start();
            Ok(())
        }

        fn fit(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.driver.resize(Viewport::new(width as f32, height as f32));
        }

        fn pointer_moved(&mut self, pos: Option<Vec2>) {
            self.driver.pointer_moved(pos);
            if self.driver.scene().uses_hit_testing() {
                let target = pos.and_then(|p| self.hit_tester.hit_test(p));
                self.driver.hover(target);
            }
        }
    }

    fn window_size(window: &Window) -> (u32, u32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as u32, h as u32)
    }

    fn initial_scene(window: &Window, settings: &Settings, seed: u64) -> Result<Box<dyn Scene>, SceneError> {
        let hash = window.location().hash().unwrap_or_default();
        match scenes::by_name(platform::scene_from_hash(&hash), settings, seed) {
            Ok(scene) => Ok(scene),
            Err(e) => {
                log::warn!("{e}; falling back to '{}'", scenes::SCENE_NAMES[0]);
                scenes::by_name(scenes::SCENE_NAMES[0], settings, seed)
            }
        }
    }

    pub fn run() -> Result<(), SceneError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| SceneError::Platform(format!("logger: {e}")))?;

        log::info!("Canvas Particles starting...");

        let window = web_sys::window().ok_or_else(|| SceneError::Platform("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SceneError::Platform("no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(SceneError::SurfaceUnavailable)?
            .dyn_into()
            .map_err(|_| SceneError::SurfaceUnavailable)?;

        let settings = Settings::default();
        let seed = js_sys::Date::now() as u64;
        let scene = initial_scene(&window, &settings, seed)?;
        log::info!("Scene '{}' with seed {}", scene.name(), seed);

        // The 2D context is acquired by the first frame that can get one
        let app = Rc::new(RefCell::new(App {
            driver: FrameDriver::new(scene),
            scheduler: RafScheduler::new(window.clone()),
            canvas: canvas.clone(),
            surface: SurfaceSlot::new(),
            hit_tester: DomHitTester::new(document.clone(), canvas.clone()),
            settings,
            listeners: Listeners::new(),
        }));

        // One callback serves every frame for the life of the page
        {
            let app_cb = app.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                app_cb.borrow_mut().frame(time);
            });
            app.borrow_mut()
                .scheduler
                .set_callback(closure.as_ref().unchecked_ref::<js_sys::Function>().clone());
            closure.forget();
        }

        setup_lifecycle(&window, app.clone());
        mount(&window, &app);
        log::info!("Canvas Particles running!");
        Ok(())
    }

    /// Register listeners, size the canvas and start the loop
    fn mount(window: &Window, app: &Rc<RefCell<App>>) {
        let canvas = app.borrow().canvas.clone();
        let listeners = scene_listeners(window, &canvas, app);
        let (w, h) = window_size(window);

        let mut app = app.borrow_mut();
        app.listeners = listeners;
        app.fit(w, h);
        app.start();
    }

    fn scene_listeners(window: &Window, canvas: &HtmlCanvasElement, app: &Rc<RefCell<App>>) -> Listeners {
        let mut listeners = Listeners::new();

        // Pointer move, in canvas coordinates
        {
            let app = app.clone();
            let canvas = canvas.clone();
            listen(&mut listeners, window, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = canvas.get_bounding_client_rect();
                let pos = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
                app.borrow_mut().pointer_moved(Some(pos));
            });
        }

        // Pointer left the page
        if let Some(root) = window.document().and_then(|d| d.document_element()) {
            let app = app.clone();
            listen(&mut listeners, &root, "mouseleave", move |_event| {
                app.borrow_mut().pointer_moved(None);
            });
        }

        // Buttons
        {
            let app = app.clone();
            listen(&mut listeners, window, "mousedown", move |event| {
                let button = event
                    .dyn_ref::<MouseEvent>()
                    .and_then(|e| PointerButton::from_code(e.button()));
                if let Some(button) = button {
                    app.borrow_mut().driver.pointer_pressed(button);
                }
            });
        }

        // Resize
        {
            let app = app.clone();
            let window_cb = window.clone();
            listen(&mut listeners, window, "resize", move |_event| {
                let (w, h) = window_size(&window_cb);
                app.borrow_mut().fit(w, h);
            });
        }

        // Hash routing between scenes
        {
            let app = app.clone();
            let window_cb = window.clone();
            listen(&mut listeners, window, "hashchange", move |_event| {
                let hash = window_cb.location().hash().unwrap_or_default();
                if let Err(e) = app.borrow_mut().switch_scene(platform::scene_from_hash(&hash)) {
                    log::warn!("Keeping current scene: {e}");
                }
            });
        }

        listeners
    }

    /// Page lifecycle hooks, registered once for the life of the page
    fn setup_lifecycle(window: &Window, app: Rc<RefCell<App>>) {
        // Page going away: cancel the pending frame and drop the listeners
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().teardown();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back from the page cache: mount again
        {
            let window_cb = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if app.borrow().driver.is_running() {
                    return;
                }
                log::info!("Page restored, resuming");
                mount(&window_cb, &app);
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_app::run() {
        log::error!("Canvas Particles failed to start: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use canvas_particles::consts::FRAME_DT;
    use canvas_particles::renderer::{MeshSurface, vertex};
    use canvas_particles::scenes;
    use canvas_particles::sim::{HitTarget, HitTester, PointerButton, Rect, StaticHitTester, Viewport};
    use canvas_particles::{FrameDriver, ManualScheduler, SceneError, Settings};

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;

    /// Command line: `[scene] [--settings FILE] [--frames N] [--seed N]`
    #[derive(Debug)]
    struct Args {
        scene: String,
        settings: Option<String>,
        frames: u32,
        seed: u64,
    }

    fn parse_args(raw: Vec<String>) -> Result<Args, SceneError> {
        let mut args = Args {
            scene: scenes::SCENE_NAMES[0].to_string(),
            settings: None,
            frames: 300,
            seed: 1,
        };
        let mut iter = raw.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--settings" => args.settings = iter.next(),
                "--frames" => args.frames = parse_number(iter.next(), "--frames")?,
                "--seed" => args.seed = parse_number(iter.next(), "--seed")?,
                _ => args.scene = arg,
            }
        }
        Ok(args)
    }

    fn parse_number<T: std::str::FromStr>(value: Option<String>, flag: &str) -> Result<T, SceneError> {
        value
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| SceneError::Platform(format!("{flag} expects a number")))
    }

    fn load_settings(path: Option<&str>) -> Result<Settings, SceneError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| SceneError::Platform(format!("{path}: {e}")))?;
                Settings::from_json(&json)
            }
            None => Ok(Settings::default()),
        }
    }

    pub fn run(raw: Vec<String>) -> Result<(), SceneError> {
        let args = parse_args(raw)?;
        let settings = load_settings(args.settings.as_deref())?;
        let scene = scenes::by_name(&args.scene, &settings, args.seed)?;

        let mut driver = FrameDriver::new(scene);
        let mut scheduler = ManualScheduler::new();
        let mut surface = MeshSurface::new(WIDTH, HEIGHT);
        let viewport = Viewport::new(WIDTH, HEIGHT);
        driver.resize(viewport);

        // Something under the pointer for scenes that trace elements
        let hit_tester = StaticHitTester {
            targets: vec![HitTarget {
                id: 1,
                rect: Rect::centered(viewport.center(), 120.0),
            }],
        };
        let pointer = viewport.center() + Vec2::new(40.0, -20.0);
        driver.pointer_moved(Some(pointer));
        if driver.scene().uses_hit_testing() {
            driver.hover(hit_tester.hit_test(pointer));
        }

        driver.start(&mut scheduler);
        let mut peak = 0usize;
        for i in 0..args.frames {
            if scheduler.fire().is_none() {
                break;
            }
            if i == args.frames / 2 {
                driver.pointer_pressed(PointerButton::Primary);
            }
            surface.begin_frame();
            driver.on_frame(i as f64 * FRAME_DT as f64, Some(&mut surface), &mut scheduler);
            peak = peak.max(vertex::as_bytes(surface.vertices()).len());
        }
        driver.stop(&mut scheduler);

        log::info!(
            "'{}': {} frames, {} entities, last frame {} draw calls, peak vertex buffer {} bytes",
            args.scene,
            driver.frames(),
            driver.scene().len(),
            surface.draw_calls(),
            peak
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Canvas Particles (native) starting...");

    if let Err(e) = headless::run(std::env::args().skip(1).collect()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
