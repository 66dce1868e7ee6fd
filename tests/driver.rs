//! Frame driver running real scenes

use canvas_particles::consts::FRAME_DT;
use canvas_particles::renderer::MeshSurface;
use canvas_particles::scenes;
use canvas_particles::sim::{HitTarget, HitTester, Rect, Scene, StaticHitTester, Viewport};
use canvas_particles::{FrameDriver, FrameOutcome, ManualScheduler, Settings};
use glam::Vec2;

fn driver(name: &str) -> FrameDriver<Box<dyn Scene>> {
    let scene = scenes::by_name(name, &Settings::default(), 7).unwrap();
    let mut driver = FrameDriver::new(scene);
    driver.resize(Viewport::new(800.0, 600.0));
    driver
}

/// Fire `frames` frames at 60 Hz, starting at `t0` seconds
fn run(
    driver: &mut FrameDriver<Box<dyn Scene>>,
    sched: &mut ManualScheduler,
    surface: &mut MeshSurface,
    t0: f64,
    frames: u32,
) {
    for i in 0..frames {
        assert!(sched.fire().is_some(), "a frame should always be pending");
        surface.begin_frame();
        let outcome = driver.on_frame(t0 + i as f64 * FRAME_DT as f64, Some(&mut *surface), sched);
        assert_eq!(outcome, FrameOutcome::Rendered);
    }
}

#[test]
fn test_every_scene_renders() {
    for name in scenes::SCENE_NAMES {
        let mut sched = ManualScheduler::new();
        let mut surface = MeshSurface::new(800.0, 600.0);
        let mut driver = driver(name);
        driver.start(&mut sched);
        run(&mut driver, &mut sched, &mut surface, 100.0, 30);
        assert_eq!(driver.frames(), 30);
        assert!((driver.clock().elapsed() - 29.0 * FRAME_DT as f64).abs() < 1e-4);
        driver.stop(&mut sched);
        assert!(sched.queued.is_empty(), "{name} left a frame pending");
    }
}

#[test]
fn test_population_survives_resize_while_running() {
    let mut sched = ManualScheduler::new();
    let mut surface = MeshSurface::new(800.0, 600.0);
    let mut driver = driver("bubbles");
    driver.start(&mut sched);
    run(&mut driver, &mut sched, &mut surface, 0.0, 10);
    let before = driver.scene().len();

    driver.resize(Viewport::new(1920.0, 1080.0));
    surface.resize(1920.0, 1080.0);
    run(&mut driver, &mut sched, &mut surface, 1.0, 10);
    assert_eq!(driver.scene().len(), before);
}

#[test]
fn test_missing_surface_then_recovery() {
    let mut sched = ManualScheduler::new();
    let mut surface = MeshSurface::new(800.0, 600.0);
    let mut driver = driver("meteors");
    driver.start(&mut sched);

    sched.fire();
    assert_eq!(driver.on_frame(0.0, None, &mut sched), FrameOutcome::Skipped);
    assert_eq!(sched.queued.len(), 1);

    run(&mut driver, &mut sched, &mut surface, 0.5, 3);
    assert_eq!(driver.frames(), 3);
    assert_eq!(driver.skipped(), 1);
}

#[test]
fn test_teardown_cancels_and_ignores_late_frames() {
    let mut sched = ManualScheduler::new();
    let mut surface = MeshSurface::new(800.0, 600.0);
    let mut driver = driver("attraction");
    driver.start(&mut sched);
    run(&mut driver, &mut sched, &mut surface, 0.0, 5);

    let pending = driver.pending().unwrap();
    driver.stop(&mut sched);
    assert_eq!(sched.cancelled, vec![pending]);

    let snapshot = driver.frames();
    assert_eq!(driver.on_frame(9.0, Some(&mut surface), &mut sched), FrameOutcome::Stopped);
    assert_eq!(driver.frames(), snapshot);
    assert!(sched.queued.is_empty());
}

#[test]
fn test_highlight_follows_hit_tester() {
    let tester = StaticHitTester {
        targets: vec![
            HitTarget {
                id: 1,
                rect: Rect::new(100.0, 100.0, 200.0, 100.0),
            },
            HitTarget {
                id: 2,
                rect: Rect::new(400.0, 100.0, 200.0, 100.0),
            },
        ],
    };
    let mut sched = ManualScheduler::new();
    let mut surface = MeshSurface::new(800.0, 600.0);
    let mut driver = driver("highlight");
    assert!(driver.scene().uses_hit_testing());
    driver.start(&mut sched);

    let over_first = Vec2::new(150.0, 150.0);
    driver.hover(tester.hit_test(over_first));
    run(&mut driver, &mut sched, &mut surface, 0.0, 5);
    assert_eq!(driver.scene().len(), 30);
    assert_eq!(surface.draw_calls(), 30);

    driver.hover(tester.hit_test(Vec2::new(10.0, 10.0)));
    run(&mut driver, &mut sched, &mut surface, 1.0, 1);
    assert!(driver.scene().is_empty());
    assert_eq!(surface.draw_calls(), 0);
}
