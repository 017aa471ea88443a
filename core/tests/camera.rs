//! Camera driver tests — orbit, reset, toggle, resize.

mod common;

use common::CountingSurface;
use portwatch_core::{
    camera::{CameraDriver, Viewport},
    config::{CameraConfig, SceneLayout},
    host::{EventLoop, TimerKind},
    scene::{build_scene, Vec3},
};

fn driver() -> CameraDriver {
    CameraDriver::new(&CameraConfig::default(), Viewport::new(1200, 800))
}

/// Animated frames keep the camera 40 units from the vertical axis,
/// at the angle given by wall-clock time.
#[test]
fn orbit_follows_wall_clock() {
    let scene = build_scene(&SceneLayout::default(), 1);
    let mut surface = CountingSurface::default();
    let mut cam = driver();

    for wall_ms in [0.0, 1_000.0, 15_707.96, 1.7e12] {
        cam.on_frame(wall_ms, &scene, &mut surface).unwrap();
        let pos = cam.camera().position;
        assert!((pos.horizontal_radius() - 40.0).abs() < 1e-9, "radius at {wall_ms}");
        assert!((pos.x - (wall_ms * 0.0001).cos() * 40.0).abs() < 1e-9);
        assert_eq!(pos.y, 25.0);
        assert_eq!(cam.camera().target, Vec3::ORIGIN);
    }
    assert_eq!(surface.renders.borrow().len(), 4);
    assert_eq!(cam.frames(), 4);
}

/// With animation off the pose is frozen but frames still render.
#[test]
fn paused_animation_still_renders() {
    let scene = build_scene(&SceneLayout::default(), 1);
    let mut surface = CountingSurface::default();
    let mut cam = driver();

    assert!(!cam.toggle_animation());
    cam.on_frame(5_000.0, &scene, &mut surface).unwrap();
    cam.on_frame(9_000.0, &scene, &mut surface).unwrap();

    assert_eq!(cam.camera().position, Vec3::new(30.0, 25.0, 30.0));
    assert_eq!(surface.renders.borrow().len(), 2);
    assert!(cam.toggle_animation());
}

/// Reset restores the default pose and leaves animation alone.
#[test]
fn reset_keeps_animation_state() {
    let scene = build_scene(&SceneLayout::default(), 1);
    let mut surface = CountingSurface::default();
    let mut cam = driver();

    cam.on_frame(12_345.0, &scene, &mut surface).unwrap();
    assert_ne!(cam.camera().position, Vec3::new(30.0, 25.0, 30.0));

    cam.reset();
    assert_eq!(cam.camera().position, Vec3::new(30.0, 25.0, 30.0));
    assert_eq!(cam.camera().target, Vec3::ORIGIN);
    assert!(cam.animation_enabled());

    cam.toggle_animation();
    cam.reset();
    assert!(!cam.animation_enabled());
}

#[test]
fn resize_updates_aspect_and_surface() {
    let mut surface = CountingSurface::default();
    let mut cam = driver();

    assert!(cam.resize(Viewport::new(1000, 500), &mut surface).unwrap());
    assert_eq!(cam.camera().projection.aspect, 2.0);
    assert_eq!(surface.sizes.borrow().as_slice(), &[Viewport::new(1000, 500)]);
}

/// Zero width or height is skipped entirely.
#[test]
fn degenerate_resize_is_a_no_op() {
    let mut surface = CountingSurface::default();
    let mut cam = driver();
    let aspect = cam.camera().projection.aspect;

    assert!(!cam.resize(Viewport::new(0, 600), &mut surface).unwrap());
    assert!(!cam.resize(Viewport::new(800, 0), &mut surface).unwrap());
    assert_eq!(cam.camera().projection.aspect, aspect);
    assert!(surface.sizes.borrow().is_empty());
}

/// Re-attaching replaces the frame callback; detaching disposes of it.
#[test]
fn frame_callback_is_disposed() {
    let mut host = EventLoop::new(common::clock());
    let mut cam = driver();

    let first = cam.attach(&mut host).unwrap();
    let second = cam.attach(&mut host).unwrap();
    assert!(!host.is_armed(first));
    assert!(host.is_armed(second));
    assert_eq!(host.active_of_kind(TimerKind::AnimationFrame), 1);

    cam.detach(&mut host).unwrap();
    assert_eq!(host.active_timers(), 0);
    assert_eq!(cam.frame_timer(), None);
}
