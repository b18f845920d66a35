use portal_core::context::SceneContext;

#[test]
fn tick_publishes_the_same_time_to_both_uniform_sets() {
    let mut ctx = SceneContext::new(800, 600, 1.0);
    let t = ctx.tick().unwrap();
    assert_eq!(ctx.uniforms.fireflies.time, t);
    assert_eq!(ctx.uniforms.portal.time, t);
}

#[test]
fn tick_times_are_monotonic() {
    let mut ctx = SceneContext::new(800, 600, 1.0);
    let mut last = ctx.tick().unwrap();
    for _ in 0..10 {
        let now = ctx.tick().unwrap();
        assert!(now >= last);
        last = now;
    }
}

#[test]
fn tick_updates_the_camera_from_the_controls() {
    let mut ctx = SceneContext::new(800, 600, 1.0);
    let before = ctx.camera.eye;
    ctx.controls.rotate(1.0, 0.0);
    ctx.tick().unwrap();
    assert_ne!(ctx.camera.eye, before);
}

#[test]
fn cancelled_context_stops_ticking_and_freezes_state() {
    let mut ctx = SceneContext::new(800, 600, 1.0);
    ctx.tick().unwrap();
    let frozen_time = ctx.uniforms.portal.time;

    ctx.cancel_token().cancel();
    assert!(ctx.tick().is_none());
    assert!(ctx.tick().is_none());
    assert_eq!(ctx.uniforms.portal.time, frozen_time);
}

#[test]
fn construction_seeds_viewport_camera_and_pixel_ratio() {
    let ctx = SceneContext::new(1280, 720, 3.0);
    assert_eq!(ctx.viewport.width, 1280);
    assert_eq!(ctx.viewport.height, 720);
    assert_eq!(ctx.viewport.pixel_ratio, 2.0);
    assert_eq!(ctx.uniforms.fireflies.pixel_ratio, 2.0);
    assert!((ctx.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
}

#[test]
fn resize_is_idempotent() {
    let mut ctx = SceneContext::new(800, 600, 1.0);
    ctx.handle_resize(1024, 768, 2.5);
    let viewport = ctx.viewport;
    let aspect = ctx.camera.aspect;

    ctx.handle_resize(1024, 768, 2.5);
    assert_eq!(ctx.viewport, viewport);
    assert_eq!(ctx.camera.aspect, aspect);
    assert_eq!(ctx.viewport.pixel_ratio, 2.0);
    assert_eq!(ctx.uniforms.fireflies.pixel_ratio, 2.0);
}
