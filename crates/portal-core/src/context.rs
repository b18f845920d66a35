//! The per-frame tick orchestrator.
//!
//! `SceneContext` owns every piece of mutable scene state so nothing lives in
//! globals: the clock, the uniform store, the viewport, and the camera with
//! its orbit controls. The animation loop drives `tick()` once per displayed
//! frame; the resize handler drives `handle_resize()`.

use std::cell::Cell;
use std::rc::Rc;

use crate::camera::Camera;
use crate::clock::FrameClock;
use crate::orbit::OrbitControls;
use crate::uniforms::UniformStore;
use crate::viewport::ViewportState;

/// Cooperative stop signal for the animation loop. Normally never fired; it
/// exists so the loop can be terminated deterministically.
#[derive(Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct SceneContext {
    pub clock: FrameClock,
    pub uniforms: UniformStore,
    pub viewport: ViewportState,
    pub camera: Camera,
    pub controls: OrbitControls,
    cancel: CancelToken,
}

impl SceneContext {
    /// Construct the scene state from the initial display dimensions.
    pub fn new(width: u32, height: u32, device_ratio: f32) -> Self {
        let viewport = ViewportState::new(width, height, device_ratio);
        let camera = Camera::portal_default(viewport.aspect());
        let controls = OrbitControls::new(camera.eye, camera.target);
        let mut uniforms = UniformStore::default();
        uniforms.set_pixel_ratio(device_ratio);
        Self {
            clock: FrameClock::start(),
            uniforms,
            viewport,
            camera,
            controls,
            cancel: CancelToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// One animation step: sample the clock, publish `time` to both shader
    /// uniform sets, and advance the orbit damping by one step. Returns the
    /// sampled elapsed time, or `None` once the loop has been cancelled.
    pub fn tick(&mut self) -> Option<f32> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let elapsed = self.clock.elapsed();
        self.uniforms.set_time(elapsed);
        self.controls.update();
        self.controls.apply_to(&mut self.camera);
        Some(elapsed)
    }

    /// Viewport responder: repeated calls with identical arguments leave the
    /// state unchanged.
    pub fn handle_resize(&mut self, width: u32, height: u32, device_ratio: f32) {
        self.viewport = ViewportState::new(width, height, device_ratio);
        self.camera.aspect = self.viewport.aspect();
        self.uniforms.set_pixel_ratio(device_ratio);
    }
}
