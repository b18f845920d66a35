use crate::render;
use portal_core::{FireflyField, PortalScene, SceneContext};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one animation iteration touches: the core scene state plus the
/// GPU surface it renders into.
pub struct FrameContext<'a> {
    pub scene: SceneContext,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState<'a>,
}

impl<'a> FrameContext<'a> {
    /// One iteration: tick the scene (clock sample, uniform time, orbit
    /// damping step), then draw. Returns false once the loop is cancelled.
    pub fn frame(&mut self) -> bool {
        if self.scene.tick().is_none() {
            return false;
        }
        let w = self.canvas.width();
        let h = self.canvas.height();
        self.gpu.resize_if_needed(w, h);
        if let Err(e) = self.gpu.render(&self.scene) {
            // No recovery path: context loss ends the session
            log::error!("render error: {:?}", e);
        }
        true
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &PortalScene,
    fireflies: &FireflyField,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, scene, fireflies).await
}

/// Drive the frame loop off requestAnimationFrame: the closure re-arms
/// itself after each iteration rather than recursing, and stops re-arming
/// once the scene's cancel token fires.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow_mut().frame() {
            return;
        }
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
