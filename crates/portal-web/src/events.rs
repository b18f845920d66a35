//! Pointer, wheel, and resize wiring.
//!
//! Event callbacks interleave with the frame loop only at iteration
//! boundaries (single-threaded event loop), so plain `RefCell` borrows are
//! safe here.

use crate::constants::{DOLLY_STEP, ORBIT_ROTATE_SPEED};
use crate::dom;
use crate::frame::FrameContext;
use crate::input;
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drag to orbit, wheel to dolly.
pub fn wire_orbit_input(
    canvas: &web::HtmlCanvasElement,
    ctx: Rc<RefCell<FrameContext<'static>>>,
) {
    let mouse = Rc::new(RefCell::new(input::MouseState::default()));

    {
        let mouse = mouse.clone();
        let canvas_for_down = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (x, y) = input::pointer_canvas_css(&ev, &canvas_for_down);
            let mut ms = mouse.borrow_mut();
            ms.x = x;
            ms.y = y;
            ms.down = true;
            let _ = canvas_for_down.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ =
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let mouse = mouse.clone();
        let ctx = ctx.clone();
        let canvas_for_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (x, y) = input::pointer_canvas_css(&ev, &canvas_for_move);
            let mut ms = mouse.borrow_mut();
            if ms.down {
                let rect = canvas_for_move.get_bounding_client_rect();
                let height = rect.height().max(1.0) as f32;
                // A full-height drag sweeps one full turn
                let dx = x - ms.x;
                let dy = y - ms.y;
                let mut c = ctx.borrow_mut();
                c.scene.controls.rotate(
                    -TAU * dx / height * ORBIT_ROTATE_SPEED,
                    -TAU * dy / height * ORBIT_ROTATE_SPEED,
                );
            }
            ms.x = x;
            ms.y = y;
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    {
        let mouse = mouse.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            mouse.borrow_mut().down = false;
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    {
        let ctx = ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            let factor = if ev.delta_y() < 0.0 {
                DOLLY_STEP
            } else {
                1.0 / DOLLY_STEP
            };
            ctx.borrow_mut().scene.controls.dolly(factor);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Viewport responder: on window resize, re-sync the canvas backing store
/// and push the new dimensions and density into the scene state. The GPU
/// surface reconfigures lazily on the next frame.
pub fn wire_resize(ctx: Rc<RefCell<FrameContext<'static>>>) {
    let closure = Closure::wrap(Box::new(move || {
        if let Some(window) = web::window() {
            let (width, height) = dom::window_inner_size(&window);
            let dpr = window.device_pixel_ratio() as f32;
            let mut c = ctx.borrow_mut();
            dom::sync_canvas_backing_size(&c.canvas);
            c.scene.handle_resize(width, height, dpr);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
