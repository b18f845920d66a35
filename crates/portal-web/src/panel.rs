//! Debug control panel: a handful of plain DOM inputs that write into the
//! uniform store through its setters. The page may omit any of them.

use crate::constants::{
    PANEL_CLEAR_COLOR, PANEL_FIREFLIES_SIZE, PANEL_PORTAL_COLOR_END, PANEL_PORTAL_COLOR_START,
};
use crate::dom;
use crate::frame::FrameContext;
use portal_core::hex_to_linear_rgb;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_controls(document: &web::Document, ctx: Rc<RefCell<FrameContext<'static>>>) {
    {
        let ctx = ctx.clone();
        dom::add_value_listener(document, PANEL_PORTAL_COLOR_START, move |hex| {
            ctx.borrow_mut()
                .scene
                .uniforms
                .set_portal_color_start_hex(&hex);
        });
    }
    {
        let ctx = ctx.clone();
        dom::add_value_listener(document, PANEL_PORTAL_COLOR_END, move |hex| {
            ctx.borrow_mut()
                .scene
                .uniforms
                .set_portal_color_end_hex(&hex);
        });
    }
    {
        let ctx = ctx.clone();
        dom::add_value_listener(document, PANEL_FIREFLIES_SIZE, move |value| {
            if let Ok(size) = value.parse::<f32>() {
                ctx.borrow_mut().scene.uniforms.set_point_size(size);
            }
        });
    }
    {
        let ctx = ctx.clone();
        dom::add_value_listener(document, PANEL_CLEAR_COLOR, move |hex| {
            if let Some(rgb) = hex_to_linear_rgb(&hex) {
                ctx.borrow_mut().gpu.set_clear_color(rgb);
            }
        });
    }
}
