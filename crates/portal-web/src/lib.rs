#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, SCENE_URL};
use portal_core::{fireflies, SceneContext, FIREFLIES_COUNT};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod panel;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portal-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let (width, height) = dom::window_inner_size(&window);
    let device_ratio = window.device_pixel_ratio() as f32;
    let scene = SceneContext::new(width, height, device_ratio);

    // Missing meshes or a bad container abort setup here; there is no
    // partial-scene fallback.
    let scene_assets = assets::load_portal_scene(SCENE_URL).await?;
    log::info!(
        "[scene] baked={}v portal={}v poles={}v/{}v baked_image={}x{}",
        scene_assets.baked.positions.len(),
        scene_assets.portal_light.positions.len(),
        scene_assets.pole_light_a.positions.len(),
        scene_assets.pole_light_b.positions.len(),
        scene_assets.baked_image.width,
        scene_assets.baked_image.height,
    );

    let field = fireflies::generate_random(FIREFLIES_COUNT);
    let gpu = frame::init_gpu(&canvas, &scene_assets, &field).await?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        canvas: canvas.clone(),
        gpu,
    }));

    events::wire_orbit_input(&canvas, frame_ctx.clone());
    events::wire_resize(frame_ctx.clone());
    panel::wire_controls(&document, frame_ctx.clone());

    frame::start_loop(frame_ctx);
    Ok(())
}
