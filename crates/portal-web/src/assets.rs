//! Fetch and decode of the portal scene container.
//!
//! The scene ships as an uncompressed binary glTF with four named nodes and
//! the baked lighting texture embedded as its only image. Decoding happens
//! here; validation of the required mesh names lives in `portal_core::scene`.

use anyhow::Context;
use fnv::FnvHashMap;
use portal_core::{BakedImage, MeshData, PortalScene, SceneError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {e:?}"))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: not a Response: {e:?}"))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("fetch {url}: {e:?}"))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("fetch {url}: {e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_portal_scene(url: &str) -> anyhow::Result<PortalScene> {
    let bytes = fetch_bytes(url).await?;
    let (doc, buffers, images) = gltf::import_slice(&bytes).context("decode scene glb")?;

    let mut meshes: FnvHashMap<String, MeshData> = FnvHashMap::default();
    for node in doc.nodes() {
        let Some(mesh) = node.mesh() else { continue };
        let Some(name) = node.name().or_else(|| mesh.name()) else {
            continue;
        };
        let mut data = MeshData::default();
        for prim in mesh.primitives() {
            let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let base = data.positions.len() as u32;
            let positions = reader
                .read_positions()
                .ok_or_else(|| SceneError::MissingAttribute {
                    name: name.to_string(),
                    attribute: "POSITION",
                })?;
            data.positions.extend(positions);
            if let Some(uvs) = reader.read_tex_coords(0) {
                data.uvs.extend(uvs.into_f32());
            }
            if let Some(indices) = reader.read_indices() {
                data.indices.extend(indices.into_u32().map(|i| i + base));
            }
        }
        // Positions are stored in mesh-local space; place them per the node
        data.apply_transform(node.transform().matrix());
        meshes.insert(name.to_string(), data);
    }

    let baked_image = images
        .into_iter()
        .next()
        .map(to_rgba8)
        .transpose()?
        .ok_or(SceneError::MissingBakedImage)?;

    Ok(PortalScene::from_parts(meshes, baked_image)?)
}

fn to_rgba8(data: gltf::image::Data) -> anyhow::Result<BakedImage> {
    use gltf::image::Format;
    let rgba = match data.format {
        Format::R8G8B8A8 => data.pixels,
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        other => anyhow::bail!("unsupported baked image format {other:?}"),
    };
    Ok(BakedImage {
        width: data.width,
        height: data.height,
        rgba,
    })
}
