//! Validated contents of the portal scene file.
//!
//! The scene container must provide exactly four named meshes; anything less
//! is a fatal setup error. Decoding the container itself is the web layer's
//! job, this module only owns the validated result and its error taxonomy.

use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use thiserror::Error;

/// Mesh names the scene file must contain.
pub const REQUIRED_MESHES: [&str; 4] = ["baked", "poleLightA", "poleLightB", "portalLight"];

/// Triangle mesh extracted from the scene file.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Bake a node's transform (column-major 4x4) into the positions, so
    /// meshes authored with non-identity placements land where the scene
    /// file puts them.
    pub fn apply_transform(&mut self, matrix: [[f32; 4]; 4]) {
        let m = Mat4::from_cols_array_2d(&matrix);
        if m == Mat4::IDENTITY {
            return;
        }
        for p in &mut self.positions {
            *p = m.transform_point3(Vec3::from_array(*p)).to_array();
        }
    }
}

/// Decoded baked-lighting texture, tightly packed RGBA8.
#[derive(Clone, Debug)]
pub struct BakedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene file is missing required mesh `{0}`")]
    MissingMesh(&'static str),
    #[error("mesh `{name}` has no {attribute} attribute")]
    MissingAttribute {
        name: String,
        attribute: &'static str,
    },
    #[error("scene file contains no baked lighting image")]
    MissingBakedImage,
}

/// The four meshes of the hand-authored scene plus its baked lighting.
#[derive(Debug)]
pub struct PortalScene {
    pub baked: MeshData,
    pub pole_light_a: MeshData,
    pub pole_light_b: MeshData,
    pub portal_light: MeshData,
    pub baked_image: BakedImage,
}

impl PortalScene {
    /// Assemble from named meshes; fails on the first absent required name.
    pub fn from_parts(
        mut meshes: FnvHashMap<String, MeshData>,
        baked_image: BakedImage,
    ) -> Result<Self, SceneError> {
        let baked = take_mesh(&mut meshes, REQUIRED_MESHES[0])?;
        let pole_light_a = take_mesh(&mut meshes, REQUIRED_MESHES[1])?;
        let pole_light_b = take_mesh(&mut meshes, REQUIRED_MESHES[2])?;
        let portal_light = take_mesh(&mut meshes, REQUIRED_MESHES[3])?;
        Ok(Self {
            baked,
            pole_light_a,
            pole_light_b,
            portal_light,
            baked_image,
        })
    }
}

fn take_mesh(
    meshes: &mut FnvHashMap<String, MeshData>,
    name: &'static str,
) -> Result<MeshData, SceneError> {
    meshes.remove(name).ok_or(SceneError::MissingMesh(name))
}
