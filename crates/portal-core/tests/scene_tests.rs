use fnv::FnvHashMap;
use portal_core::scene::{BakedImage, MeshData, PortalScene, SceneError, REQUIRED_MESHES};

fn dummy_image() -> BakedImage {
    BakedImage {
        width: 1,
        height: 1,
        rgba: vec![255, 255, 255, 255],
    }
}

fn mesh_with(vertex_count: usize) -> MeshData {
    MeshData {
        positions: vec![[0.0; 3]; vertex_count],
        uvs: vec![[0.0; 2]; vertex_count],
        indices: (0..vertex_count as u32).collect(),
    }
}

fn all_meshes() -> FnvHashMap<String, MeshData> {
    REQUIRED_MESHES
        .iter()
        .map(|name| (name.to_string(), mesh_with(3)))
        .collect()
}

#[test]
fn assembles_from_all_required_meshes() {
    let scene = PortalScene::from_parts(all_meshes(), dummy_image()).unwrap();
    assert_eq!(scene.baked.positions.len(), 3);
    assert_eq!(scene.portal_light.indices.len(), 3);
    assert_eq!(scene.baked_image.width, 1);
}

#[test]
fn extra_meshes_are_tolerated() {
    let mut meshes = all_meshes();
    meshes.insert("floorDecal".to_string(), mesh_with(3));
    assert!(PortalScene::from_parts(meshes, dummy_image()).is_ok());
}

#[test]
fn missing_mesh_is_named_in_the_error() {
    for missing in REQUIRED_MESHES {
        let mut meshes = all_meshes();
        meshes.remove(missing);
        match PortalScene::from_parts(meshes, dummy_image()) {
            Err(SceneError::MissingMesh(name)) => assert_eq!(name, missing),
            other => panic!("expected MissingMesh({missing}), got {other:?}"),
        }
    }
}

#[test]
fn node_transform_is_baked_into_positions() {
    let mut mesh = MeshData {
        positions: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 2.0]],
        uvs: vec![[0.0; 2]; 2],
        indices: vec![0, 1],
    };
    // Uniform scale by 2, then translate by (3, 0, -1): column-major
    mesh.apply_transform([
        [2.0, 0.0, 0.0, 0.0],
        [0.0, 2.0, 0.0, 0.0],
        [0.0, 0.0, 2.0, 0.0],
        [3.0, 0.0, -1.0, 1.0],
    ]);
    assert_eq!(mesh.positions[0], [5.0, 0.0, -1.0]);
    assert_eq!(mesh.positions[1], [3.0, 2.0, 3.0]);
}

#[test]
fn identity_transform_leaves_positions_untouched() {
    let mut mesh = mesh_with(3);
    mesh.positions = vec![[0.5, -0.25, 1.0]; 3];
    let before = mesh.positions.clone();
    mesh.apply_transform([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    assert_eq!(mesh.positions, before);
}

#[test]
fn error_messages_are_descriptive() {
    let err = SceneError::MissingMesh("portalLight");
    assert_eq!(
        err.to_string(),
        "scene file is missing required mesh `portalLight`"
    );

    let err = SceneError::MissingAttribute {
        name: "baked".to_string(),
        attribute: "TEXCOORD_0",
    };
    assert!(err.to_string().contains("baked"));
    assert!(err.to_string().contains("TEXCOORD_0"));
}
