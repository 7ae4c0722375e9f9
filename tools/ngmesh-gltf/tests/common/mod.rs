//! Programmatic mesh directories for integration tests.
//!
//! Writes `<label>:0` index documents and their fragment buffers, using the
//! crate's own encoder for the binary layout.

#![allow(dead_code)]

use ngmesh_gltf::mesh::encode;
use ngmesh_gltf::DecodedMesh;
use std::collections::HashMap;
use std::path::Path;

/// Regular tetrahedron-ish fragment: 4 vertices, 4 faces
pub fn tetra() -> DecodedMesh {
    DecodedMesh {
        vertices: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
        faces: vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]],
    }
}

/// Single triangle fragment offset along x
pub fn triangle(offset: f32) -> DecodedMesh {
    DecodedMesh {
        vertices: vec![
            [offset, 0.0, 0.0],
            [offset + 1.0, 0.0, 0.0],
            [offset, 1.0, 0.0],
        ],
        faces: vec![[0, 1, 2]],
    }
}

/// Index document body listing `fragments`
pub fn index_document(fragments: &[&str]) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "fragments": fragments }))
        .expect("Failed to serialize index document")
}

/// All files of a mesh set: index documents plus fragment buffers
///
/// Each object is `(label, [(fragment suffix, mesh)])`; fragments are named
/// `<label>:0:<suffix>`.
pub fn mesh_files(objects: &[(u64, Vec<(&str, DecodedMesh)>)]) -> HashMap<String, Vec<u8>> {
    let mut files = HashMap::new();
    for (label, fragments) in objects {
        let names: Vec<String> = fragments
            .iter()
            .map(|(suffix, _)| format!("{label}:0:{suffix}"))
            .collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        files.insert(format!("{label}:0"), index_document(&refs));

        for (name, (_, mesh)) in names.iter().zip(fragments) {
            files.insert(name.clone(), encode(mesh));
        }
    }
    files
}

/// Write a mesh set into `dir`
pub fn write_mesh_dir(dir: &Path, objects: &[(u64, Vec<(&str, DecodedMesh)>)]) {
    for (name, bytes) in mesh_files(objects) {
        std::fs::write(dir.join(&name), bytes).expect("Failed to write mesh file");
    }
}

/// Serialize a scene document and parse it back with the glTF loader
pub fn reparse(root: &ngmesh_gltf::json::Root) -> gltf::Gltf {
    let bytes = ngmesh_gltf::json::serialize::to_vec(root).expect("Failed to serialize scene");
    gltf::Gltf::from_slice(&bytes).expect("Scene should be a valid glTF document")
}
