//! Integration tests for the ngmesh-gltf binary

mod common;

use common::{tetra, triangle, write_mesh_dir};
use ngmesh_gltf::mesh::{decode, encode};
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn ngmesh_gltf(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ngmesh-gltf"))
        .args(args)
        .output()
        .expect("Failed to run ngmesh-gltf")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("Temp path should be UTF-8")
}

#[test]
fn test_invert_command() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("12:0:a");
    std::fs::write(&input, encode(&tetra())).unwrap();

    let output = ngmesh_gltf(&["invert", path_arg(&input)]);
    assert!(output.status.success(), "invert command failed");

    let inverted_path = dir.path().join("12:0:a.inverted");
    let inverted = decode(&std::fs::read(&inverted_path).expect("Inverted file should exist"))
        .expect("Inverted file should decode");
    let original = tetra();

    assert_eq!(inverted.vertices, original.vertices);
    for (flipped, face) in inverted.faces.iter().zip(&original.faces) {
        assert_eq!(*flipped, [face[0], face[2], face[1]]);
    }
}

#[test]
fn test_invert_explicit_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("fragment");
    let out = dir.path().join("flipped");
    std::fs::write(&input, encode(&triangle(0.0))).unwrap();

    let output = ngmesh_gltf(&["invert", path_arg(&input), "-o", path_arg(&out)]);
    assert!(output.status.success(), "invert command failed");
    assert_eq!(
        decode(&std::fs::read(&out).unwrap()).unwrap().faces,
        vec![[0, 2, 1]]
    );
}

#[test]
fn test_invert_rejects_malformed_buffer() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("broken");
    std::fs::write(&input, [0u8, 0, 0, 0, 1, 2, 3]).unwrap();

    let output = ngmesh_gltf(&["invert", path_arg(&input)]);
    assert!(!output.status.success());
    assert!(!dir.path().join("broken.inverted").exists());
}

#[test]
fn test_info_command() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("12:0:a");
    std::fs::write(&input, encode(&tetra())).unwrap();

    let output = ngmesh_gltf(&["info", path_arg(&input)]);
    assert!(output.status.success(), "info command failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 vertices, 4 faces"), "unexpected output: {stdout}");
}

#[test]
fn test_local_command_writes_gltf() {
    let dir = tempdir().expect("Failed to create temp dir");
    let meshes = dir.path().join("mesh");
    std::fs::create_dir(&meshes).unwrap();
    write_mesh_dir(&meshes, &[(12, vec![("a", tetra())]), (13, vec![("a", triangle(0.0))])]);

    let manifest = dir.path().join("labels.toml");
    std::fs::write(
        &manifest,
        "[options]\ncalculate_normal = false\n\n[labels]\n13 = \"default\"\n",
    )
    .unwrap();

    let scene = dir.path().join("scene.gltf");
    let output = ngmesh_gltf(&[
        "local",
        path_arg(&meshes),
        "-m",
        path_arg(&manifest),
        "-o",
        path_arg(&scene),
    ]);
    assert!(output.status.success(), "local command failed");

    let bytes = std::fs::read(&scene).expect("Scene file should exist");
    let gltf = gltf::Gltf::from_slice(&bytes).expect("Scene should be valid glTF");
    assert_eq!(gltf.nodes().count(), 2);
    assert_eq!(gltf.accessors().count(), 2);
    assert_eq!(gltf.buffers().count(), 1);
    assert_eq!(gltf.document.as_json().asset.generator.as_deref(), Some("ngmesh-gltf"));
}

#[test]
fn test_local_command_no_normals_flag() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_mesh_dir(dir.path(), &[(1, vec![("a", tetra())])]);

    let scene = dir.path().join("out.gltf");
    let output = ngmesh_gltf(&["local", path_arg(dir.path()), "--no-normals", "-o", path_arg(&scene)]);
    assert!(output.status.success(), "local command failed");

    let bytes = std::fs::read(&scene).expect("Scene file should exist");
    let gltf = gltf::Gltf::from_slice(&bytes).expect("Scene should be valid glTF");
    assert_eq!(gltf.accessors().count(), 2);
}

#[test]
fn test_remote_command_requires_manifest() {
    let output = ngmesh_gltf(&["remote", "http://127.0.0.1:9"]);
    assert!(!output.status.success());
}
