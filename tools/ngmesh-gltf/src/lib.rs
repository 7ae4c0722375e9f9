//! ngmesh-gltf library
//!
//! Converts precomputed binary mesh fragments, read from a local directory or
//! an HTTP root, into a single glTF scene document.

pub mod convert;
pub mod error;
pub mod index;
pub mod manifest;
pub mod material;
pub mod mesh;
pub mod source;

pub use convert::{convert, convert_from_local, convert_from_remote, ConvertOptions, GENERATOR};
pub use error::{Error, ParseError, Result};
pub use material::{parse_label, resolve_material, LabelMaterialMap};
pub use mesh::{decode, estimate_normals, invert_faces, parse_header, DecodedMesh, MeshHeader};

// Re-export the scene types conversions produce
pub use gltf_scene::{default_material, json};
