//! glTF scene assembly for decoded mesh fragments
//!
//! This library turns per-fragment mesh summaries into one glTF document:
//! - [`assemble`]: one self-contained sub-document per fragment, with all
//!   accessor/buffer-view/buffer indices pre-offset by the fragment ordinal
//! - [`SceneBuilder`] / [`reconstruct`]: concatenation of sub-documents in
//!   ordinal order under a root node carrying the coordinate correction
//!
//! # Example
//!
//! ```no_run
//! use gltf_scene::*;
//!
//! let info = FragmentInfo {
//!     uri: "mesh/12:0:1".to_string(),
//!     vertex_count: 3,
//!     face_count: 1,
//!     bounds: compute_bounds(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
//!     normals: None,
//!     material: default_material(),
//! };
//!
//! let fragment = assemble(&info, 0, false);
//! let root = reconstruct(vec![fragment], "example");
//! let text = json::serialize::to_string_pretty(&root).unwrap();
//! ```

pub mod document;
pub mod fragment;
pub mod material;
pub mod utils;

pub use document::{reconstruct, SceneBuilder};
pub use fragment::{
    assemble, normal_bytes, FragmentDocument, FragmentInfo, FragmentLayout, FragmentNormals,
};
pub use material::{default_material, pbr_material};
pub use utils::{compute_bounds, encode_data_uri, Bounds};

// Re-export commonly used gltf-json types
pub use gltf_json as json;
