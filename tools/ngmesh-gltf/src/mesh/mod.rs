//! Fragment buffers: decoding, winding inversion and normal estimation

mod decode;
mod invert;
mod normals;
mod types;

// Re-export public API
pub use decode::{decode, encode, parse_header};
pub use invert::invert_faces;
pub use normals::{estimate_normals, face_normal, VertexAdjacency};
pub use types::{DecodedMesh, MeshHeader, FACE_BYTES, HEADER_BYTES, VERTEX_BYTES};
