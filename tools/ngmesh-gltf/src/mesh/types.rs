//! Types and constants for fragment buffers

/// Size of the little-endian int32 vertex count header
pub const HEADER_BYTES: usize = 4;

/// Size of one vertex position (3 x float32)
pub const VERTEX_BYTES: usize = 12;

/// Size of one face (3 x uint32)
pub const FACE_BYTES: usize = 12;

/// Layout of a fragment buffer, derived from its header and length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHeader {
    pub vertex_count: u32,
    /// Byte offset of the first face
    pub face_offset: usize,
    /// Derived from the remaining byte length, never stored
    pub face_count: usize,
}

/// A decoded fragment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMesh {
    pub vertices: Vec<[f32; 3]>,
    /// Vertex index triples, clockwise winding
    pub faces: Vec<[u32; 3]>,
}

impl DecodedMesh {
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}
