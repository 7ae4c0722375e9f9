//! Fragment buffer decoding
//!
//! Layout (little-endian):
//! - `[0..4)` vertex count (int32)
//! - `vertex_count x 3 x float32` positions
//! - `face_count x 3 x uint32` vertex indices, to the end of the buffer

use super::types::{DecodedMesh, MeshHeader, FACE_BYTES, HEADER_BYTES, VERTEX_BYTES};
use crate::error::ParseError;

/// Read the header and derive the face count
pub fn parse_header(buffer: &[u8]) -> Result<MeshHeader, ParseError> {
    let Some(header) = buffer.first_chunk::<HEADER_BYTES>() else {
        return Err(ParseError::MissingHeader { len: buffer.len() });
    };

    let raw_count = i32::from_le_bytes(*header);
    let vertex_count =
        u32::try_from(raw_count).map_err(|_| ParseError::NegativeVertexCount(raw_count))?;

    let face_offset = HEADER_BYTES + vertex_count as usize * VERTEX_BYTES;
    if buffer.len() < face_offset {
        return Err(ParseError::TruncatedVertices {
            vertex_count,
            needed: face_offset,
            len: buffer.len(),
        });
    }

    let face_bytes = buffer.len() - face_offset;
    if face_bytes % FACE_BYTES != 0 {
        return Err(ParseError::MisalignedFaces { len: face_bytes });
    }

    Ok(MeshHeader {
        vertex_count,
        face_offset,
        face_count: face_bytes / FACE_BYTES,
    })
}

/// Decode vertex positions and faces from a fragment buffer
pub fn decode(buffer: &[u8]) -> Result<DecodedMesh, ParseError> {
    let header = parse_header(buffer)?;

    let vertices = buffer[HEADER_BYTES..header.face_offset]
        .chunks_exact(VERTEX_BYTES)
        .map(|chunk| {
            [
                f32::from_le_bytes(word(chunk, 0)),
                f32::from_le_bytes(word(chunk, 1)),
                f32::from_le_bytes(word(chunk, 2)),
            ]
        })
        .collect();

    let faces = buffer[header.face_offset..]
        .chunks_exact(FACE_BYTES)
        .map(|chunk| {
            [
                u32::from_le_bytes(word(chunk, 0)),
                u32::from_le_bytes(word(chunk, 1)),
                u32::from_le_bytes(word(chunk, 2)),
            ]
        })
        .collect();

    Ok(DecodedMesh { vertices, faces })
}

/// Encode a mesh into the fragment buffer layout
pub fn encode(mesh: &DecodedMesh) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(
        HEADER_BYTES + mesh.vertices.len() * VERTEX_BYTES + mesh.faces.len() * FACE_BYTES,
    );
    buffer.extend_from_slice(&(mesh.vertices.len() as i32).to_le_bytes());
    for vertex in &mesh.vertices {
        for component in vertex {
            buffer.extend_from_slice(&component.to_le_bytes());
        }
    }
    for face in &mesh.faces {
        for index in face {
            buffer.extend_from_slice(&index.to_le_bytes());
        }
    }
    buffer
}

/// The `n`th 4-byte word of a 12-byte chunk
fn word(chunk: &[u8], n: usize) -> [u8; 4] {
    let at = n * 4;
    [chunk[at], chunk[at + 1], chunk[at + 2], chunk[at + 3]]
}
