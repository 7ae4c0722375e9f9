//! Face winding inversion

use super::decode::parse_header;
use super::types::FACE_BYTES;
use crate::error::ParseError;

/// Reverse the winding of every face in a fragment buffer
///
/// The header and vertex block are copied unchanged. Each face `(a, b, c)`
/// becomes `(a, c, b)`. Bytes are moved, not reinterpreted, so applying this
/// twice returns the original buffer exactly.
pub fn invert_faces(buffer: &[u8]) -> Result<Vec<u8>, ParseError> {
    let header = parse_header(buffer)?;
    tracing::debug!("Inverting {} faces", header.face_count);

    let mut output = Vec::with_capacity(buffer.len());
    output.extend_from_slice(&buffer[..header.face_offset]);

    for (face, chunk) in buffer[header.face_offset..]
        .chunks_exact(FACE_BYTES)
        .enumerate()
    {
        if face % 100 == 0 {
            tracing::trace!("Inverting face {}", face);
        }
        output.extend_from_slice(&chunk[0..4]);
        output.extend_from_slice(&chunk[8..12]);
        output.extend_from_slice(&chunk[4..8]);
    }

    Ok(output)
}
