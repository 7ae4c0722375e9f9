//! Per-vertex normal estimation from face adjacency
//!
//! A vertex normal is the re-normalized sum of the unit normals of every
//! face that references it. Vertices no face references get a zero normal,
//! as do vertices whose adjacent face normals cancel out.

use crate::error::ParseError;
use glam::Vec3;
use rayon::prelude::*;
use smallvec::SmallVec;

/// Face indices adjacent to one vertex (most vertices have <= 8)
type FaceList = SmallVec<[u32; 8]>;

/// Vertex -> adjacent faces, one list per vertex ordinal
pub struct VertexAdjacency {
    faces: Vec<FaceList>,
}

impl VertexAdjacency {
    /// Build adjacency, validating every face index against `vertex_count`
    pub fn build(vertex_count: u32, faces: &[[u32; 3]]) -> Result<Self, ParseError> {
        let mut lists = vec![FaceList::new(); vertex_count as usize];

        for (face, indices) in faces.iter().enumerate() {
            let face_id = face as u32;
            for &index in indices {
                let list = lists
                    .get_mut(index as usize)
                    .ok_or(ParseError::FaceIndexOutOfRange {
                        face,
                        index,
                        vertex_count,
                    })?;
                // A face naming the same vertex twice still counts once
                if list.last() != Some(&face_id) {
                    list.push(face_id);
                }
            }
        }

        Ok(Self { faces: lists })
    }

    /// Faces adjacent to `vertex`
    pub fn faces_of(&self, vertex: usize) -> &[u32] {
        &self.faces[vertex]
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.faces[vertex].len()
    }

    pub fn vertex_count(&self) -> usize {
        self.faces.len()
    }
}

/// Unit normal of a clockwise face `(v0, v1, v2)`: `(v0 - v2) x (v0 - v1)`
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v0 - v2).cross(v0 - v1).normalize_or_zero()
}

/// Estimate one unit normal per vertex, in vertex order
pub fn estimate_normals(
    vertices: &[[f32; 3]],
    faces: &[[u32; 3]],
) -> Result<Vec<[f32; 3]>, ParseError> {
    let adjacency = VertexAdjacency::build(vertices.len() as u32, faces)?;

    // Every face is adjacent to its own vertices, so each normal is needed
    // and computed exactly once.
    let face_normals: Vec<Vec3> = faces
        .par_iter()
        .map(|&[a, b, c]| {
            face_normal(
                Vec3::from_array(vertices[a as usize]),
                Vec3::from_array(vertices[b as usize]),
                Vec3::from_array(vertices[c as usize]),
            )
        })
        .collect();

    let normals = (0..adjacency.vertex_count())
        .into_par_iter()
        .map(|vertex| {
            adjacency
                .faces_of(vertex)
                .iter()
                .map(|&face| face_normals[face as usize])
                .sum::<Vec3>()
                .normalize_or_zero()
                .to_array()
        })
        .collect();

    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn tetra() -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
        (
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < EPSILON,
                "{:?} != {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_face_normal_winding() {
        let normal = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_close(normal.to_array(), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let normal = face_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(normal, Vec3::ZERO);
    }

    #[test]
    fn test_adjacency() {
        let (_, faces) = tetra();
        let adjacency = VertexAdjacency::build(4, &faces).unwrap();

        assert_eq!(adjacency.faces_of(0), &[0, 1]);
        assert_eq!(adjacency.faces_of(1), &[0]);
        assert_eq!(adjacency.faces_of(2), &[0, 1]);
        assert_eq!(adjacency.faces_of(3), &[1]);
    }

    #[test]
    fn test_adjacency_counts_repeated_vertex_once() {
        let adjacency = VertexAdjacency::build(2, &[[0, 0, 1]]).unwrap();
        assert_eq!(adjacency.degree(0), 1);
    }

    #[test]
    fn test_tetra_normals() {
        let (vertices, faces) = tetra();
        let normals = estimate_normals(&vertices, &faces).unwrap();

        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(normals.len(), 4);
        assert_close(normals[0], [-half, 0.0, -half]);
        assert_close(normals[1], [0.0, 0.0, -1.0]);
        assert_close(normals[2], [-half, 0.0, -half]);
        assert_close(normals[3], [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unreferenced_vertex_is_zero() {
        let (mut vertices, faces) = tetra();
        vertices.push([5.0, 5.0, 5.0]);
        let normals = estimate_normals(&vertices, &faces).unwrap();
        assert_eq!(normals[4], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normals_are_unit_or_zero() {
        // Octahedron plus one stray vertex
        let vertices = vec![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
            [3.0, 3.0, 3.0],
        ];
        let faces = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];
        let normals = estimate_normals(&vertices, &faces).unwrap();

        for normal in &normals {
            let length = Vec3::from_array(*normal).length();
            assert!(length == 0.0 || (length - 1.0).abs() < EPSILON);
        }
        assert_eq!(normals[6], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_face_index() {
        let (vertices, _) = tetra();
        let result = estimate_normals(&vertices, &[[0, 1, 9]]);
        assert!(matches!(
            result,
            Err(ParseError::FaceIndexOutOfRange {
                face: 0,
                index: 9,
                vertex_count: 4,
            })
        ));
    }
}
