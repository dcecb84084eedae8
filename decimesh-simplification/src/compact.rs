//! Final compaction
//!
//! Drops tombstoned faces and vertices no face references any more,
//! renumbering what is left densely while keeping the original order.

use decimesh_core::{Point3d, NULL_INDEX};

/// Whether `face` is a removed face.
pub fn is_tombstone(face: &[usize; 3]) -> bool {
    face[0] == NULL_INDEX
}

/// A compacted mesh and where each of its elements came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compacted {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
    /// Index of each new face in the face array that was compacted
    pub face_origin: Vec<usize>,
    /// Index of each new vertex in the vertex array that was compacted
    pub vertex_origin: Vec<usize>,
}

/// Compact `faces[..face_limit]`, ignoring tombstones; faces at or past
/// `face_limit` are dropped as well.
pub fn compact(positions: &[Point3d], faces: &[[usize; 3]], face_limit: usize) -> Compacted {
    let (face_origin, kept): (Vec<usize>, Vec<[usize; 3]>) = faces
        .iter()
        .take(face_limit)
        .enumerate()
        .filter(|(_, face)| !is_tombstone(face))
        .map(|(f, face)| (f, *face))
        .unzip();

    let mut referenced = vec![false; positions.len()];
    for face in &kept {
        for &v in face {
            referenced[v] = true;
        }
    }

    let mut new_index = vec![NULL_INDEX; positions.len()];
    let mut vertex_origin = Vec::new();
    for (v, _) in referenced.iter().enumerate().filter(|(_, used)| **used) {
        new_index[v] = vertex_origin.len();
        vertex_origin.push(v);
    }

    Compacted {
        vertices: vertex_origin.iter().map(|&v| positions[v]).collect(),
        faces: kept
            .iter()
            .map(|face| [new_index[face[0]], new_index[face[1]], new_index[face[2]]])
            .collect(),
        face_origin,
        vertex_origin,
    }
}
