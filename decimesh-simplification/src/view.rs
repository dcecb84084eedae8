//! Read-only view of a mesh under decimation, handed to every callback.

use crate::compact::is_tombstone;
use crate::topology::EdgeTopology;
use decimesh_core::Point3d;

/// Borrowed snapshot of the working mesh.
///
/// Faces removed by earlier collapses are still present in [`faces`] as
/// tombstones; use [`live_faces`] to skip them.
///
/// [`faces`]: MeshView::faces
/// [`live_faces`]: MeshView::live_faces
#[derive(Debug, Clone, Copy)]
pub struct MeshView<'a> {
    positions: &'a [Point3d],
    faces: &'a [[usize; 3]],
    topology: &'a EdgeTopology,
    live_face_count: usize,
}

impl<'a> MeshView<'a> {
    pub(crate) fn new(
        positions: &'a [Point3d],
        faces: &'a [[usize; 3]],
        topology: &'a EdgeTopology,
        live_face_count: usize,
    ) -> Self {
        Self {
            positions,
            faces,
            topology,
            live_face_count,
        }
    }

    pub fn positions(&self) -> &'a [Point3d] {
        self.positions
    }

    pub fn position(&self, vertex: usize) -> &'a Point3d {
        &self.positions[vertex]
    }

    pub fn faces(&self) -> &'a [[usize; 3]] {
        self.faces
    }

    /// Faces that have not been removed, with their indices.
    pub fn live_faces(&self) -> impl Iterator<Item = (usize, &'a [usize; 3])> + 'a {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| !is_tombstone(face))
    }

    pub fn live_face_count(&self) -> usize {
        self.live_face_count
    }

    pub fn topology(&self) -> &'a EdgeTopology {
        self.topology
    }

    /// Current endpoints of `edge`.
    pub fn edge(&self, edge: usize) -> [usize; 2] {
        self.topology.edge(edge)
    }

    pub fn is_boundary_edge(&self, edge: usize) -> bool {
        self.topology.is_boundary(edge)
    }

    /// Squared length of `edge`.
    pub fn edge_length_squared(&self, edge: usize) -> f64 {
        let [a, b] = self.edge(edge);
        (self.positions[a] - self.positions[b]).norm_squared()
    }
}

/// What a successful collapse did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseRecord {
    /// The contracted edge
    pub edge: usize,
    /// Endpoint that remains, now at `placement`
    pub survivor: usize,
    /// Endpoint merged into the survivor
    pub removed: usize,
    pub placement: Point3d,
    pub cost: f64,
    /// The two faces that flapped the edge, now tombstoned
    pub removed_faces: [usize; 2],
    /// The edge from each removed face's apex to `removed`, merged away
    pub removed_edges: [usize; 2],
}
