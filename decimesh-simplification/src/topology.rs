//! Edge topology index
//!
//! Derives, from a triangle list, the unique undirected edges, the edge
//! opposite every face corner, and for each edge the (up to two) incident
//! faces together with the corner of each face that lies across the edge.
//! The index is built once and then patched locally after every collapse.

use decimesh_core::{ManifoldViolation, NULL_INDEX};
use std::collections::HashMap;

/// A face incident to an edge and the corner of that face opposite the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flap {
    pub face: usize,
    pub corner: usize,
}

/// Edge/face incidence of a triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct EdgeTopology {
    /// Endpoints of every edge; `[NULL_INDEX; 2]` once the edge is gone
    edges: Vec<[usize; 2]>,
    /// Edge opposite corner `c` of face `f`, stored at `3 * f + c`
    emap: Vec<usize>,
    flaps: Vec<[Option<Flap>; 2]>,
}

impl EdgeTopology {
    /// Build the index for `faces`.
    ///
    /// Fails when an edge is incident to more than two faces. Faces are
    /// expected to have three distinct vertices.
    pub fn build(faces: &[[usize; 3]]) -> Result<Self, ManifoldViolation> {
        let mut index: HashMap<(usize, usize), usize> = HashMap::with_capacity(faces.len() * 2);
        let mut edges = Vec::with_capacity(faces.len() * 3 / 2 + 3);
        let mut flaps: Vec<[Option<Flap>; 2]> = Vec::with_capacity(faces.len() * 3 / 2 + 3);
        let mut emap = vec![NULL_INDEX; faces.len() * 3];

        for (f, face) in faces.iter().enumerate() {
            for corner in 0..3 {
                let (a, b) = (face[(corner + 1) % 3], face[(corner + 2) % 3]);
                let key = (a.min(b), a.max(b));
                let e = *index.entry(key).or_insert_with(|| {
                    edges.push([key.0, key.1]);
                    flaps.push([None, None]);
                    edges.len() - 1
                });
                emap[3 * f + corner] = e;

                let flap = Some(Flap { face: f, corner });
                if flaps[e][0].is_none() {
                    flaps[e][0] = flap;
                } else if flaps[e][1].is_none() {
                    flaps[e][1] = flap;
                } else {
                    let shared = faces
                        .iter()
                        .filter(|g| g.contains(&key.0) && g.contains(&key.1))
                        .count();
                    return Err(ManifoldViolation::OverSharedEdge {
                        edge: [key.0, key.1],
                        faces: shared,
                    });
                }
            }
        }

        Ok(Self { edges, emap, flaps })
    }

    /// Number of edge ids, including edges removed by collapses.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges still present in the mesh.
    pub fn live_edge_count(&self) -> usize {
        (0..self.edges.len()).filter(|&e| self.is_live(e)).count()
    }

    pub fn edge(&self, e: usize) -> [usize; 2] {
        self.edges[e]
    }

    pub fn is_live(&self, e: usize) -> bool {
        self.edges[e][0] != NULL_INDEX
    }

    /// Edge opposite `corner` of face `face`.
    pub fn edge_opposite(&self, face: usize, corner: usize) -> usize {
        self.emap[3 * face + corner]
    }

    /// The two edges of `face` that meet at `corner`.
    pub fn edges_at_corner(&self, face: usize, corner: usize) -> [usize; 2] {
        [
            self.emap[3 * face + (corner + 1) % 3],
            self.emap[3 * face + (corner + 2) % 3],
        ]
    }

    pub fn flaps(&self, e: usize) -> [Option<Flap>; 2] {
        self.flaps[e]
    }

    /// Both flaps of an interior edge, `None` for boundary or removed edges.
    pub fn interior_flaps(&self, e: usize) -> Option<[Flap; 2]> {
        match self.flaps[e] {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    /// A live edge with exactly one incident face.
    pub fn is_boundary(&self, e: usize) -> bool {
        self.is_live(e) && self.flaps[e].iter().filter(|f| f.is_some()).count() == 1
    }

    /// The flap of `e` on the side away from `face`.
    pub fn other_flap(&self, e: usize, face: usize) -> Option<Flap> {
        self.flaps[e]
            .iter()
            .flatten()
            .find(|flap| flap.face != face)
            .copied()
    }

    fn replace_flap(&mut self, e: usize, face: usize, with: Option<Flap>) {
        if let Some(slot) = self.flaps[e]
            .iter_mut()
            .find(|slot| matches!(**slot, Some(flap) if flap.face == face))
        {
            *slot = with;
        }
    }

    fn kill(&mut self, e: usize) {
        self.edges[e] = [NULL_INDEX; 2];
        self.flaps[e] = [None, None];
    }

    /// Detach face `face` from the index ahead of collapsing the edge between
    /// corners `corner_kept` and `corner_removed`.
    ///
    /// The face's edge running to the removed vertex disappears and the face
    /// beyond it is stitched onto the face's edge running to the kept vertex.
    /// Returns `(kept_edge, removed_edge)`.
    pub(crate) fn splice_flap(
        &mut self,
        face: usize,
        corner_kept: usize,
        corner_removed: usize,
    ) -> (usize, usize) {
        let kept = self.edge_opposite(face, corner_removed);
        let removed = self.edge_opposite(face, corner_kept);
        let beyond = self.other_flap(removed, face);

        self.replace_flap(kept, face, beyond);
        if let Some(flap) = beyond {
            self.emap[3 * flap.face + flap.corner] = kept;
        }
        self.kill(removed);
        (kept, removed)
    }

    /// Rename endpoint `from` to `to` on the two edges of `face` meeting at
    /// `corner`.
    pub(crate) fn rename_corner_edges(&mut self, face: usize, corner: usize, from: usize, to: usize) {
        for e in self.edges_at_corner(face, corner) {
            for end in self.edges[e].iter_mut() {
                if *end == from {
                    *end = to;
                }
            }
        }
    }

    /// Remove the collapsed edge itself.
    pub(crate) fn remove_edge(&mut self, e: usize) {
        self.kill(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decimesh_core::primitives::{grid, icosahedron, tetrahedron};

    #[test]
    fn test_tetrahedron_edges_are_interior() {
        let mesh = tetrahedron();
        let topology = EdgeTopology::build(&mesh.faces).unwrap();
        assert_eq!(topology.edge_count(), 6);
        for e in 0..6 {
            assert!(!topology.is_boundary(e));
            assert!(topology.interior_flaps(e).is_some());
        }
    }

    #[test]
    fn test_single_triangle_edges_are_boundary() {
        let topology = EdgeTopology::build(&[[0, 1, 2]]).unwrap();
        assert_eq!(topology.edge_count(), 3);
        for e in 0..3 {
            assert!(topology.is_boundary(e));
            assert!(topology.interior_flaps(e).is_none());
        }
    }

    #[test]
    fn test_emap_matches_face_corners() {
        let mesh = icosahedron();
        let topology = EdgeTopology::build(&mesh.faces).unwrap();
        assert_eq!(topology.edge_count(), 30);
        for (f, face) in mesh.faces.iter().enumerate() {
            for c in 0..3 {
                let e = topology.edge_opposite(f, c);
                let [a, b] = topology.edge(e);
                let (u, v) = (face[(c + 1) % 3], face[(c + 2) % 3]);
                assert_eq!((a, b), (u.min(v), u.max(v)));
                assert!(topology
                    .flaps(e)
                    .contains(&Some(Flap { face: f, corner: c })));
            }
        }
    }

    #[test]
    fn test_grid_edge_counts() {
        let (nx, ny) = (4, 3);
        let mesh = grid(nx, ny);
        let topology = EdgeTopology::build(&mesh.faces).unwrap();
        let expected = (nx + 1) * ny + nx * (ny + 1) + nx * ny;
        assert_eq!(topology.edge_count(), expected);
        let boundary = (0..expected).filter(|&e| topology.is_boundary(e)).count();
        assert_eq!(boundary, 2 * (nx + ny));
    }

    #[test]
    fn test_over_shared_edge_is_rejected() {
        let faces = [[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        let err = EdgeTopology::build(&faces).unwrap_err();
        assert_eq!(
            err,
            ManifoldViolation::OverSharedEdge {
                edge: [0, 1],
                faces: 3
            }
        );
    }

    #[test]
    fn test_splice_flap_reroutes_neighbour() {
        // Two triangles sharing edge (1, 2); collapse 2 into 1 on face 0.
        //   0 --- 1
        //    \  / |
        //     2 - 3
        let faces = [[0, 2, 1], [1, 2, 3]];
        let mut topology = EdgeTopology::build(&faces).unwrap();
        let kept_edge = topology.edge_opposite(0, 1); // (0, 1)
        let removed_edge = topology.edge_opposite(0, 2); // (0, 2)

        // Face 0: corner 2 holds vertex 1 (kept), corner 1 holds vertex 2 (removed).
        let (kept, removed) = topology.splice_flap(0, 2, 1);
        assert_eq!((kept, removed), (kept_edge, removed_edge));
        assert!(!topology.is_live(removed));
        // Edge (0, 2) was a boundary, so (0, 1) loses its only face.
        assert_eq!(topology.flaps(kept), [None, None]);
    }
}
