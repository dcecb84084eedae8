//! Edge collapse executor
//!
//! A collapse is planned first, with every legality check run against the
//! unmodified mesh, and only then applied. A rejected plan leaves the mesh
//! untouched.

use crate::topology::{EdgeTopology, Flap};
use crate::view::MeshView;
use decimesh_core::{Point3d, NULL_INDEX};
use itertools::Itertools;
use thiserror::Error;

/// Why an edge could not be collapsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("edge has been removed")]
    RemovedEdge,
    #[error("edge lies on the boundary")]
    BoundaryEdge,
    #[error("both faces of the edge share their third vertex")]
    SharedApex,
    #[error("endpoints share neighbours beyond the two faces of the edge")]
    LinkCondition,
    #[error("collapse would fold two faces onto each other")]
    TetrahedralCap,
    #[error("interior edge joins two boundary vertices")]
    BoundaryChord,
    #[error("collapse vetoed by the caller")]
    Vetoed,
}

/// One face flapping the collapsing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Side {
    pub face: usize,
    pub apex: usize,
    pub corner_survivor: usize,
    pub corner_removed: usize,
}

/// A validated collapse, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CollapsePlan {
    pub edge: usize,
    pub survivor: usize,
    pub removed: usize,
    pub sides: [Side; 2],
}

/// Vertices sharing a face with `v`, sorted.
pub(crate) fn neighbors(v: usize, faces: &[[usize; 3]], vertex_faces: &[Vec<usize>]) -> Vec<usize> {
    vertex_faces[v]
        .iter()
        .flat_map(|&f| faces[f])
        .filter(|&u| u != v)
        .sorted_unstable()
        .dedup()
        .collect()
}

/// Edges incident to `v`, sorted.
pub(crate) fn incident_edges(
    v: usize,
    faces: &[[usize; 3]],
    topology: &EdgeTopology,
    vertex_faces: &[Vec<usize>],
) -> Vec<usize> {
    vertex_faces[v]
        .iter()
        .filter_map(|&f| corner_of(&faces[f], v).map(|c| topology.edges_at_corner(f, c)))
        .flatten()
        .sorted_unstable()
        .dedup()
        .collect()
}

fn corner_of(face: &[usize; 3], v: usize) -> Option<usize> {
    face.iter().position(|&u| u == v)
}

fn is_boundary_vertex(
    v: usize,
    faces: &[[usize; 3]],
    topology: &EdgeTopology,
    vertex_faces: &[Vec<usize>],
) -> bool {
    incident_edges(v, faces, topology, vertex_faces)
        .into_iter()
        .any(|e| topology.is_boundary(e))
}

fn has_face_with(v: usize, a: usize, b: usize, faces: &[[usize; 3]], vertex_faces: &[Vec<usize>]) -> bool {
    vertex_faces[v]
        .iter()
        .any(|&f| faces[f].contains(&a) && faces[f].contains(&b))
}

/// Check that collapsing `edge` keeps the mesh manifold and work out what
/// the collapse touches. The endpoint with the smaller index survives.
pub(crate) fn plan(
    view: &MeshView<'_>,
    vertex_faces: &[Vec<usize>],
    edge: usize,
) -> Result<CollapsePlan, Rejection> {
    let topology = view.topology();
    let faces = view.faces();
    if !topology.is_live(edge) {
        return Err(Rejection::RemovedEdge);
    }
    let flaps = topology
        .interior_flaps(edge)
        .ok_or(Rejection::BoundaryEdge)?;

    let [u, w] = topology.edge(edge);
    let (survivor, removed) = (u.min(w), u.max(w));
    let side = |flap: Flap| {
        let face = faces[flap.face];
        let (c1, c2) = ((flap.corner + 1) % 3, (flap.corner + 2) % 3);
        let (corner_survivor, corner_removed) = if face[c1] == survivor { (c1, c2) } else { (c2, c1) };
        Side {
            face: flap.face,
            apex: face[flap.corner],
            corner_survivor,
            corner_removed,
        }
    };
    let sides = [side(flaps[0]), side(flaps[1])];
    let (a, b) = (sides[0].apex, sides[1].apex);
    if a == b {
        return Err(Rejection::SharedApex);
    }

    // Link condition: the endpoints' common neighbours are exactly the apices.
    let around_survivor = neighbors(survivor, faces, vertex_faces);
    let around_removed = neighbors(removed, faces, vertex_faces);
    let common: Vec<usize> = around_survivor
        .iter()
        .copied()
        .filter(|v| around_removed.binary_search(v).is_ok())
        .collect();
    if common != [a.min(b), a.max(b)] {
        return Err(Rejection::LinkCondition);
    }
    // ... and the apex edge is not in both links.
    if has_face_with(survivor, a, b, faces, vertex_faces) && has_face_with(removed, a, b, faces, vertex_faces) {
        return Err(Rejection::TetrahedralCap);
    }
    if is_boundary_vertex(survivor, faces, topology, vertex_faces)
        && is_boundary_vertex(removed, faces, topology, vertex_faces)
    {
        return Err(Rejection::BoundaryChord);
    }

    Ok(CollapsePlan {
        edge,
        survivor,
        removed,
        sides,
    })
}

/// Contract a planned edge: tombstone its two faces, merge the removed
/// endpoint into the survivor at `placement` and patch the topology index
/// around them. Returns the two edges merged away.
pub(crate) fn apply(
    plan: &CollapsePlan,
    placement: Point3d,
    positions: &mut [Point3d],
    faces: &mut [[usize; 3]],
    topology: &mut EdgeTopology,
    vertex_faces: &mut [Vec<usize>],
) -> [usize; 2] {
    let (survivor, removed) = (plan.survivor, plan.removed);
    let mut removed_edges = [NULL_INDEX; 2];

    for (k, side) in plan.sides.iter().enumerate() {
        let (_, merged) = topology.splice_flap(side.face, side.corner_survivor, side.corner_removed);
        removed_edges[k] = merged;
        for v in [survivor, removed, side.apex] {
            vertex_faces[v].retain(|&f| f != side.face);
        }
        faces[side.face] = [NULL_INDEX; 3];
    }

    let moved = std::mem::take(&mut vertex_faces[removed]);
    for &f in &moved {
        if let Some(c) = corner_of(&faces[f], removed) {
            topology.rename_corner_edges(f, c, removed, survivor);
            faces[f][c] = survivor;
        }
    }
    vertex_faces[survivor].extend(moved);
    topology.remove_edge(plan.edge);
    positions[survivor] = placement;

    removed_edges
}
