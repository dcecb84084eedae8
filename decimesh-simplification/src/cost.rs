//! Cost and placement oracles
//!
//! An oracle maps an edge of the current mesh to the cost of collapsing it
//! and the point the merged vertex moves to. An infinite cost marks the
//! edge as not collapsible. Oracles must not depend on anything but the
//! view they are handed, so that evaluating the same edge twice without an
//! intervening collapse gives the same answer.

use crate::view::MeshView;
use decimesh_core::{midpoint, Point3d};

/// Cost and placement of one edge collapse.
pub type CostAndPlacement = (f64, Point3d);

/// Squared edge length, collapsing to the midpoint.
pub fn shortest_edge_and_midpoint(view: &MeshView<'_>, edge: usize) -> CostAndPlacement {
    let [a, b] = view.edge(edge);
    let (pa, pb) = (view.position(a), view.position(b));
    ((pa - pb).norm_squared(), midpoint(pa, pb))
}

/// Retire edges longer than `limit`, deferring to `inner` otherwise.
pub fn max_edge_length<F>(limit: f64, inner: F) -> impl Fn(&MeshView<'_>, usize) -> CostAndPlacement + Sync
where
    F: Fn(&MeshView<'_>, usize) -> CostAndPlacement + Sync,
{
    let limit_squared = limit * limit;
    move |view: &MeshView<'_>, edge: usize| {
        if view.edge_length_squared(edge) > limit_squared {
            let [a, b] = view.edge(edge);
            (f64::INFINITY, midpoint(view.position(a), view.position(b)))
        } else {
            inner(view, edge)
        }
    }
}

/// Retire every edge incident to `vertex`, deferring to `inner` otherwise.
///
/// Keeps the point at infinity of a closed-off boundary in place.
pub fn excluding_vertex<F>(vertex: usize, inner: F) -> impl Fn(&MeshView<'_>, usize) -> CostAndPlacement + Sync
where
    F: Fn(&MeshView<'_>, usize) -> CostAndPlacement + Sync,
{
    move |view: &MeshView<'_>, edge: usize| {
        if view.edge(edge).contains(&vertex) {
            (f64::INFINITY, *view.position(vertex))
        } else {
            inner(view, edge)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::EdgeTopology;
    use approx::assert_relative_eq;
    use decimesh_core::primitives::grid;

    #[test]
    fn test_shortest_edge_and_midpoint() {
        let mesh = grid(1, 1);
        let topology = EdgeTopology::build(&mesh.faces).unwrap();
        let view = MeshView::new(&mesh.vertices, &mesh.faces, &topology, mesh.face_count());
        for e in 0..topology.edge_count() {
            let [a, b] = view.edge(e);
            let (cost, placement) = shortest_edge_and_midpoint(&view, e);
            assert_relative_eq!(cost, (mesh.vertices[a] - mesh.vertices[b]).norm_squared());
            assert_relative_eq!(placement, midpoint(&mesh.vertices[a], &mesh.vertices[b]));
            // Same mesh state, same answer.
            assert_eq!(shortest_edge_and_midpoint(&view, e), (cost, placement));
        }
    }

    #[test]
    fn test_max_edge_length_retires_long_edges() {
        let mesh = grid(1, 1);
        let topology = EdgeTopology::build(&mesh.faces).unwrap();
        let view = MeshView::new(&mesh.vertices, &mesh.faces, &topology, mesh.face_count());
        let oracle = max_edge_length(1.2, shortest_edge_and_midpoint);
        let finite = (0..topology.edge_count())
            .filter(|&e| oracle(&view, e).0.is_finite())
            .count();
        // Four unit sides survive, the diagonal does not.
        assert_eq!(finite, 4);
    }

    #[test]
    fn test_excluding_vertex() {
        let mesh = grid(1, 1);
        let topology = EdgeTopology::build(&mesh.faces).unwrap();
        let view = MeshView::new(&mesh.vertices, &mesh.faces, &topology, mesh.face_count());
        let oracle = excluding_vertex(0, shortest_edge_and_midpoint);
        for e in 0..topology.edge_count() {
            let touches = view.edge(e).contains(&0);
            assert_eq!(oracle(&view, e).0.is_infinite(), touches);
        }
    }
}
