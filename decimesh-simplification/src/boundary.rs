//! Closing open meshes at infinity
//!
//! Boundary edges are never collapsed, so on an open mesh the border rows
//! would stay at full resolution. Fanning every boundary edge to one extra
//! vertex at infinity turns the mesh into a closed surface. Edges touching
//! that vertex are kept out of the queue and the extra faces are dropped
//! again when the result is compacted.

use crate::manifold;
use crate::topology::EdgeTopology;
use decimesh_core::{point_at_infinity, Result, TriangleMesh};

/// A mesh with its boundary fanned to a vertex at infinity.
#[derive(Debug, Clone)]
pub struct ClosedMesh {
    /// Input faces first, in order, followed by the closing faces
    pub mesh: TriangleMesh,
    /// Index of the vertex at infinity, `None` when the input had no boundary
    pub infinity: Option<usize>,
    /// Number of input faces; closing faces start at this index
    pub original_face_count: usize,
}

/// Add a vertex at (+inf, +inf, +inf) and, for every boundary edge `a -> b`
/// of a face, the face `[b, a, inf]`.
///
/// The input is validated first so that a non-manifold boundary is reported
/// against the input rather than the closed mesh.
pub fn connect_boundary_to_infinity(mesh: &TriangleMesh) -> Result<ClosedMesh> {
    mesh.validate_indices()?;
    manifold::validate_manifold(mesh.vertex_count(), &mesh.faces, None)?;
    let topology = EdgeTopology::build(&mesh.faces)?;

    let inf = mesh.vertex_count();
    let closing: Vec<[usize; 3]> = (0..topology.edge_count())
        .filter(|&e| topology.is_boundary(e))
        .filter_map(|e| topology.flaps(e).into_iter().flatten().next())
        .map(|flap| {
            let face = mesh.faces[flap.face];
            let (a, b) = (face[(flap.corner + 1) % 3], face[(flap.corner + 2) % 3]);
            [b, a, inf]
        })
        .collect();

    if closing.is_empty() {
        return Ok(ClosedMesh {
            mesh: mesh.clone(),
            infinity: None,
            original_face_count: mesh.face_count(),
        });
    }

    let mut closed = TriangleMesh::from_vertices_and_faces(mesh.vertices.clone(), mesh.faces.clone());
    closed.add_vertex(point_at_infinity());
    closed.faces.extend(closing);
    Ok(ClosedMesh {
        mesh: closed,
        infinity: Some(inf),
        original_face_count: mesh.face_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifold::validate_manifold;
    use decimesh_core::primitives::{grid, icosahedron};
    use decimesh_core::{Error, Point3d};

    #[test]
    fn test_closed_mesh_is_unchanged() {
        let mesh = icosahedron();
        let closed = connect_boundary_to_infinity(&mesh).unwrap();
        assert_eq!(closed.infinity, None);
        assert_eq!(closed.mesh, mesh);
        assert_eq!(closed.original_face_count, 20);
    }

    #[test]
    fn test_grid_is_closed() {
        let mesh = grid(3, 2);
        let closed = connect_boundary_to_infinity(&mesh).unwrap();
        let inf = closed.infinity.unwrap();
        assert_eq!(inf, mesh.vertex_count());
        assert!(closed.mesh.vertices[inf].x.is_infinite());

        // One closing face per boundary edge of a 3x2 grid.
        assert_eq!(closed.mesh.face_count(), 12 + 10);
        assert_eq!(closed.original_face_count, 12);
        assert_eq!(&closed.mesh.faces[..12], &mesh.faces[..]);

        let topology = EdgeTopology::build(&closed.mesh.faces).unwrap();
        assert!((0..topology.edge_count()).all(|e| !topology.is_boundary(e)));
        assert!(validate_manifold(closed.mesh.vertex_count(), &closed.mesh.faces, Some(inf)).is_ok());
    }

    #[test]
    fn test_closing_faces_reverse_the_boundary() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let closed = connect_boundary_to_infinity(&mesh).unwrap();
        let mut closing = closed.mesh.faces[1..].to_vec();
        closing.sort_unstable();
        assert_eq!(closing, vec![[0, 2, 3], [1, 0, 3], [2, 1, 3]]);
    }

    #[test]
    fn test_non_manifold_boundary_is_reported() {
        // Two triangles touching at a single vertex.
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
                Point3d::new(-1.0, 0.0, 0.0),
                Point3d::new(0.0, -1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 3, 4]],
        );
        assert!(matches!(
            connect_boundary_to_infinity(&mesh),
            Err(Error::NotManifold(_))
        ));
    }
}
