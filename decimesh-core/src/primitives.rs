//! Reference meshes
//!
//! Small closed solids and triangulated grids with known element counts,
//! used to exercise decimation in tests and benchmarks.

use crate::mesh::TriangleMesh;
use crate::point::Point3d;

/// Regular tetrahedron with consistently wound faces (4 vertices, 4 faces).
pub fn tetrahedron() -> TriangleMesh {
    TriangleMesh::from_vertices_and_faces(
        vec![
            Point3d::new(1.0, 1.0, 1.0),
            Point3d::new(1.0, -1.0, -1.0),
            Point3d::new(-1.0, 1.0, -1.0),
            Point3d::new(-1.0, -1.0, 1.0),
        ],
        vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
    )
}

/// Regular icosahedron centered at the origin (12 vertices, 20 faces).
pub fn icosahedron() -> TriangleMesh {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let vertices = vec![
        Point3d::new(-1.0, t, 0.0),
        Point3d::new(1.0, t, 0.0),
        Point3d::new(-1.0, -t, 0.0),
        Point3d::new(1.0, -t, 0.0),
        Point3d::new(0.0, -1.0, t),
        Point3d::new(0.0, 1.0, t),
        Point3d::new(0.0, -1.0, -t),
        Point3d::new(0.0, 1.0, -t),
        Point3d::new(t, 0.0, -1.0),
        Point3d::new(t, 0.0, 1.0),
        Point3d::new(-t, 0.0, -1.0),
        Point3d::new(-t, 0.0, 1.0),
    ];
    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// Planar grid of `nx` by `ny` unit quads in the z = 0 plane, each split
/// into two triangles.
///
/// Vertex `(x, y)` has index `y * (nx + 1) + x`.
pub fn grid(nx: usize, ny: usize) -> TriangleMesh {
    let row = nx + 1;
    let mut vertices = Vec::with_capacity(row * (ny + 1));
    for y in 0..=ny {
        for x in 0..=nx {
            vertices.push(Point3d::new(x as f64, y as f64, 0.0));
        }
    }
    let mut faces = Vec::with_capacity(nx * ny * 2);
    for y in 0..ny {
        for x in 0..nx {
            let tl = y * row + x;
            let tr = tl + 1;
            let bl = (y + 1) * row + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}
