//! Manifold validation
//!
//! Decimation only runs on edge-manifold input: faces with three distinct
//! vertices, no two faces over the same vertex triple, at most two faces per
//! edge, and faces around every vertex forming a single fan. The check runs
//! once up front; the collapse executor preserves it from then on.

use crate::topology::EdgeTopology;
use decimesh_core::ManifoldViolation;
use itertools::Itertools;
use std::collections::HashMap;

/// Faces incident to every vertex, in ascending face order.
pub fn vertex_faces(vertex_count: usize, faces: &[[usize; 3]]) -> Vec<Vec<usize>> {
    let mut incident = vec![Vec::new(); vertex_count];
    for (f, face) in faces.iter().enumerate() {
        for &v in face {
            incident[v].push(f);
        }
    }
    incident
}

/// Reject faces that repeat a vertex and faces that duplicate another face.
pub fn check_faces(faces: &[[usize; 3]]) -> Result<(), ManifoldViolation> {
    let mut seen: HashMap<[usize; 3], usize> = HashMap::with_capacity(faces.len());
    for (f, face) in faces.iter().enumerate() {
        if face[0] == face[1] || face[1] == face[2] || face[2] == face[0] {
            return Err(ManifoldViolation::DegenerateFace { face: f });
        }
        let mut key = *face;
        key.sort_unstable();
        if let Some(&first) = seen.get(&key) {
            return Err(ManifoldViolation::DuplicateFace { first, second: f });
        }
        seen.insert(key, f);
    }
    Ok(())
}

/// Check that the faces around each vertex form one disk or half-disk.
///
/// `exempt` skips a single vertex; the point at infinity closing several
/// boundary loops has one fan per loop.
pub fn check_vertex_fans(
    faces: &[[usize; 3]],
    incident: &[Vec<usize>],
    exempt: Option<usize>,
) -> Result<(), ManifoldViolation> {
    for (v, around) in incident.iter().enumerate() {
        if around.is_empty() || Some(v) == exempt {
            continue;
        }
        if !link_is_connected(v, around, faces) {
            return Err(ManifoldViolation::NonManifoldVertex { vertex: v });
        }
    }
    Ok(())
}

/// The link of `v` (the edges of its faces opposite to it) is one path or
/// one cycle. With at most two faces per edge every link vertex has degree
/// at most two, so connectivity is all that needs checking.
fn link_is_connected(v: usize, around: &[usize], faces: &[[usize; 3]]) -> bool {
    let nodes: Vec<usize> = around
        .iter()
        .flat_map(|&f| faces[f])
        .filter(|&u| u != v)
        .sorted_unstable()
        .dedup()
        .collect();

    let mut parent: Vec<usize> = (0..nodes.len()).collect();
    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    let mut components = nodes.len();
    for &f in around {
        let mut others = faces[f].iter().filter(|&&u| u != v);
        let (Some(a), Some(b)) = (others.next(), others.next()) else {
            continue;
        };
        if let (Ok(ia), Ok(ib)) = (nodes.binary_search(a), nodes.binary_search(b)) {
            let (ra, rb) = (root(&mut parent, ia), root(&mut parent, ib));
            if ra != rb {
                parent[ra] = rb;
                components -= 1;
            }
        }
    }
    components == 1
}

/// Run every manifold check on a face list.
pub fn validate_manifold(
    vertex_count: usize,
    faces: &[[usize; 3]],
    exempt: Option<usize>,
) -> Result<(), ManifoldViolation> {
    check_faces(faces)?;
    EdgeTopology::build(faces)?;
    check_vertex_fans(faces, &vertex_faces(vertex_count, faces), exempt)
}

/// Whether `faces` passes [`validate_manifold`].
pub fn is_edge_manifold(vertex_count: usize, faces: &[[usize; 3]]) -> bool {
    validate_manifold(vertex_count, faces, None).is_ok()
}
