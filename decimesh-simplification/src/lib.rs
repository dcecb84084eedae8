//! Greedy edge-collapse mesh decimation
//!
//! This crate reduces the face count of an edge-manifold triangle mesh by
//! repeatedly contracting the cheapest edge whose collapse keeps the mesh
//! manifold:
//! - Edge topology index patched in place after every collapse
//! - Lazy-deletion candidate queue keyed by a caller-supplied cost oracle
//! - Link-condition checks before every collapse
//! - Optional closing of open boundaries at a vertex at infinity
//!
//! ```
//! use decimesh_core::primitives::grid;
//! use decimesh_simplification::{decimate, DecimationConfig};
//!
//! let mesh = grid(10, 10);
//! let output = decimate(&mesh, &DecimationConfig::new().with_target_faces(60)).unwrap();
//! assert!(output.is_success());
//! assert!(output.mesh.face_count() <= 60);
//! ```

pub mod topology;
pub mod manifold;
pub mod view;
pub mod cost;
pub mod queue;
pub mod collapse;
pub mod compact;
pub mod callbacks;
pub mod session;
pub mod boundary;
pub mod decimate;

pub use topology::{EdgeTopology, Flap};
pub use manifold::{is_edge_manifold, validate_manifold};
pub use view::{CollapseRecord, MeshView};
pub use cost::*;
pub use collapse::Rejection;
pub use callbacks::*;
pub use session::*;
pub use boundary::*;
pub use decimate::*;

use decimesh_core::{TriangleMesh, Result};

/// Simplify a mesh by reducing the number of faces/vertices
pub trait MeshSimplifier {
    /// Simplify mesh with target reduction ratio (0.0 = no reduction, 1.0 = maximum reduction)
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f64) -> Result<TriangleMesh>;
}
