//! High level decimation entry points
//!
//! [`decimate`] and [`decimate_using`] take a [`DecimationConfig`], close the
//! boundary at infinity when asked to, and return the compacted result.
//! [`decimate_with`] runs a session with caller-supplied callbacks as is.

use crate::boundary::connect_boundary_to_infinity;
use crate::callbacks::DecimationCallbacks;
use crate::cost::{excluding_vertex, shortest_edge_and_midpoint, CostAndPlacement};
use crate::session::{DecimationOutput, DecimationSession};
use crate::view::{CollapseRecord, MeshView};
use crate::MeshSimplifier;
use decimesh_core::{Error, Result, TriangleMesh};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters of a decimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimationConfig {
    /// Stop once at most this many faces remain; overrides `target_ratio`
    pub target_faces: Option<usize>,
    /// Fraction of the input faces to keep
    pub target_ratio: f64,
    /// Fan the boundary to a vertex at infinity so that border regions are
    /// decimated too
    pub close_boundary: bool,
    /// Evaluate the initial collapse costs on the rayon pool
    pub parallel_seeding: bool,
}

impl Default for DecimationConfig {
    fn default() -> Self {
        Self {
            target_faces: None,
            target_ratio: 0.5,
            close_boundary: true,
            parallel_seeding: true,
        }
    }
}

impl DecimationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_faces(mut self, target_faces: usize) -> Self {
        self.target_faces = Some(target_faces);
        self
    }

    pub fn with_target_ratio(mut self, target_ratio: f64) -> Self {
        self.target_ratio = target_ratio;
        self
    }

    pub fn with_close_boundary(mut self, close_boundary: bool) -> Self {
        self.close_boundary = close_boundary;
        self
    }

    pub fn with_parallel_seeding(mut self, parallel_seeding: bool) -> Self {
        self.parallel_seeding = parallel_seeding;
        self
    }

    /// Target face count for a mesh with `face_count` faces.
    pub fn target_for(&self, face_count: usize) -> Result<usize> {
        if let Some(target) = self.target_faces {
            return Ok(target);
        }
        if !(0.0..=1.0).contains(&self.target_ratio) {
            return Err(Error::InvalidData(format!(
                "Target ratio must be between 0.0 and 1.0, got {}",
                self.target_ratio
            )));
        }
        Ok((self.target_ratio * face_count as f64).floor() as usize)
    }
}

/// Decimate `mesh` by collapsing the shortest edges to their midpoints.
pub fn decimate(mesh: &TriangleMesh, config: &DecimationConfig) -> Result<DecimationOutput> {
    decimate_using(mesh, config, shortest_edge_and_midpoint)
}

/// Decimate `mesh` with a custom cost and placement oracle.
///
/// A run that ends without progress is still returned; check
/// [`DecimationOutput::is_success`] or use [`DecimationOutput::into_result`].
pub fn decimate_using<F>(mesh: &TriangleMesh, config: &DecimationConfig, cost: F) -> Result<DecimationOutput>
where
    F: Fn(&MeshView<'_>, usize) -> CostAndPlacement + Sync,
{
    if mesh.is_empty() {
        return Err(Error::InvalidData("Mesh is empty".to_string()));
    }
    let target = config.target_for(mesh.face_count())?;

    if mesh.face_count() <= target {
        debug!(faces = mesh.face_count(), target, "mesh already meets the target");
        let mut session = DecimationSession::new(mesh)?;
        session.halt();
        return Ok(with_colors(session.finish(usize::MAX), mesh));
    }

    if !config.close_boundary {
        let callbacks = DecimationCallbacks::new(target).with_cost(cost);
        return decimate_with(mesh, callbacks, config.parallel_seeding);
    }

    let closed = connect_boundary_to_infinity(mesh)?;
    let Some(inf) = closed.infinity else {
        let callbacks = DecimationCallbacks::new(target).with_cost(cost);
        return decimate_with(mesh, callbacks, config.parallel_seeding);
    };

    // Only input faces count toward the target.
    let original = closed.original_face_count;
    let mut remaining = original;
    let mut callbacks = DecimationCallbacks::new(target)
        .with_cost(excluding_vertex(inf, cost))
        .with_stopping_condition(move |_view: &MeshView<'_>, record: &CollapseRecord| {
            remaining -= record.removed_faces.iter().filter(|&&f| f < original).count();
            remaining <= target
        });

    let mut session = DecimationSession::with_exempt_vertex(&closed.mesh, Some(inf))?;
    session.seed(&*callbacks.cost_and_placement, config.parallel_seeding);
    session.run(&mut callbacks);
    Ok(with_colors(session.finish(original), mesh))
}

/// Run one decimation session on `mesh` with the given callbacks.
pub fn decimate_with(
    mesh: &TriangleMesh,
    mut callbacks: DecimationCallbacks<'_>,
    parallel_seeding: bool,
) -> Result<DecimationOutput> {
    let mut session = DecimationSession::new(mesh)?;
    session.seed(&*callbacks.cost_and_placement, parallel_seeding);
    session.run(&mut callbacks);
    Ok(with_colors(session.finish(usize::MAX), mesh))
}

fn with_colors(mut output: DecimationOutput, input: &TriangleMesh) -> DecimationOutput {
    if let Some(colors) = &input.colors {
        if colors.len() == input.vertex_count() {
            let remapped = output.remap_vertex_attribute(colors);
            output.mesh.set_colors(remapped);
        }
    }
    output
}

/// Greedy edge-collapse simplifier.
#[derive(Debug, Clone, Default)]
pub struct EdgeCollapseSimplifier {
    /// `target_faces` and `target_ratio` are replaced by the reduction ratio
    /// passed to [`MeshSimplifier::simplify`]
    pub config: DecimationConfig,
}

impl EdgeCollapseSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecimationConfig) -> Self {
        Self { config }
    }
}

impl MeshSimplifier for EdgeCollapseSimplifier {
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f64) -> Result<TriangleMesh> {
        if mesh.is_empty() {
            return Err(Error::InvalidData("Mesh is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&reduction_ratio) {
            return Err(Error::InvalidData(
                "Reduction ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        let target_faces = ((1.0 - reduction_ratio) * mesh.face_count() as f64) as usize;
        let config = self.config.clone().with_target_faces(target_faces);
        Ok(decimate(mesh, &config)?.into_result()?.mesh)
    }
}
