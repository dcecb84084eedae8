//! Decimation session
//!
//! Owns the working mesh, its topology index, the per-edge cost table and
//! the candidate queue for one decimation run, and drives the greedy
//! pop/validate/collapse loop until the stopping condition fires or no
//! candidates remain.

use crate::callbacks::{CostFn, DecimationCallbacks};
use crate::collapse::{self, Rejection};
use crate::compact::compact;
use crate::cost::CostAndPlacement;
use crate::manifold;
use crate::queue::{CandidateQueue, CostTable};
use crate::topology::EdgeTopology;
use crate::view::{CollapseRecord, MeshView};
use decimesh_core::{Error, Point3d, Result, TriangleMesh};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Where the decimation loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecimationState {
    Running,
    /// The stopping condition fired after a collapse
    StoppedByCondition,
    /// No collapsible edge is left
    StoppedEmptyQueue,
    /// The same edge was rejected twice without a collapse in between
    StoppedNoProgress { edge: usize },
}

impl DecimationState {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::StoppedByCondition | Self::StoppedEmptyQueue)
    }
}

/// Result of a decimation run.
#[derive(Debug, Clone)]
pub struct DecimationOutput {
    pub mesh: TriangleMesh,
    /// For each output face, the index of the input face it descends from
    pub face_origin: Vec<usize>,
    /// For each output vertex, the index of the input vertex it descends from
    pub vertex_origin: Vec<usize>,
    pub state: DecimationState,
    pub collapses: usize,
    pub rejections: usize,
}

impl DecimationOutput {
    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }

    /// Turn a run that made no progress into an error, dropping the partial
    /// result.
    pub fn into_result(self) -> Result<Self> {
        match self.state {
            DecimationState::StoppedNoProgress { edge } => Err(Error::NoProgress { edge }),
            _ => Ok(self),
        }
    }

    /// Pick the per-vertex values of the input for the output vertices.
    pub fn remap_vertex_attribute<T: Clone>(&self, values: &[T]) -> Vec<T> {
        self.vertex_origin.iter().map(|&v| values[v].clone()).collect()
    }

    /// Pick the per-face values of the input for the output faces.
    pub fn remap_face_attribute<T: Clone>(&self, values: &[T]) -> Vec<T> {
        self.face_origin.iter().map(|&f| values[f].clone()).collect()
    }
}

/// Everything one decimation run mutates.
#[derive(Debug)]
pub struct DecimationSession {
    positions: Vec<Point3d>,
    faces: Vec<[usize; 3]>,
    topology: EdgeTopology,
    vertex_faces: Vec<Vec<usize>>,
    costs: CostTable,
    queue: CandidateQueue,
    live_faces: usize,
    state: DecimationState,
    last_rejected: Option<usize>,
    collapses: usize,
    rejections: usize,
}

impl DecimationSession {
    /// Validate `mesh` and build its topology index.
    pub fn new(mesh: &TriangleMesh) -> Result<Self> {
        Self::with_exempt_vertex(mesh, None)
    }

    /// As [`new`](Self::new), skipping the single-fan check for `exempt`.
    pub fn with_exempt_vertex(mesh: &TriangleMesh, exempt: Option<usize>) -> Result<Self> {
        mesh.validate_indices()?;
        manifold::check_faces(&mesh.faces)?;
        let topology = EdgeTopology::build(&mesh.faces)?;
        let vertex_faces = manifold::vertex_faces(mesh.vertex_count(), &mesh.faces);
        manifold::check_vertex_fans(&mesh.faces, &vertex_faces, exempt)?;

        Ok(Self {
            positions: mesh.vertices.clone(),
            faces: mesh.faces.clone(),
            costs: CostTable::retired(topology.edge_count()),
            topology,
            vertex_faces,
            queue: CandidateQueue::new(),
            live_faces: mesh.face_count(),
            state: DecimationState::Running,
            last_rejected: None,
            collapses: 0,
            rejections: 0,
        })
    }

    pub fn view(&self) -> MeshView<'_> {
        MeshView::new(&self.positions, &self.faces, &self.topology, self.live_faces)
    }

    pub fn state(&self) -> DecimationState {
        self.state
    }

    pub fn live_face_count(&self) -> usize {
        self.live_faces
    }

    pub fn collapses(&self) -> usize {
        self.collapses
    }

    /// Number of queued entries, stale ones included.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn evaluate(&self, cost: &CostFn<'_>, edge: usize) -> CostAndPlacement {
        if !self.topology.is_live(edge) || self.topology.is_boundary(edge) {
            return (f64::INFINITY, Point3d::origin());
        }
        cost(&self.view(), edge)
    }

    /// Evaluate every edge and fill the queue. Each edge is independent, so
    /// with `parallel` the evaluations are spread over the rayon pool.
    pub fn seed(&mut self, cost: &CostFn<'_>, parallel: bool) {
        let edge_count = self.topology.edge_count();
        let this = &*self;
        let evaluations: Vec<CostAndPlacement> = if parallel {
            (0..edge_count)
                .into_par_iter()
                .map(|e| this.evaluate(cost, e))
                .collect()
        } else {
            (0..edge_count).map(|e| this.evaluate(cost, e)).collect()
        };
        let (costs, queue) = CostTable::seeded(evaluations);
        self.costs = costs;
        self.queue = queue;
        debug!(edges = edge_count, candidates = self.queue.len(), "seeded collapse queue");
    }

    /// Evaluate `edge` again and queue it, whether or not it was retired.
    pub fn reevaluate(&mut self, edge: usize, cost: &CostFn<'_>) {
        let (c, p) = self.evaluate(cost, edge);
        self.queue.extend(self.costs.set(edge, c, p));
    }

    /// Stop before any further collapse.
    pub fn halt(&mut self) {
        if self.state == DecimationState::Running {
            self.state = DecimationState::StoppedByCondition;
        }
    }

    /// Pop one candidate and act on it.
    pub fn step(&mut self, callbacks: &mut DecimationCallbacks<'_>) -> DecimationState {
        if self.state != DecimationState::Running {
            return self.state;
        }
        let Some(candidate) = self.queue.pop_min() else {
            self.state = DecimationState::StoppedEmptyQueue;
            return self.state;
        };
        if !self.costs.is_current(&candidate) {
            return self.state;
        }

        let edge = candidate.edge;
        match self.try_collapse(edge, callbacks) {
            Ok(record) => {
                self.last_rejected = None;
                self.collapses += 1;
                trace!(
                    edge,
                    survivor = record.survivor,
                    removed = record.removed,
                    cost = record.cost,
                    live_faces = self.live_faces,
                    "collapsed edge"
                );
                self.refresh_around(record.survivor, &*callbacks.cost_and_placement);
                (callbacks.post_collapse)(&self.view(), &record);
                if (callbacks.stopping_condition)(&self.view(), &record) {
                    self.state = DecimationState::StoppedByCondition;
                }
            }
            Err(rejection) => {
                self.rejections += 1;
                debug!(edge, %rejection, "edge collapse rejected");
                self.costs.retire(edge);
                if self.last_rejected == Some(edge) {
                    self.state = DecimationState::StoppedNoProgress { edge };
                }
                self.last_rejected = Some(edge);
            }
        }
        self.state
    }

    /// Step until the session stops.
    pub fn run(&mut self, callbacks: &mut DecimationCallbacks<'_>) -> DecimationState {
        info!(
            faces = self.live_faces,
            vertices = self.positions.len(),
            edges = self.topology.edge_count(),
            "starting decimation"
        );
        while self.step(callbacks) == DecimationState::Running {}
        info!(
            state = ?self.state,
            faces = self.live_faces,
            collapses = self.collapses,
            rejections = self.rejections,
            "decimation finished"
        );
        self.state
    }

    fn try_collapse(
        &mut self,
        edge: usize,
        callbacks: &mut DecimationCallbacks<'_>,
    ) -> std::result::Result<CollapseRecord, Rejection> {
        if !(callbacks.pre_collapse)(&self.view(), edge) {
            return Err(Rejection::Vetoed);
        }
        let plan = collapse::plan(&self.view(), &self.vertex_faces, edge)?;
        let placement = self.costs.placement(edge);
        let removed_edges = collapse::apply(
            &plan,
            placement,
            &mut self.positions,
            &mut self.faces,
            &mut self.topology,
            &mut self.vertex_faces,
        );
        self.live_faces -= 2;
        let cost = self.costs.cost(edge);
        for e in [edge, removed_edges[0], removed_edges[1]] {
            self.costs.retire(e);
        }

        Ok(CollapseRecord {
            edge,
            survivor: plan.survivor,
            removed: plan.removed,
            placement,
            cost,
            removed_faces: [plan.sides[0].face, plan.sides[1].face],
            removed_edges,
        })
    }

    /// Re-evaluate the edges around a survivor.
    ///
    /// Every edge incident to the survivor gets a fresh evaluation. Retired
    /// edges incident to its neighbours are evaluated again too: their link
    /// changed with the collapse, so a rejection may no longer hold.
    fn refresh_around(&mut self, survivor: usize, cost: &CostFn<'_>) {
        let incident = collapse::incident_edges(survivor, &self.faces, &self.topology, &self.vertex_faces);
        for &e in &incident {
            self.reevaluate(e, cost);
        }

        let mut revived: Vec<usize> = collapse::neighbors(survivor, &self.faces, &self.vertex_faces)
            .into_iter()
            .flat_map(|n| collapse::incident_edges(n, &self.faces, &self.topology, &self.vertex_faces))
            .filter(|&e| {
                self.costs.is_retired(e) && !self.topology.is_boundary(e) && incident.binary_search(&e).is_err()
            })
            .collect();
        revived.sort_unstable();
        revived.dedup();
        for e in revived {
            self.reevaluate(e, cost);
        }
    }

    /// Compact the working mesh into the final output. Faces at index
    /// `face_limit` and beyond are dropped.
    pub fn finish(self, face_limit: usize) -> DecimationOutput {
        let compacted = compact(&self.positions, &self.faces, face_limit);
        DecimationOutput {
            mesh: TriangleMesh::from_vertices_and_faces(compacted.vertices, compacted.faces),
            face_origin: compacted.face_origin,
            vertex_origin: compacted.vertex_origin,
            state: self.state,
            collapses: self.collapses,
            rejections: self.rejections,
        }
    }
}
