//! Caller-supplied policy for a decimation run
//!
//! The four hooks are plain closures: the cost/placement oracle, a veto
//! consulted before each collapse, a notification after each collapse and
//! the stopping condition.

use crate::cost::{shortest_edge_and_midpoint, CostAndPlacement};
use crate::view::{CollapseRecord, MeshView};

/// Cost and placement of collapsing an edge. Shared across threads while
/// the queue is seeded.
pub type CostFn<'a> = dyn Fn(&MeshView<'_>, usize) -> CostAndPlacement + Sync + 'a;

/// Return `false` to veto collapsing an edge.
pub type PreCollapseFn<'a> = dyn FnMut(&MeshView<'_>, usize) -> bool + 'a;

/// Observe a completed collapse.
pub type PostCollapseFn<'a> = dyn FnMut(&MeshView<'_>, &CollapseRecord) + 'a;

/// Return `true` to stop after a completed collapse.
pub type StoppingConditionFn<'a> = dyn FnMut(&MeshView<'_>, &CollapseRecord) -> bool + 'a;

pub struct DecimationCallbacks<'a> {
    pub cost_and_placement: Box<CostFn<'a>>,
    pub pre_collapse: Box<PreCollapseFn<'a>>,
    pub post_collapse: Box<PostCollapseFn<'a>>,
    pub stopping_condition: Box<StoppingConditionFn<'a>>,
}

fn allow_all(_view: &MeshView<'_>, _edge: usize) -> bool {
    true
}

fn ignore(_view: &MeshView<'_>, _record: &CollapseRecord) {}

/// Stop once no more than `target` faces remain.
pub fn max_faces_stopping_condition(
    target: usize,
) -> impl FnMut(&MeshView<'_>, &CollapseRecord) -> bool {
    move |view: &MeshView<'_>, _record: &CollapseRecord| view.live_face_count() <= target
}

impl<'a> DecimationCallbacks<'a> {
    /// Shortest edge first, collapsing to midpoints, until `target_faces`
    /// faces remain.
    pub fn new(target_faces: usize) -> Self {
        Self {
            cost_and_placement: Box::new(shortest_edge_and_midpoint),
            pre_collapse: Box::new(allow_all),
            post_collapse: Box::new(ignore),
            stopping_condition: Box::new(max_faces_stopping_condition(target_faces)),
        }
    }

    pub fn with_cost<F>(mut self, cost: F) -> Self
    where
        F: Fn(&MeshView<'_>, usize) -> CostAndPlacement + Sync + 'a,
    {
        self.cost_and_placement = Box::new(cost);
        self
    }

    pub fn with_pre_collapse<F>(mut self, pre_collapse: F) -> Self
    where
        F: FnMut(&MeshView<'_>, usize) -> bool + 'a,
    {
        self.pre_collapse = Box::new(pre_collapse);
        self
    }

    pub fn with_post_collapse<F>(mut self, post_collapse: F) -> Self
    where
        F: FnMut(&MeshView<'_>, &CollapseRecord) + 'a,
    {
        self.post_collapse = Box::new(post_collapse);
        self
    }

    pub fn with_stopping_condition<F>(mut self, stopping_condition: F) -> Self
    where
        F: FnMut(&MeshView<'_>, &CollapseRecord) -> bool + 'a,
    {
        self.stopping_condition = Box::new(stopping_condition);
        self
    }
}

impl std::fmt::Debug for DecimationCallbacks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecimationCallbacks").finish_non_exhaustive()
    }
}
