//! Candidate collapse queue
//!
//! A plain binary min-heap with lazy deletion. Entries are never removed or
//! updated in place; instead the [`CostTable`] holds the current cost and a
//! stamp for every edge, and a popped [`Candidate`] that no longer matches
//! it is discarded.

use decimesh_core::Point3d;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A queued edge collapse.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub cost: f64,
    pub edge: usize,
    pub stamp: u32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest cost first, ties go to the lowest edge id
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.edge.cmp(&self.edge))
            .then_with(|| other.stamp.cmp(&self.stamp))
    }
}

/// Min-heap of candidates, possibly holding several entries per edge.
#[derive(Debug, Clone, Default)]
pub struct CandidateQueue {
    heap: BinaryHeap<Candidate>,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heapify a batch of candidates in linear time.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            heap: BinaryHeap::from(candidates),
        }
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.heap.push(candidate);
    }

    /// Cheapest entry, `None` once there are no more candidates.
    pub fn pop_min(&mut self) -> Option<Candidate> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Extend<Candidate> for CandidateQueue {
    fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
        self.heap.extend(iter);
    }
}

/// Current cost, placement and stamp of every edge.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    costs: Vec<f64>,
    placements: Vec<Point3d>,
    stamps: Vec<u32>,
}

impl CostTable {
    /// Table with every edge retired.
    pub fn retired(edge_count: usize) -> Self {
        Self {
            costs: vec![f64::INFINITY; edge_count],
            placements: vec![Point3d::origin(); edge_count],
            stamps: vec![0; edge_count],
        }
    }

    /// Table and queue seeded from one evaluation per edge.
    pub fn seeded(evaluations: Vec<(f64, Point3d)>) -> (Self, CandidateQueue) {
        let mut table = Self::retired(evaluations.len());
        let mut candidates = Vec::with_capacity(evaluations.len());
        for (edge, (cost, placement)) in evaluations.into_iter().enumerate() {
            candidates.extend(table.set(edge, cost, placement));
        }
        (table, CandidateQueue::from_candidates(candidates))
    }

    /// Record a new evaluation of `edge`, invalidating its queued entries.
    ///
    /// Returns the candidate to queue, or `None` when the cost is infinite
    /// (or NaN) and the edge is retired instead.
    pub fn set(&mut self, edge: usize, cost: f64, placement: Point3d) -> Option<Candidate> {
        let cost = if cost.is_nan() { f64::INFINITY } else { cost };
        self.stamps[edge] = self.stamps[edge].wrapping_add(1);
        self.costs[edge] = cost;
        self.placements[edge] = placement;
        (cost != f64::INFINITY).then_some(Candidate {
            cost,
            edge,
            stamp: self.stamps[edge],
        })
    }

    /// Mark `edge` as never collapsible until it is evaluated again.
    pub fn retire(&mut self, edge: usize) {
        self.stamps[edge] = self.stamps[edge].wrapping_add(1);
        self.costs[edge] = f64::INFINITY;
    }

    /// Whether a popped candidate still reflects the table.
    pub fn is_current(&self, candidate: &Candidate) -> bool {
        self.stamps[candidate.edge] == candidate.stamp
            && self.costs[candidate.edge].to_bits() == candidate.cost.to_bits()
    }

    pub fn is_retired(&self, edge: usize) -> bool {
        self.costs[edge] == f64::INFINITY
    }

    pub fn cost(&self, edge: usize) -> f64 {
        self.costs[edge]
    }

    pub fn placement(&self, edge: usize) -> Point3d {
        self.placements[edge]
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(cost: f64, edge: usize) -> Candidate {
        Candidate { cost, edge, stamp: 1 }
    }

    #[test]
    fn test_pops_in_cost_order() {
        let mut queue = CandidateQueue::from_candidates(vec![
            candidate(3.0, 0),
            candidate(1.0, 1),
            candidate(2.0, 2),
        ]);
        queue.push(candidate(0.5, 3));
        let order: Vec<usize> = std::iter::from_fn(|| queue.pop_min()).map(|c| c.edge).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
        assert!(queue.pop_min().is_none());
    }

    #[test]
    fn test_equal_costs_pop_lowest_edge_first() {
        let mut queue = CandidateQueue::new();
        for edge in [7, 2, 9, 4] {
            queue.push(candidate(1.0, edge));
        }
        let order: Vec<usize> = std::iter::from_fn(|| queue.pop_min()).map(|c| c.edge).collect();
        assert_eq!(order, vec![2, 4, 7, 9]);
    }

    #[test]
    fn test_negative_costs_sort_first() {
        let mut queue = CandidateQueue::from_candidates(vec![candidate(0.0, 0), candidate(-2.0, 1)]);
        assert_eq!(queue.pop_min().map(|c| c.edge), Some(1));
    }

    #[test]
    fn test_reevaluation_makes_old_entries_stale() {
        let (mut table, mut queue) = CostTable::seeded(vec![
            (4.0, Point3d::origin()),
            (f64::INFINITY, Point3d::origin()),
        ]);
        assert_eq!(queue.len(), 1);
        assert!(table.is_retired(1));

        let fresh = table.set(0, 1.0, Point3d::new(1.0, 0.0, 0.0)).unwrap();
        queue.push(fresh);

        let first = queue.pop_min().unwrap();
        assert!(table.is_current(&first));
        let second = queue.pop_min().unwrap();
        assert_eq!(second.edge, 0);
        assert!(!table.is_current(&second));
    }

    #[test]
    fn test_retire_and_nan() {
        let (mut table, mut queue) = CostTable::seeded(vec![(2.0, Point3d::origin())]);
        table.retire(0);
        assert!(!table.is_current(&queue.pop_min().unwrap()));
        assert!(table.set(0, f64::NAN, Point3d::origin()).is_none());
        assert!(table.is_retired(0));
    }
}
