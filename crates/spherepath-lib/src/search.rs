//! Per-query search state and the weighted best-first (A*) expansion loop.
//!
//! Nodes live in a vector sorted by point identifier and the open set stores
//! indices into it, never references. Decrease-key is lazy: every improvement
//! pushes a fresh heap entry and outdated entries are dropped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::points::{PointId, PointStore};
use crate::routes::RouteStore;

/// Cost reported by [`crate::PathGraph::costs`] when no result is available.
pub const NO_RESULT_COST: f64 = -1.0;

/// Result of driving a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No search was initialized against the current graph.
    NotReady,
    /// The destination was reached and its cost is final.
    Found,
    /// The open set drained without reaching the destination.
    Unreachable,
    /// The expansion limit stopped the search before it finished.
    Truncated,
}

/// Metadata tracked for a single point during a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub id: PointId,
    pub cost_so_far: f64,
    /// Weighted great-circle distance to the destination, fixed at
    /// initialization.
    pub heuristic_distance: f64,
    pub score: f64,
    pub predecessor: Option<PointId>,
    pub settled: bool,
}

impl SearchNode {
    fn new(id: PointId, heuristic_distance: f64) -> Self {
        Self {
            id,
            cost_so_far: f64::INFINITY,
            heuristic_distance,
            score: f64::INFINITY,
            predecessor: None,
            settled: false,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OpenEntry {
    index: usize,
    score: FloatOrd,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by score; equal
        // scores pop the lowest point identifier first.
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search state built by [`SearchState::new`] and owned by one query.
#[derive(Debug, Clone)]
pub struct SearchState {
    nodes: Vec<SearchNode>,
    source: usize,
    destination: usize,
    open: BinaryHeap<OpenEntry>,
    expansions: usize,
}

impl SearchState {
    /// Build a fresh state with one node per point, seeded with `source`.
    ///
    /// Returns `None` when either endpoint is not a known point.
    pub fn new(
        points: &PointStore,
        source: PointId,
        destination: PointId,
        weight: f64,
    ) -> Option<Self> {
        let goal = *points.get(destination)?;
        if !points.contains(source) {
            return None;
        }

        let nodes: Vec<SearchNode> = points
            .iter()
            .map(|(id, point)| SearchNode::new(id, point.weighted_distance(&goal, weight)))
            .collect();

        let mut state = Self {
            nodes,
            source: 0,
            destination: 0,
            open: BinaryHeap::new(),
            expansions: 0,
        };
        state.source = state.index_of(source)?;
        state.destination = state.index_of(destination)?;

        let start = &mut state.nodes[state.source];
        start.cost_so_far = 0.0;
        start.score = start.heuristic_distance;
        let entry = OpenEntry {
            index: state.source,
            score: FloatOrd(start.score),
        };
        state.open.push(entry);

        Some(state)
    }

    pub fn source(&self) -> PointId {
        self.nodes[self.source].id
    }

    pub fn destination(&self) -> PointId {
        self.nodes[self.destination].id
    }

    pub fn node(&self, id: PointId) -> Option<&SearchNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Number of heap entries, including outdated ones not yet discarded.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Total number of nodes settled so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn destination_cost(&self) -> f64 {
        self.nodes[self.destination].cost_so_far
    }

    /// Run the expansion loop until the destination is final, the open set
    /// is empty, or `limit` nodes have been settled by this call.
    ///
    /// A truncated search keeps its open set intact, so calling `run` again
    /// resumes where it left off.
    pub fn run(&mut self, routes: &RouteStore, limit: Option<usize>) -> SearchOutcome {
        let mut settled_now = 0;

        while let Some(entry) = self.pop_open() {
            if entry.score.0 >= self.destination_cost() {
                break;
            }

            if limit.is_some_and(|limit| settled_now >= limit) {
                self.open.push(entry);
                debug!(
                    expansions = self.expansions,
                    "search stopped at expansion limit"
                );
                return SearchOutcome::Truncated;
            }

            self.nodes[entry.index].settled = true;
            self.expansions += 1;
            settled_now += 1;

            let current = &self.nodes[entry.index];
            let (current_id, current_cost) = (current.id, current.cost_so_far);
            for (next_id, edge_cost) in routes.neighbours(current_id) {
                self.relax(entry.index, next_id, current_cost + edge_cost);
            }
        }

        if self.destination_cost().is_finite() {
            SearchOutcome::Found
        } else {
            SearchOutcome::Unreachable
        }
    }

    /// Points from source to destination, or empty when the destination was
    /// never reached.
    pub fn path(&self) -> Vec<PointId> {
        if !self.destination_cost().is_finite() {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = Some(self.destination());
        while let Some(id) = current {
            path.push(id);
            if path.len() > self.nodes.len() {
                break;
            }
            current = self.node(id).and_then(|node| node.predecessor);
        }
        path.reverse();
        path
    }

    fn index_of(&self, id: PointId) -> Option<usize> {
        self.nodes.binary_search_by_key(&id, |node| node.id).ok()
    }

    fn pop_open(&mut self) -> Option<OpenEntry> {
        while let Some(entry) = self.open.pop() {
            let node = &self.nodes[entry.index];
            if node.settled || node.score.to_bits() != entry.score.0.to_bits() {
                continue;
            }
            return Some(entry);
        }
        None
    }

    fn relax(&mut self, from: usize, next_id: PointId, candidate: f64) {
        let Some(next) = self.index_of(next_id) else {
            debug!(point = next_id, "route leads to an unknown point; skipping");
            return;
        };
        let predecessor = self.nodes[from].id;
        let is_destination = next == self.destination;

        let node = &mut self.nodes[next];
        if candidate >= node.cost_so_far {
            return;
        }
        node.cost_so_far = candidate;
        node.predecessor = Some(predecessor);
        node.score = candidate + node.heuristic_distance;

        if is_destination || node.settled {
            return;
        }
        let entry = OpenEntry {
            index: next,
            score: FloatOrd(node.score),
        };
        self.open.push(entry);
    }
}
