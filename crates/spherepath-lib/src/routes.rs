//! Directed, weighted routes indexed two ways.
//!
//! [`RouteStore`] owns a single logical edge set exposed through two ordered
//! views:
//!
//! - `by_source`, keyed by `(source, destination)`, holds the cost and answers
//!   neighbour enumeration with one range scan.
//! - `by_destination`, keyed by `(destination, source)`, lets
//!   [`RouteStore::erase_touching`] find incoming routes without a full scan.
//!
//! Every mutation goes through a method that updates both views, so the two
//! key sets can never diverge.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::points::PointId;

/// Route between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Route {
    pub source: PointId,
    pub destination: PointId,
    pub cost: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    by_source: BTreeMap<(PointId, PointId), f64>,
    by_destination: BTreeSet<(PointId, PointId)>,
}

impl RouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the route `source -> destination`, returning the
    /// previous cost when one existed.
    pub fn insert(&mut self, source: PointId, destination: PointId, cost: f64) -> Option<f64> {
        let previous = self.by_source.insert((source, destination), cost);
        self.by_destination.insert((destination, source));
        self.debug_check(source, destination);
        previous
    }

    /// Remove a single route, returning its cost when it was present.
    pub fn erase(&mut self, source: PointId, destination: PointId) -> Option<f64> {
        let removed = self.by_source.remove(&(source, destination));
        self.by_destination.remove(&(destination, source));
        self.debug_check(source, destination);
        removed
    }

    /// Remove every route that starts or ends at `id`, returning how many
    /// routes were dropped.
    pub fn erase_touching(&mut self, id: PointId) -> usize {
        let outgoing: Vec<PointId> = self.neighbours(id).map(|(dst, _)| dst).collect();
        let incoming: Vec<PointId> = self
            .by_destination
            .range((id, PointId::MIN)..=(id, PointId::MAX))
            .map(|&(_, src)| src)
            .collect();

        let mut removed = 0;
        for dst in outgoing {
            if self.erase(id, dst).is_some() {
                removed += 1;
            }
        }
        for src in incoming {
            if self.erase(src, id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    pub fn cost(&self, source: PointId, destination: PointId) -> Option<f64> {
        self.by_source.get(&(source, destination)).copied()
    }

    pub fn contains(&self, source: PointId, destination: PointId) -> bool {
        self.by_source.contains_key(&(source, destination))
    }

    /// Outgoing routes of `source` as `(destination, cost)` pairs in
    /// ascending destination order.
    pub fn neighbours(&self, source: PointId) -> impl Iterator<Item = (PointId, f64)> + '_ {
        self.by_source
            .range((source, PointId::MIN)..=(source, PointId::MAX))
            .map(|(&(_, dst), &cost)| (dst, cost))
    }

    pub fn clear(&mut self) {
        self.by_source.clear();
        self.by_destination.clear();
    }

    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// All routes ordered by `(source, destination)`.
    pub fn iter(&self) -> impl Iterator<Item = Route> + '_ {
        self.by_source.iter().map(|(&(source, destination), &cost)| Route {
            source,
            destination,
            cost,
        })
    }

    /// Both views agree on the key just touched and on their sizes.
    fn debug_check(&self, source: PointId, destination: PointId) {
        debug_assert_eq!(self.by_source.len(), self.by_destination.len());
        debug_assert_eq!(
            self.by_source.contains_key(&(source, destination)),
            self.by_destination.contains(&(destination, source))
        );
    }
}
