use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::points::{PointId, PointStore};
use crate::routes::{Route, RouteStore};
use crate::search::{SearchOutcome, SearchState, NO_RESULT_COST};
use crate::sphere::SphericalPoint;

/// Lifecycle of the search attached to a [`PathGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search state matches the current graph.
    #[default]
    Uninitialized,
    /// A search state was initialized against the current graph.
    Ready,
    /// The last search ran to completion.
    Done,
}

/// Outcome of a successful [`PathGraph::update_weight`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightUpdate {
    /// The weight did not increase, so every stored route stays valid.
    Retained,
    /// The weight increased and every route was dropped; callers must
    /// reinsert routes validated against the new weight.
    IncreasedWeightClearedRoutes { previous: f64, cleared: usize },
}

/// Points, routes and the active search for a single session.
///
/// `weight` converts great-circle distance into route cost units. Every
/// stored route satisfies `cost >= weight * angle(source, destination)`,
/// which keeps the search heuristic admissible. Any mutation discards the
/// current search.
#[derive(Debug, Clone, Default)]
pub struct PathGraph {
    weight: f64,
    points: PointStore,
    routes: RouteStore,
    search: Option<SearchState>,
    status: SearchStatus,
    expansion_limit: Option<usize>,
}

impl PathGraph {
    /// Create an empty graph with the given heuristic weight.
    pub fn new(weight: f64) -> Result<Self> {
        if weight.is_nan() || weight < 0.0 {
            return Err(Error::NegativeWeight { weight });
        }
        Ok(Self {
            weight,
            ..Self::default()
        })
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == SearchStatus::Ready
    }

    pub fn is_done(&self) -> bool {
        self.status == SearchStatus::Done
    }

    /// Cap the number of nodes a single [`PathGraph::find_path`] call may
    /// settle. `None` removes the cap.
    pub fn set_expansion_limit(&mut self, limit: Option<usize>) {
        self.expansion_limit = limit;
    }

    pub fn expansion_limit(&self) -> Option<usize> {
        self.expansion_limit
    }

    // Mutation -------------------------------------------------------------

    /// Change the heuristic weight.
    ///
    /// Lowering the weight only loosens the route bound. Raising it may
    /// invalidate stored routes, so all of them are removed and the returned
    /// [`WeightUpdate`] says so.
    pub fn update_weight(&mut self, weight: f64) -> Result<WeightUpdate> {
        if weight.is_nan() || weight < 0.0 {
            return Err(Error::NegativeWeight { weight });
        }

        let previous = self.weight;
        self.weight = weight;
        self.invalidate();

        if weight > previous {
            let cleared = self.routes.len();
            self.routes.clear();
            warn!(previous, weight, cleared, "increased weight cleared routes");
            return Ok(WeightUpdate::IncreasedWeightClearedRoutes { previous, cleared });
        }

        debug!(previous, weight, "weight updated");
        Ok(WeightUpdate::Retained)
    }

    /// Insert or overwrite a point.
    pub fn insert_point(&mut self, id: PointId, phi: f64, theta: f64) {
        self.points.insert(id, phi, theta);
        self.invalidate();
    }

    /// Remove a point together with every route touching it. Missing points
    /// are ignored.
    pub fn erase_point(&mut self, id: PointId) {
        if self.points.erase(id) {
            let removed = self.routes.erase_touching(id);
            debug!(point = id, routes = removed, "erased point");
            self.invalidate();
        }
    }

    /// Remove every point and, with them, every route.
    pub fn clear_points(&mut self) {
        self.points.clear();
        self.routes.clear();
        self.invalidate();
    }

    /// Insert or overwrite the route `source -> destination`.
    ///
    /// A rejected route leaves the graph untouched.
    pub fn insert_route(&mut self, source: PointId, destination: PointId, cost: f64) -> Result<()> {
        if source == destination {
            return Err(Error::SelfLoop { id: source });
        }

        let bound = self
            .heuristic_bound(source, destination)
            .ok_or_else(|| Error::MissingEndpoint {
                source_id: source,
                destination,
            })?;
        // Negated so that a NaN cost or a NaN bound is rejected.
        if !(cost >= bound) {
            return Err(Error::BelowHeuristicBound {
                source_id: source,
                destination,
                cost,
                bound,
            });
        }

        self.routes.insert(source, destination, cost);
        self.invalidate();
        Ok(())
    }

    /// Remove a route if present. Missing routes are ignored.
    pub fn erase_route(&mut self, source: PointId, destination: PointId) {
        if self.routes.erase(source, destination).is_some() {
            self.invalidate();
        }
    }

    pub fn clear_routes(&mut self) {
        self.routes.clear();
        self.invalidate();
    }

    // Queries --------------------------------------------------------------

    /// Smallest cost a route between two points may carry under the current
    /// weight, or `None` when either point is missing.
    pub fn heuristic_bound(&self, source: PointId, destination: PointId) -> Option<f64> {
        let from = self.points.get(source)?;
        let to = self.points.get(destination)?;
        Some(from.weighted_distance(to, self.weight))
    }

    pub fn contains_point(&self, id: PointId) -> bool {
        self.points.contains(id)
    }

    pub fn point(&self, id: PointId) -> Option<&SphericalPoint> {
        self.points.get(id)
    }

    pub fn route_cost(&self, source: PointId, destination: PointId) -> Option<f64> {
        self.routes.cost(source, destination)
    }

    /// Destinations reachable from `source` through a single route, ascending.
    pub fn neighbours(&self, source: PointId) -> Vec<PointId> {
        self.routes.neighbours(source).map(|(dst, _)| dst).collect()
    }

    pub fn count_points(&self) -> usize {
        self.points.len()
    }

    pub fn count_routes(&self) -> usize {
        self.routes.len()
    }

    /// Points as `(id, phi, theta)` in ascending identifier order, with the
    /// angles reconstructed from the stored unit vectors.
    pub fn points(&self) -> impl Iterator<Item = (PointId, f64, f64)> + '_ {
        self.points
            .iter()
            .map(|(id, point)| (id, point.phi(), point.theta()))
    }

    /// Routes ordered by `(source, destination)`.
    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.routes.iter()
    }

    // Search ---------------------------------------------------------------

    /// Prepare a search from `source` to `destination`.
    ///
    /// When either endpoint is missing the previous search is discarded and
    /// the graph falls back to [`SearchStatus::Uninitialized`].
    pub fn initialize(&mut self, source: PointId, destination: PointId) {
        match SearchState::new(&self.points, source, destination, self.weight) {
            Some(state) => {
                debug!(source, destination, nodes = state.nodes().len(), "search initialized");
                self.search = Some(state);
                self.status = SearchStatus::Ready;
            }
            None => {
                debug!(source, destination, "search endpoints missing");
                self.invalidate();
            }
        }
    }

    /// Drive the initialized search. Does nothing unless the graph is
    /// [`SearchStatus::Ready`].
    pub fn find_path(&mut self) -> SearchOutcome {
        if self.status != SearchStatus::Ready {
            return SearchOutcome::NotReady;
        }
        let Some(state) = self.search.as_mut() else {
            self.status = SearchStatus::Uninitialized;
            return SearchOutcome::NotReady;
        };

        let outcome = state.run(&self.routes, self.expansion_limit);
        debug!(?outcome, expansions = state.expansions(), "search finished");
        if outcome != SearchOutcome::Truncated {
            self.status = SearchStatus::Done;
        }
        outcome
    }

    /// The search state, if one matches the current graph.
    pub fn search_state(&self) -> Option<&SearchState> {
        match self.status {
            SearchStatus::Uninitialized => None,
            _ => self.search.as_ref(),
        }
    }

    /// Point identifiers from source to destination. Empty unless the last
    /// search is done and reached its destination.
    pub fn path(&self) -> Vec<PointId> {
        self.completed().map(SearchState::path).unwrap_or_default()
    }

    /// Final cost of the last completed search, `None` when no result exists.
    pub fn total_cost(&self) -> Option<f64> {
        self.completed()
            .map(SearchState::destination_cost)
            .filter(|cost| cost.is_finite())
    }

    /// [`PathGraph::total_cost`] with [`NO_RESULT_COST`] standing in for
    /// "no result".
    pub fn costs(&self) -> f64 {
        self.total_cost().unwrap_or(NO_RESULT_COST)
    }

    fn completed(&self) -> Option<&SearchState> {
        match self.status {
            SearchStatus::Done => self.search.as_ref(),
            _ => None,
        }
    }

    fn invalidate(&mut self) {
        self.status = SearchStatus::Uninitialized;
        self.search = None;
    }
}
