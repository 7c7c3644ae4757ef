//! Points on the unit sphere, directed routes between them, and an A* search
//! whose heuristic is the weighted great-circle distance to the destination.
//!
//! [`PathGraph`] owns all state. Route costs are checked against that
//! heuristic on insertion, and every change that alters the graph discards the search.

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod output;
pub mod points;
pub mod records;
pub mod routes;
pub mod search;
pub mod sphere;

pub use error::{Error, Result};
pub use graph::{PathGraph, SearchStatus, WeightUpdate};
pub use output::PathSummary;
pub use points::{PointId, PointStore};
pub use records::{LoadReport, RecordRejection};
pub use routes::{Route, RouteStore};
pub use search::{SearchNode, SearchOutcome, SearchState, NO_RESULT_COST};
pub use sphere::SphericalPoint;
