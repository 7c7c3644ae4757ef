#![allow(dead_code)]

use std::f64::consts::FRAC_PI_2;

use spherepath_lib::{PathGraph, PointId};

/// Angular spacing between neighbouring points of [`equator_line`].
pub const SPACING: f64 = 0.1;

/// Points `0..count` evenly spaced along the equator.
pub fn equator_line(weight: f64, count: PointId) -> PathGraph {
    let mut graph = PathGraph::new(weight).expect("valid weight");
    for id in 0..count {
        graph.insert_point(id, FRAC_PI_2, id as f64 * SPACING);
    }
    graph
}

/// Insert `source -> destination` costed exactly at the heuristic bound
/// scaled by `factor`, returning the cost used.
pub fn link(graph: &mut PathGraph, source: PointId, destination: PointId, factor: f64) -> f64 {
    let bound = graph
        .heuristic_bound(source, destination)
        .expect("endpoints exist");
    let cost = bound * factor;
    graph
        .insert_route(source, destination, cost)
        .expect("route respects bound");
    cost
}
