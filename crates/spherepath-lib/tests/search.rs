mod common;

use spherepath_lib::{PathGraph, SearchOutcome, SearchStatus, NO_RESULT_COST};

use common::{equator_line, link};

fn five_point_line() -> (PathGraph, f64) {
    let mut graph = equator_line(6371.0, 5);
    let mut total = 0.0;
    for id in 0..4 {
        total += link(&mut graph, id, id + 1, 1.0);
    }
    (graph, total)
}

#[test]
fn line_path_visits_every_intermediate_point() {
    let (mut graph, total) = five_point_line();

    graph.initialize(0, 4);
    assert_eq!(graph.status(), SearchStatus::Ready);
    assert_eq!(graph.find_path(), SearchOutcome::Found);

    assert_eq!(graph.path(), vec![0, 1, 2, 3, 4]);
    let cost = graph.total_cost().expect("path exists");
    assert!((cost - total).abs() < 1e-9);
    assert_eq!(graph.costs(), cost);
}

#[test]
fn cheaper_detour_beats_direct_route() {
    let mut graph = equator_line(1.0, 3);
    link(&mut graph, 0, 2, 10.0);
    link(&mut graph, 0, 1, 1.5);
    link(&mut graph, 1, 2, 1.5);

    graph.initialize(0, 2);
    graph.find_path();

    assert_eq!(graph.path(), vec![0, 1, 2]);
    let expected = graph.route_cost(0, 1).unwrap() + graph.route_cost(1, 2).unwrap();
    assert_eq!(graph.total_cost(), Some(expected));
}

#[test]
fn unreachable_destination_reports_no_result() {
    let mut graph = equator_line(1.0, 4);
    link(&mut graph, 0, 1, 1.0);
    link(&mut graph, 2, 3, 1.0);

    graph.initialize(0, 3);
    assert_eq!(graph.find_path(), SearchOutcome::Unreachable);

    assert!(graph.is_done());
    assert!(graph.path().is_empty());
    assert_eq!(graph.costs(), NO_RESULT_COST);
    assert!(graph.total_cost().is_none());
}

#[test]
fn routes_are_directed() {
    let (mut graph, _) = five_point_line();

    graph.initialize(4, 0);
    assert_eq!(graph.find_path(), SearchOutcome::Unreachable);
    assert!(graph.path().is_empty());
}

#[test]
fn missing_endpoint_leaves_search_uninitialized() {
    let (mut graph, _) = five_point_line();
    graph.initialize(0, 4);
    graph.find_path();
    assert!(graph.is_done());

    graph.initialize(0, 42);
    assert_eq!(graph.status(), SearchStatus::Uninitialized);
    assert_eq!(graph.find_path(), SearchOutcome::NotReady);
    assert!(graph.path().is_empty());
    assert_eq!(graph.costs(), NO_RESULT_COST);
}

#[test]
fn results_are_unavailable_before_the_search_runs() {
    let (mut graph, _) = five_point_line();
    graph.initialize(0, 4);

    assert!(graph.path().is_empty());
    assert_eq!(graph.costs(), NO_RESULT_COST);
}

#[test]
fn search_from_a_point_to_itself_costs_nothing() {
    let (mut graph, _) = five_point_line();
    graph.initialize(2, 2);
    assert_eq!(graph.find_path(), SearchOutcome::Found);

    assert_eq!(graph.path(), vec![2]);
    assert_eq!(graph.total_cost(), Some(0.0));
}

#[test]
fn repeated_searches_are_deterministic() {
    let mut graph = equator_line(1.0, 4);
    // Two equal-cost branches from 0 to 3.
    link(&mut graph, 0, 1, 3.0);
    link(&mut graph, 0, 2, 3.0);
    graph.insert_route(1, 3, 1.0).expect("valid route");
    graph.insert_route(2, 3, 1.0).expect("valid route");

    graph.initialize(0, 3);
    graph.find_path();
    let first = (graph.path(), graph.costs());

    for _ in 0..5 {
        graph.initialize(0, 3);
        graph.find_path();
        assert_eq!((graph.path(), graph.costs()), first);
    }
}

#[test]
fn zero_weight_behaves_like_dijkstra() {
    let mut graph = equator_line(0.0, 4);
    graph.insert_route(0, 3, 10.0).expect("valid route");
    graph.insert_route(0, 1, 1.0).expect("valid route");
    graph.insert_route(1, 2, 1.0).expect("valid route");
    graph.insert_route(2, 3, 1.0).expect("valid route");

    graph.initialize(0, 3);
    graph.find_path();

    assert_eq!(graph.path(), vec![0, 1, 2, 3]);
    assert_eq!(graph.total_cost(), Some(3.0));
}

#[test]
fn settled_nodes_are_never_expanded_twice() {
    let mut graph = equator_line(0.0, 5);
    let routes = [
        (0, 1, 1.0),
        (0, 2, 4.0),
        (1, 2, 1.0),
        (2, 3, 1.0),
        (1, 3, 5.0),
        (3, 4, 1.0),
    ];
    for (src, dst, cost) in routes {
        graph.insert_route(src, dst, cost).expect("valid route");
    }

    graph.initialize(0, 4);
    graph.find_path();

    let state = graph.search_state().expect("search state kept");
    assert!(state.expansions() <= graph.count_points());
    assert_eq!(graph.path(), vec![0, 1, 2, 3, 4]);
    assert_eq!(graph.total_cost(), Some(4.0));
}

#[test]
fn expansion_limit_truncates_without_exposing_a_result() {
    let (mut graph, total) = five_point_line();
    graph.set_expansion_limit(Some(2));

    graph.initialize(0, 4);
    assert_eq!(graph.find_path(), SearchOutcome::Truncated);
    assert_eq!(graph.status(), SearchStatus::Ready);
    assert!(graph.path().is_empty());
    assert_eq!(graph.costs(), NO_RESULT_COST);

    assert_eq!(graph.find_path(), SearchOutcome::Found);
    assert_eq!(graph.path(), vec![0, 1, 2, 3, 4]);
    assert!((graph.costs() - total).abs() < 1e-9);
}
