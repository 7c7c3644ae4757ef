use std::fmt::Write;

use serde::Serialize;

use crate::graph::PathGraph;
use crate::points::PointId;

/// Structured representation of a query result that higher-level consumers
/// can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub source: PointId,
    pub destination: PointId,
    pub found: bool,
    pub hops: usize,
    pub steps: Vec<PointId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl PathSummary {
    /// Capture the result of the last search for `source -> destination`.
    pub fn from_graph(graph: &PathGraph, source: PointId, destination: PointId) -> Self {
        let steps = graph.path();
        let cost = graph.total_cost();
        Self {
            source,
            destination,
            found: cost.is_some(),
            hops: steps.len().saturating_sub(1),
            steps,
            cost,
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        if !self.found {
            let _ = writeln!(
                buffer,
                "No path: {} -> {}",
                self.source, self.destination
            );
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Path: {} -> {} ({} hops)",
            self.source, self.destination, self.hops
        );
        for (index, id) in self.steps.iter().enumerate() {
            let _ = writeln!(buffer, "{:>3}: {}", index, id);
        }
        if let Some(cost) = self.cost {
            let _ = writeln!(buffer, "Cost: {cost}");
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> PathGraph {
        let mut graph = PathGraph::new(1.0).expect("valid weight");
        for id in 0..3 {
            graph.insert_point(id, std::f64::consts::FRAC_PI_2, id as f64 * 0.25);
        }
        graph.insert_route(0, 1, 1.0).expect("route 0->1");
        graph.insert_route(1, 2, 1.0).expect("route 1->2");
        graph
    }

    #[test]
    fn summary_lists_steps_and_cost() {
        let mut graph = line_graph();
        graph.initialize(0, 2);
        graph.find_path();

        let summary = PathSummary::from_graph(&graph, 0, 2);
        assert!(summary.found);
        assert_eq!(summary.steps, vec![0, 1, 2]);
        assert_eq!(summary.hops, 2);

        let text = summary.render_plain();
        assert!(text.starts_with("Path: 0 -> 2 (2 hops)"));
        assert!(text.contains("Cost: 2"));
    }

    #[test]
    fn missing_result_serialises_without_cost() {
        let mut graph = line_graph();
        graph.initialize(2, 0);
        graph.find_path();

        let summary = PathSummary::from_graph(&graph, 2, 0);
        assert!(!summary.found);
        let json = serde_json::to_value(&summary).expect("serialise summary");
        assert_eq!(json["steps"], serde_json::json!([]));
        assert!(json.get("cost").is_none());
        assert!(summary.render_plain().starts_with("No path"));
    }
}
