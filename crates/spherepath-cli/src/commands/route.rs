//! Route command handler for computing a path between two points.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use spherepath_cli::config::{GraphConfig, GraphSources};
use spherepath_cli::output::OutputFormat;
use spherepath_lib::records::save_path;
use spherepath_lib::{PathSummary, PointId, SearchOutcome};

/// Handle the route subcommand.
pub fn handle_route(
    config: &GraphConfig,
    sources: &GraphSources,
    from: PointId,
    to: PointId,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut graph = config.load(sources)?;
    info!(
        points = graph.count_points(),
        routes = graph.count_routes(),
        "graph loaded"
    );

    for (id, role) in [(from, "source"), (to, "destination")] {
        if !graph.contains_point(id) {
            bail!("unknown {role} point {id}");
        }
    }

    graph.initialize(from, to);
    let outcome = graph.find_path();
    if outcome == SearchOutcome::Truncated {
        bail!(
            "search stopped after {} expansions without a result",
            config.max_expansions.unwrap_or_default()
        );
    }

    if let Some(path) = output {
        save_path(&graph, path)
            .with_context(|| format!("failed to write path to {}", path.display()))?;
    }

    let summary = PathSummary::from_graph(&graph, from, to);
    print!("{}", format.render(&summary)?);

    if !summary.found {
        bail!("no path found from {from} to {to}");
    }
    Ok(())
}
