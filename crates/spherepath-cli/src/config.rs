use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use spherepath_lib::records::{insert_points, insert_routes};
use spherepath_lib::{LoadReport, PathGraph};

/// Settings shared by every subcommand that builds a graph.
#[derive(Debug, Clone, Default)]
pub struct GraphConfig {
    /// Heuristic weight converting great-circle distance into cost units.
    pub weight: f64,
    /// Cap on nodes settled per search.
    pub max_expansions: Option<usize>,
}

/// Record files to load into a graph.
#[derive(Debug, Clone)]
pub struct GraphSources {
    pub points: PathBuf,
    pub routes: Option<PathBuf>,
}

impl GraphConfig {
    /// Create an empty graph using this configuration.
    pub fn empty_graph(&self) -> Result<PathGraph> {
        let mut graph = PathGraph::new(self.weight).context("invalid --weight")?;
        graph.set_expansion_limit(self.max_expansions);
        Ok(graph)
    }

    /// Build a graph and load the given record files into it.
    ///
    /// Rejected records are logged and skipped; an unreadable file aborts.
    pub fn load(&self, sources: &GraphSources) -> Result<PathGraph> {
        let mut graph = self.empty_graph()?;

        let report = insert_points(&sources.points, &mut graph)
            .with_context(|| format!("failed to load points from {}", sources.points.display()))?;
        log_rejections(&sources.points, &report);

        if let Some(routes) = &sources.routes {
            let report = insert_routes(routes, &mut graph)
                .with_context(|| format!("failed to load routes from {}", routes.display()))?;
            log_rejections(routes, &report);
        }

        Ok(graph)
    }
}

pub fn log_rejections(source: &Path, report: &LoadReport) {
    for rejection in &report.rejected {
        warn!(
            source = %source.display(),
            line = rejection.line,
            reason = %rejection.reason,
            "skipped record"
        );
    }
}
