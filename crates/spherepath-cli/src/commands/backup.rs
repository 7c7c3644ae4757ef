use std::path::Path;

use anyhow::{Context, Result};

use spherepath_cli::config::{GraphConfig, GraphSources};
use spherepath_lib::records::backup;

/// Handle the backup subcommand.
pub fn handle_backup(config: &GraphConfig, sources: &GraphSources, out_dir: &Path) -> Result<()> {
    let graph = config.load(sources)?;
    let files = backup(&graph, out_dir)
        .with_context(|| format!("failed to write backup into {}", out_dir.display()))?;

    println!("Points written to {}", files.points.display());
    println!("Routes written to {}", files.routes.display());
    Ok(())
}
