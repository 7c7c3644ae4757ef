use std::io;
use std::path::PathBuf;

use anyhow::Result;

use spherepath_cli::config::GraphConfig;
use spherepath_cli::session::Session;

/// Handle the shell subcommand.
pub fn handle_shell(config: &GraphConfig, backup_dir: PathBuf) -> Result<()> {
    let mut session = Session::new(config.empty_graph()?, backup_dir);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)
}
