use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use spherepath_cli::config::{GraphConfig, GraphSources};
use spherepath_cli::output::OutputFormat;
use spherepath_lib::PointId;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Great-circle A* pathfinding over spherical point graphs")]
struct Cli {
    /// Heuristic weight converting great-circle distance (radians) into cost units.
    #[arg(long, default_value_t = 0.0, global = true)]
    weight: f64,

    /// Maximum number of nodes a single search may settle.
    #[arg(long, global = true)]
    max_expansions: Option<usize>,

    /// Output format for query results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load point and route files and compute the cheapest path between two points.
    Route {
        /// Points file (`id,phi,theta` per line).
        #[arg(long)]
        points: PathBuf,
        /// Routes file (`src,dst,cost` per line).
        #[arg(long)]
        routes: Option<PathBuf>,
        /// Source point identifier.
        #[arg(long = "from")]
        from: PointId,
        /// Destination point identifier.
        #[arg(long = "to")]
        to: PointId,
        /// Also write the path and cost to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load point and route files and write them back out as a backup.
    Backup {
        #[arg(long)]
        points: PathBuf,
        #[arg(long)]
        routes: Option<PathBuf>,
        /// Directory receiving `points(N).txt` and `routes(M).txt`.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Start an interactive session reading commands from stdin.
    Shell {
        /// Default directory for the `backup` command.
        #[arg(long, default_value = ".")]
        backup_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = GraphConfig {
        weight: cli.weight,
        max_expansions: cli.max_expansions,
    };

    match cli.command {
        Command::Route {
            points,
            routes,
            from,
            to,
            output,
        } => commands::route::handle_route(
            &config,
            &GraphSources { points, routes },
            from,
            to,
            output.as_deref(),
            cli.format,
        ),
        Command::Backup {
            points,
            routes,
            out_dir,
        } => commands::backup::handle_backup(&config, &GraphSources { points, routes }, &out_dir),
        Command::Shell { backup_dir } => commands::shell::handle_shell(&config, backup_dir),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
