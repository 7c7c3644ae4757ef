//! Interactive, line-oriented session over a single graph.
//!
//! Each input line is one command. Commands may be given by name or by the
//! number shown in the menu:
//!
//! ```text
//! 0 exit                     5 erase-routes <file>
//! 1 insert-points <file>     6 clear-routes
//! 2 erase-points <file>      7 find <from> <to> [output-file]
//! 3 clear-points             8 weight <value>
//! 4 insert-routes <file>     9 backup [dir]
//! ```
//!
//! Errors from a single command are reported and the session continues.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use spherepath_lib::records::{
    backup, erase_points, erase_routes, insert_points, insert_routes, save_path,
};
use spherepath_lib::{
    Error as GraphError, LoadReport, PathGraph, PathSummary, PointId, SearchOutcome, WeightUpdate,
};

const MENU: &str = "  Option 0: exit
  Option 1: insert-points <file>
  Option 2: erase-points <file>
  Option 3: clear-points
  Option 4: insert-routes <file>
  Option 5: erase-routes <file>
  Option 6: clear-routes
  Option 7: find <from> <to> [output-file]
  Option 8: weight <value>
  Option 9: backup [dir]
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Exit,
}

/// Interactive session state.
pub struct Session {
    graph: PathGraph,
    backup_dir: PathBuf,
}

impl Session {
    pub fn new(graph: PathGraph, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            graph,
            backup_dir: backup_dir.into(),
        }
    }

    pub fn graph(&self) -> &PathGraph {
        &self.graph
    }

    /// Read commands from `input` until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        writeln!(output, "Spherepath interactive session")?;
        write!(output, "{MENU}")?;

        for line in input.lines() {
            let line = line.context("failed to read command")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.execute(line, output) {
                Ok(Control::Exit) => break,
                Ok(Control::Continue) => {}
                Err(err) => writeln!(output, "ERROR - {err:#}")?,
            }
        }
        Ok(())
    }

    fn execute<W: Write>(&mut self, line: &str, output: &mut W) -> Result<Control> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        debug!(command, ?args, "session command");

        match command {
            "0" | "exit" | "quit" => return Ok(Control::Exit),
            "1" | "insert-points" => {
                let report = insert_points(file_arg(&args)?, &mut self.graph)?;
                summarize(output, "points inserted", &report)?;
            }
            "2" | "erase-points" => {
                let report = erase_points(file_arg(&args)?, &mut self.graph)?;
                summarize(output, "points erased", &report)?;
            }
            "3" | "clear-points" => {
                self.graph.clear_points();
                writeln!(output, "  points cleared")?;
            }
            "4" | "insert-routes" => {
                let report = insert_routes(file_arg(&args)?, &mut self.graph)?;
                summarize(output, "routes inserted", &report)?;
            }
            "5" | "erase-routes" => {
                let report = erase_routes(file_arg(&args)?, &mut self.graph)?;
                summarize(output, "routes erased", &report)?;
            }
            "6" | "clear-routes" => {
                self.graph.clear_routes();
                writeln!(output, "  routes cleared")?;
            }
            "7" | "find" => self.find(&args, output)?,
            "8" | "weight" => self.weight(&args, output)?,
            "9" | "backup" => {
                let dir = args
                    .first()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| self.backup_dir.clone());
                let files = backup(&self.graph, &dir)?;
                writeln!(
                    output,
                    "  backup written: {}, {}",
                    files.points.display(),
                    files.routes.display()
                )?;
            }
            "status" => writeln!(
                output,
                "  points: {}, routes: {}, weight: {}",
                self.graph.count_points(),
                self.graph.count_routes(),
                self.graph.weight()
            )?,
            "help" | "?" => write!(output, "{MENU}")?,
            other => bail!("unknown command '{other}'; type 'help' for the menu"),
        }
        Ok(Control::Continue)
    }

    fn find<W: Write>(&mut self, args: &[&str], output: &mut W) -> Result<()> {
        let (from, to) = match args {
            [from, to, ..] => (parse_id(from)?, parse_id(to)?),
            _ => bail!("usage: find <from> <to> [output-file]"),
        };

        self.graph.initialize(from, to);
        match self.graph.find_path() {
            SearchOutcome::NotReady => bail!("point {from} or {to} is not in the graph"),
            SearchOutcome::Truncated => bail!(
                "search stopped after {} expansions without a result",
                self.graph.expansion_limit().unwrap_or_default()
            ),
            SearchOutcome::Found | SearchOutcome::Unreachable => {}
        }
        let summary = PathSummary::from_graph(&self.graph, from, to);
        write!(output, "{}", summary.render_plain())?;

        if let Some(file) = args.get(2) {
            save_path(&self.graph, Path::new(file))
                .with_context(|| format!("failed to save path to {file}"))?;
            writeln!(output, "  path saved to {file}")?;
        }
        Ok(())
    }

    fn weight<W: Write>(&mut self, args: &[&str], output: &mut W) -> Result<()> {
        let value: f64 = match args.first() {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid weight '{raw}'"))?,
            None => bail!("usage: weight <value>"),
        };

        match self.graph.update_weight(value) {
            Ok(WeightUpdate::Retained) => writeln!(output, "  weight set to {value}")?,
            Ok(WeightUpdate::IncreasedWeightClearedRoutes { cleared, .. }) => writeln!(
                output,
                "  *Increased weight cleared routes ({cleared} removed)"
            )?,
            Err(GraphError::NegativeWeight { .. }) => writeln!(output, "ERROR - NEGATIVE WEIGHT")?,
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}

fn file_arg<'a>(args: &[&'a str]) -> Result<&'a Path> {
    match args.first() {
        Some(file) => Ok(Path::new(*file)),
        None => bail!("missing file name"),
    }
}

fn parse_id(raw: &str) -> Result<PointId> {
    raw.parse()
        .with_context(|| format!("invalid point id '{raw}'"))
}

fn summarize<W: Write>(output: &mut W, label: &str, report: &LoadReport) -> Result<()> {
    writeln!(output, "  {} {label}", report.applied)?;
    for rejection in &report.rejected {
        writeln!(output, "  line {}: {}", rejection.line, rejection.reason)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn run(session: &mut Session, script: &str) -> String {
        let mut output = Vec::new();
        session
            .run(script.as_bytes(), &mut output)
            .expect("session runs");
        String::from_utf8(output).expect("utf8 output")
    }

    #[test]
    fn session_loads_files_and_finds_a_path() {
        let dir = tempdir().expect("create temp dir");
        let points = dir.path().join("points.txt");
        let routes = dir.path().join("routes.txt");
        let result = dir.path().join("path.txt");
        fs::write(&points, "1,1.0,0.0\n2,1.0,0.1\n3,1.0,0.2\n").expect("write points");
        fs::write(&routes, "1,2,1.0\n2,3,1.0\n3,3,1.0\n").expect("write routes");

        let mut session = Session::new(PathGraph::default(), dir.path());
        let script = format!(
            "1 {}\ninsert-routes {}\nfind 1 3 {}\nexit\nclear-points\n",
            points.display(),
            routes.display(),
            result.display()
        );
        let output = run(&mut session, &script);

        assert!(output.contains("3 points inserted"));
        assert!(output.contains("2 routes inserted"));
        assert!(output.contains("line 3: route source and destination must differ"));
        assert!(output.contains("Path: 1 -> 3 (2 hops)"));
        assert_eq!(
            fs::read_to_string(&result).expect("read path"),
            "1\n2\n3\n2\n"
        );
        assert_eq!(session.graph().count_points(), 3, "commands after exit are ignored");
    }

    #[test]
    fn weight_command_reports_outcomes() {
        let mut graph = PathGraph::default();
        graph.insert_point(1, 1.0, 0.0);
        graph.insert_point(2, 1.0, 0.1);
        graph.insert_route(1, 2, 5.0).expect("valid route");
        let mut session = Session::new(graph, ".");

        let output = run(&mut session, "weight -1\n8 2.5\nweight 1\n");

        assert!(output.contains("ERROR - NEGATIVE WEIGHT"));
        assert!(output.contains("*Increased weight cleared routes (1 removed)"));
        assert!(output.contains("weight set to 1"));
        assert_eq!(session.graph().count_routes(), 0);
        assert_eq!(session.graph().weight(), 1.0);
    }

    #[test]
    fn truncated_search_is_reported_as_an_error() {
        let mut graph = PathGraph::default();
        for id in 0..4 {
            graph.insert_point(id, 1.0, id as f64 * 0.1);
        }
        for id in 0..3 {
            graph.insert_route(id, id + 1, 1.0).expect("valid route");
        }
        graph.set_expansion_limit(Some(1));
        let mut session = Session::new(graph, ".");

        let output = run(&mut session, "find 0 3\n");

        assert!(output.contains("ERROR - search stopped after 1 expansions"));
        assert!(!output.contains("No path"));
    }

    #[test]
    fn unknown_points_are_reported_by_find() {
        let mut session = Session::new(PathGraph::default(), ".");
        let output = run(&mut session, "find 1 2\n");
        assert!(output.contains("ERROR - point 1 or 2 is not in the graph"));
    }

    #[test]
    fn menu_entries_share_one_indent() {
        assert!(MENU.lines().all(|line| line.starts_with("  Option ")));
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let mut session = Session::new(PathGraph::default(), ".");
        let output = run(
            &mut session,
            "insert-points /definitely/missing.txt\nbogus\nfind 1\nstatus\n",
        );

        assert!(output.contains("ERROR - record source /definitely/missing.txt is unavailable"));
        assert!(output.contains("ERROR - unknown command 'bogus'"));
        assert!(output.contains("ERROR - usage: find"));
        assert!(output.contains("points: 0, routes: 0, weight: 0"));
    }
}
