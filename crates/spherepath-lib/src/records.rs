//! Bulk record I/O for points, routes, backups and query results.
//!
//! Record files are headerless, comma-delimited text with one record per
//! line:
//!
//! ```text
//! points:        id,phi,theta
//! point erasure: id
//! routes:        src,dst,cost
//! route erasure: src,dst
//! ```
//!
//! A source that cannot be opened or read aborts the whole operation with
//! [`Error::SourceUnavailable`]. Malformed records and records the graph
//! rejects are collected in the returned [`LoadReport`] and the batch
//! carries on.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::graph::PathGraph;
use crate::points::PointId;

#[derive(Debug, Deserialize)]
struct PointRecord {
    id: PointId,
    phi: f64,
    theta: f64,
}

#[derive(Debug, Deserialize)]
struct PointKey {
    id: PointId,
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    source: PointId,
    destination: PointId,
    cost: f64,
}

#[derive(Debug, Deserialize)]
struct RouteKey {
    source: PointId,
    destination: PointId,
}

/// A record that was skipped, with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRejection {
    pub line: u64,
    pub reason: String,
}

/// Summary of a bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records handed to the graph successfully.
    pub applied: usize,
    pub rejected: Vec<RecordRejection>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Files written by [`backup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFiles {
    pub points: PathBuf,
    pub routes: PathBuf,
}

pub fn insert_points(path: &Path, graph: &mut PathGraph) -> Result<LoadReport> {
    let file = open_source(path)?;
    insert_points_from_reader(file, graph).map_err(|err| unavailable(path, err))
}

pub fn insert_points_from_reader<R: Read>(reader: R, graph: &mut PathGraph) -> Result<LoadReport> {
    let report = apply_records(reader, |record: PointRecord| {
        graph.insert_point(record.id, record.phi, record.theta);
        Ok(())
    })?;
    info!(applied = report.applied, rejected = report.rejected.len(), "inserted points");
    Ok(report)
}

pub fn erase_points(path: &Path, graph: &mut PathGraph) -> Result<LoadReport> {
    let file = open_source(path)?;
    erase_points_from_reader(file, graph).map_err(|err| unavailable(path, err))
}

pub fn erase_points_from_reader<R: Read>(reader: R, graph: &mut PathGraph) -> Result<LoadReport> {
    let report = apply_records(reader, |record: PointKey| {
        graph.erase_point(record.id);
        Ok(())
    })?;
    info!(applied = report.applied, rejected = report.rejected.len(), "erased points");
    Ok(report)
}

pub fn insert_routes(path: &Path, graph: &mut PathGraph) -> Result<LoadReport> {
    let file = open_source(path)?;
    insert_routes_from_reader(file, graph).map_err(|err| unavailable(path, err))
}

/// Insert routes record by record. Self-loops, routes below the heuristic
/// bound and routes with unknown endpoints are reported per record.
pub fn insert_routes_from_reader<R: Read>(reader: R, graph: &mut PathGraph) -> Result<LoadReport> {
    let report = apply_records(reader, |record: RouteRecord| {
        graph.insert_route(record.source, record.destination, record.cost)
    })?;
    info!(applied = report.applied, rejected = report.rejected.len(), "inserted routes");
    Ok(report)
}

pub fn erase_routes(path: &Path, graph: &mut PathGraph) -> Result<LoadReport> {
    let file = open_source(path)?;
    erase_routes_from_reader(file, graph).map_err(|err| unavailable(path, err))
}

pub fn erase_routes_from_reader<R: Read>(reader: R, graph: &mut PathGraph) -> Result<LoadReport> {
    let report = apply_records(reader, |record: RouteKey| {
        graph.erase_route(record.source, record.destination);
        Ok(())
    })?;
    info!(applied = report.applied, rejected = report.rejected.len(), "erased routes");
    Ok(report)
}

/// Write every point and route into `dir` as `points(<N>).txt` and
/// `routes(<M>).txt`, where `N` and `M` are the current counts.
pub fn backup(graph: &PathGraph, dir: &Path) -> Result<BackupFiles> {
    fs::create_dir_all(dir)?;
    let files = BackupFiles {
        points: dir.join(format!("points({}).txt", graph.count_points())),
        routes: dir.join(format!("routes({}).txt", graph.count_routes())),
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&files.points)?;
    for record in graph.points() {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&files.routes)?;
    for route in graph.routes() {
        writer.serialize((route.source, route.destination, route.cost))?;
    }
    writer.flush()?;

    info!(
        points = %files.points.display(),
        routes = %files.routes.display(),
        "backup written"
    );
    Ok(files)
}

/// Write the last query result: one point identifier per line followed by
/// the total cost, or the negative "no result" cost when there is none.
pub fn save_path(graph: &PathGraph, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_path(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Costs use the shortest representation that round-trips, which keeps
/// every significant digit of the `f64`.
pub fn write_path<W: Write>(graph: &PathGraph, writer: &mut W) -> Result<()> {
    for id in graph.path() {
        writeln!(writer, "{id}")?;
    }
    writeln!(writer, "{}", graph.costs())?;
    Ok(())
}

fn apply_records<R, T, F>(reader: R, mut apply: F) -> Result<LoadReport>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(T) -> Result<()>,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or_default();
                reject(&mut report, line, err.to_string());
                continue;
            }
        };

        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let parsed = match record.deserialize::<T>(None) {
            Ok(parsed) => parsed,
            Err(err) => {
                reject(&mut report, line, format!("malformed record: {err}"));
                continue;
            }
        };

        match apply(parsed) {
            Ok(()) => report.applied += 1,
            Err(err) => reject(&mut report, line, err.to_string()),
        }
    }

    Ok(report)
}

fn reject(report: &mut LoadReport, line: u64, reason: String) {
    warn!(line, %reason, "record rejected");
    report.rejected.push(RecordRejection { line, reason });
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| Error::SourceUnavailable {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn unavailable(path: &Path, err: Error) -> Error {
    match err {
        Error::Io(err) => Error::SourceUnavailable {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
        Error::Csv(err) => Error::SourceUnavailable {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
        other => other,
    }
}
