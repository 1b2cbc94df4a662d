//! Source loaders and result exporters.
//!
//! Airport and flight sources are semicolon separated without a header.
//! Graph files are line oriented: kmax, node count, then one edge per line.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::{Duration, NaiveTime};

use crate::error::{ExportError, SourceError};
use crate::geo::dms_to_decimal;
use crate::graph::Graph;
use crate::models::{Airport, Flight};
use crate::stats::GraphStats;

pub const AIRPORT_FIELDS: usize = 10;
pub const FLIGHT_FIELDS: usize = 6;

/// Header row of the statistics export.
pub const STATS_HEADER: &str = "nomduFichier;noeuds;arret;degres;nbComposantes;diametre;nbConflits";

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse airports keyed by code.
///
/// A record with the wrong number of fields aborts the load; a record with an
/// empty field is skipped. Later duplicates of a code replace earlier ones.
pub fn load_airports<R: Read>(reader: R) -> Result<HashMap<String, Airport>, SourceError> {
    let mut airports = HashMap::new();

    for (row, record) in csv_reader(reader).records().enumerate() {
        let record = record?;
        let line = record.position().map_or(row as u64 + 1, |p| p.line());

        if record.len() != AIRPORT_FIELDS {
            return Err(SourceError::MalformedSource {
                line,
                expected: AIRPORT_FIELDS,
                found: record.len(),
            });
        }
        if record.iter().any(str::is_empty) {
            tracing::warn!(line, "skipping airport record with empty fields");
            continue;
        }

        let latitude = dms_to_decimal(&record[2], &record[3], &record[4], &record[5])?;
        let longitude = dms_to_decimal(&record[6], &record[7], &record[8], &record[9])?;
        let airport = Airport::from_geo(&record[0], &record[1], latitude, longitude);
        airports.insert(airport.code.clone(), airport);
    }

    tracing::debug!(count = airports.len(), "airports loaded");
    Ok(airports)
}

pub fn load_airports_from_path(
    path: impl AsRef<Path>,
) -> Result<HashMap<String, Airport>, SourceError> {
    load_airports(BufReader::new(open(path.as_ref())?))
}

/// Parse flights in source order.
///
/// A record with the wrong number of fields aborts the load. Records with an
/// empty field, or with a departure time or length that does not parse, are
/// skipped with a warning.
pub fn load_flights<R: Read>(reader: R) -> Result<Vec<Flight>, SourceError> {
    let mut flights = Vec::new();

    for (row, record) in csv_reader(reader).records().enumerate() {
        let record = record?;
        let line = record.position().map_or(row as u64 + 1, |p| p.line());

        if record.len() != FLIGHT_FIELDS {
            return Err(SourceError::MalformedSource {
                line,
                expected: FLIGHT_FIELDS,
                found: record.len(),
            });
        }
        if record.iter().any(str::is_empty) {
            tracing::warn!(line, "skipping flight record with empty fields");
            continue;
        }

        let departure_time = record[3]
            .parse::<u32>()
            .ok()
            .zip(record[4].parse::<u32>().ok())
            .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0));
        let Some(departure_time) = departure_time else {
            tracing::warn!(
                line,
                flight = &record[0],
                "skipping flight with invalid departure time"
            );
            continue;
        };
        let Ok(length) = record[5].parse::<u32>() else {
            tracing::warn!(line, flight = &record[0], "skipping flight with invalid length");
            continue;
        };

        flights.push(Flight::new(
            &record[0],
            &record[1],
            &record[2],
            departure_time,
            Duration::minutes(i64::from(length)),
        ));
    }

    tracing::debug!(count = flights.len(), "flights loaded");
    Ok(flights)
}

pub fn load_flights_from_path(path: impl AsRef<Path>) -> Result<Vec<Flight>, SourceError> {
    load_flights(BufReader::new(open(path.as_ref())?))
}

/// Parse a graph file into a graph called `name`.
///
/// Nodes are created in order of first appearance. The node count on line 2
/// must be an integer but is not checked against the edges. Every later line,
/// blank ones included, must hold exactly two node ids.
pub fn load_graph<R: BufRead>(reader: R, name: &str) -> Result<Graph, SourceError> {
    let invalid = |line: usize, reason: String| SourceError::InvalidGraph { line, reason };
    let mut lines = reader.lines();

    let kmax_line = lines
        .next()
        .transpose()?
        .ok_or_else(|| invalid(1, "missing kmax".into()))?;
    let kmax = kmax_line
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&k| k >= 1)
        .ok_or_else(|| {
            invalid(1, format!("kmax must be an integer >= 1, got {:?}", kmax_line.trim()))
        })?;

    let count_line = lines
        .next()
        .transpose()?
        .ok_or_else(|| invalid(2, "missing node count".into()))?;
    count_line.trim().parse::<usize>().map_err(|_| {
        invalid(2, format!("node count is not an integer: {:?}", count_line.trim()))
    })?;

    let mut graph = Graph::new(name).with_kmax(kmax);
    for (offset, line) in lines.enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [a, b] => {
                graph.add_edge(a, b);
            }
            _ => {
                return Err(invalid(
                    offset + 3,
                    format!("expected 2 node ids, found {}", tokens.len()),
                ))
            }
        }
    }

    tracing::debug!(
        graph = name,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        kmax,
        "graph loaded"
    );
    Ok(graph)
}

/// Load a graph file, naming the graph after the file.
pub fn load_graph_from_path(path: impl AsRef<Path>) -> Result<Graph, SourceError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    load_graph(BufReader::new(open(path)?), &name)
}

/// Write `graph` in the graph file format. Requires a kmax.
///
/// Only edges are listed, so isolated nodes do not survive a reload.
pub fn write_graph<W: Write>(graph: &Graph, mut writer: W) -> Result<(), ExportError> {
    let kmax = graph
        .kmax()
        .ok_or_else(|| ExportError::MissingKmax(graph.name().to_string()))?;
    writeln!(writer, "{kmax}")?;
    writeln!(writer, "{}", graph.node_count())?;
    for (a, b) in graph.edges() {
        writeln!(writer, "{a} {b}")?;
    }
    Ok(())
}

/// Write one `"{id}; {color}"` line per node. Uncoloured nodes print `-1`.
pub fn write_coloring<W: Write>(graph: &Graph, mut writer: W) -> Result<(), ExportError> {
    for node in graph.nodes() {
        let color = node.color.map_or(-1, i64::from);
        writeln!(writer, "{}; {}", node.id, color)?;
    }
    Ok(())
}

/// Write one `"{file} ; {count}"` line per processed graph.
pub fn write_conflict_summary<W, S>(rows: &[(S, usize)], mut writer: W) -> Result<(), ExportError>
where
    W: Write,
    S: AsRef<str>,
{
    for (file_name, count) in rows {
        writeln!(writer, "{} ; {}", file_name.as_ref(), count)?;
    }
    Ok(())
}

/// Write the statistics header and a single data row.
pub fn write_stats<W: Write>(stats: &GraphStats, mut writer: W) -> Result<(), ExportError> {
    let diameter = stats
        .diameter
        .map_or_else(|| "inf".to_string(), |d| format!("{d:?}"));
    let conflicts = stats.conflicts.map(|c| c.to_string()).unwrap_or_default();

    writeln!(writer, "{STATS_HEADER}")?;
    writeln!(
        writer,
        "{};{};{};{:?};{};{};{}",
        stats.file_name,
        stats.node_count,
        stats.edge_count,
        stats.average_degree,
        stats.connected_components,
        diameter,
        conflicts
    )?;
    Ok(())
}

/// Create `path` and run `write` against a buffered handle on it, attaching
/// the path to any IO failure.
fn export_to<F>(path: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ExportError>,
{
    let with_path = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(with_path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).map_err(|err| match err {
        ExportError::Write(source) => with_path(source),
        other => other,
    })?;
    writer.flush().map_err(with_path)
}

pub fn export_graph(graph: &Graph, path: impl AsRef<Path>) -> Result<(), ExportError> {
    export_to(path.as_ref(), |w| write_graph(graph, w))
}

pub fn export_coloring(graph: &Graph, path: impl AsRef<Path>) -> Result<(), ExportError> {
    export_to(path.as_ref(), |w| write_coloring(graph, w))
}

pub fn export_conflict_summary<S: AsRef<str>>(
    rows: &[(S, usize)],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    export_to(path.as_ref(), |w| write_conflict_summary(rows, w))
}

pub fn export_stats(stats: &GraphStats, path: impl AsRef<Path>) -> Result<(), ExportError> {
    export_to(path.as_ref(), |w| write_stats(stats, w))
}
