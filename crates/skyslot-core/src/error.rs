//! Error types shared by the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// A degree/minute/second coordinate that cannot be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("coordinate component `{0}` is missing")]
    Missing(&'static str),
    #[error("coordinate component `{component}` is not a number: {value:?}")]
    NotNumeric {
        component: &'static str,
        value: String,
    },
    #[error("direction must be one of N, S, E, O, got {0:?}")]
    Direction(String),
}

/// A flight references an airport that was never loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("flight {flight} references unknown airport {code}")]
    UnknownAirport { flight: String, code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColoringError {
    #[error("kmax must be at least 1, got {0}")]
    InvalidKmax(u32),
    #[error("graph has no kmax")]
    MissingKmax,
    #[error("colouring cancelled")]
    Cancelled,
}

/// Failure while reading an airport, flight or graph source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedSource {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    #[error("line {line}: {reason}")]
    InvalidGraph { line: usize, reason: String },
}

/// Failure while writing a result artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Write(#[from] std::io::Error),
    #[error("graph {0} has no kmax")]
    MissingKmax(String),
}
