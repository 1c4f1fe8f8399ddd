//! Error types for electoral roll ingestion.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::encoding::SourceEncoding;

/// One failed attempt to decode the reference file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    pub encoding: SourceEncoding,
    pub reason: String,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.encoding, self.reason)
    }
}

/// Errors that make the whole reference dataset unavailable.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reference file not found.
    #[error("reference file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the reference file.
    #[error("failed to read reference file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every encoding in the fallback list failed.
    #[error("could not decode {path} with any supported encoding ({})", join_failures(.failures))]
    Undecodable {
        path: PathBuf,
        failures: Vec<DecodeFailure>,
    },

    /// The file has no header row.
    #[error("reference file is empty: {path}")]
    EmptyDataset { path: PathBuf },

    /// The header row itself could not be parsed.
    #[error("failed to parse header row of {path}: {message}")]
    HeaderParse { path: PathBuf, message: String },

    /// The source did not produce a dataset for another reason.
    #[error("reference source unavailable: {message}")]
    Unavailable { message: String },
}

fn join_failures(failures: &[DecodeFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Anomaly confined to a single row; scanning continues past it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("malformed row at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl RowError {
    pub(crate) fn from_csv(err: &csv::Error, fallback_line: u64) -> Self {
        let line = err
            .position()
            .map_or(fallback_line, csv::Position::line);
        Self::Malformed {
            line,
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
