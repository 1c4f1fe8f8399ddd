//! Quick look at a reference source, used to diagnose ingestion problems.

use std::path::PathBuf;

use serde::Serialize;

use crate::delimiter::Delimiter;
use crate::encoding::SourceEncoding;
use crate::error::Result;
use crate::source::ReferenceSource;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetPreview {
    pub path: PathBuf,
    pub encoding: SourceEncoding,
    pub delimiter: Delimiter,
    pub headers: Vec<String>,
    pub missing_columns: Vec<&'static str>,
    /// Leading rows; malformed rows are replaced by their error message.
    pub rows: Vec<Vec<String>>,
}

/// Loads `source` and collects its first `limit` rows.
pub fn preview(source: &dyn ReferenceSource, limit: usize) -> Result<DatasetPreview> {
    let dataset = source.load()?;
    let rows = dataset
        .rows()
        .take(limit)
        .map(|row| match row {
            Ok(row) => row.values().map(str::to_string).collect(),
            Err(err) => vec![err.to_string()],
        })
        .collect();

    Ok(DatasetPreview {
        path: dataset.path().to_path_buf(),
        encoding: dataset.encoding(),
        delimiter: dataset.delimiter(),
        headers: dataset.headers().to_vec(),
        missing_columns: dataset.missing_columns(),
        rows,
    })
}
