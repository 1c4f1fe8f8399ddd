//! Decoded reference dataset and its lazy row iterator.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};

use electoral_model::{ReferenceRow, columns};

use crate::delimiter::{Delimiter, detect_delimiter};
use crate::encoding::SourceEncoding;
use crate::error::{IngestError, Result, RowError};

/// A fully decoded snapshot of the reference file.
///
/// Rows are not materialized up front; [`ReferenceDataset::rows`] parses them
/// on demand, so every scan starts from the first data row.
#[derive(Debug)]
pub struct ReferenceDataset {
    path: PathBuf,
    text: String,
    encoding: SourceEncoding,
    delimiter: Delimiter,
    headers: Vec<String>,
    index: HashMap<String, usize>,
}

impl ReferenceDataset {
    /// Parses the header row of already-decoded text.
    pub fn from_text(
        path: impl Into<PathBuf>,
        text: String,
        encoding: SourceEncoding,
    ) -> Result<Self> {
        let path = path.into();
        let text = match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        };
        let delimiter = detect_delimiter(&text);

        let headers: Vec<String> = {
            let mut reader = reader_builder(delimiter).from_reader(text.as_bytes());
            reader
                .headers()
                .map_err(|e| IngestError::HeaderParse {
                    path: path.clone(),
                    message: e.to_string(),
                })?
                .iter()
                .map(str::to_string)
                .collect()
        };
        if headers.iter().all(String::is_empty) {
            return Err(IngestError::EmptyDataset { path });
        }

        // Duplicate header names resolve to the last occurrence.
        let index = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        let dataset = Self {
            path,
            text,
            encoding,
            delimiter,
            headers,
            index,
        };
        let missing = dataset.missing_columns();
        if !missing.is_empty() {
            tracing::warn!(
                path = %dataset.path.display(),
                missing = ?missing,
                "reference file lacks recognized columns"
            );
        }
        Ok(dataset)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Recognized columns that the header row does not contain.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        columns::ALL
            .into_iter()
            .filter(|column| !self.index.contains_key(*column))
            .collect()
    }

    /// Iterates over data rows in file order.
    pub fn rows(&self) -> Rows<'_> {
        let reader = reader_builder(self.delimiter).from_reader(self.text.as_bytes());
        Rows {
            records: reader.into_records(),
            index: &self.index,
            last_line: 1,
        }
    }
}

fn reader_builder(delimiter: Delimiter) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers);
    builder
}

/// Lazy iterator over the data rows of a [`ReferenceDataset`].
pub struct Rows<'a> {
    records: StringRecordsIntoIter<&'a [u8]>,
    index: &'a HashMap<String, usize>,
    last_line: u64,
}

impl<'a> Iterator for Rows<'a> {
    type Item = std::result::Result<RawRow<'a>, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(match record {
            Ok(record) => {
                let line = record
                    .position()
                    .map_or(self.last_line + 1, csv::Position::line);
                self.last_line = line;
                Ok(RawRow {
                    record,
                    index: self.index,
                    line,
                })
            }
            Err(err) => {
                self.last_line += 1;
                Err(RowError::from_csv(&err, self.last_line))
            }
        })
    }
}

/// One data row, addressed by header name.
#[derive(Debug, Clone)]
pub struct RawRow<'a> {
    record: StringRecord,
    index: &'a HashMap<String, usize>,
    line: u64,
}

impl RawRow<'_> {
    /// Value of `column`.
    ///
    /// `None` when the header row has no such column. A row shorter than the
    /// header yields an empty value for the trailing columns.
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = *self.index.get(column)?;
        Some(self.record.get(idx).unwrap_or_default())
    }

    /// Line of the file this row starts on.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.record.iter()
    }

    pub fn to_reference_row(&self) -> electoral_model::Result<ReferenceRow> {
        ReferenceRow::from_lookup(|column| self.get(column))
    }
}
