//! Where reference datasets come from.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::dataset::ReferenceDataset;
use crate::encoding::{ENCODING_FALLBACK, SourceEncoding, decode_with_fallback};
use crate::error::{IngestError, Result};

/// Provides a read-only snapshot of the electoral roll.
///
/// Implementations block on I/O. Callers on latency-sensitive paths should
/// go through a worker thread.
pub trait ReferenceSource: Send + Sync {
    /// Loads the current snapshot.
    fn load(&self) -> Result<Arc<ReferenceDataset>>;

    /// Human-readable description for diagnostics.
    fn describe(&self) -> String;

    /// Version marker of the underlying data, when the source has one.
    ///
    /// Caches compare this value to detect external updates.
    fn stamp(&self) -> Option<SystemTime> {
        None
    }
}

impl<S: ReferenceSource + ?Sized> ReferenceSource for Arc<S> {
    fn load(&self) -> Result<Arc<ReferenceDataset>> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn stamp(&self) -> Option<SystemTime> {
        (**self).stamp()
    }
}

/// Location and decoding options of the reference file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: PathBuf,
    #[serde(default = "default_encodings")]
    pub encodings: Vec<SourceEncoding>,
}

fn default_encodings() -> Vec<SourceEncoding> {
    ENCODING_FALLBACK.to_vec()
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encodings: default_encodings(),
        }
    }

    #[must_use]
    pub fn with_encodings(mut self, encodings: Vec<SourceEncoding>) -> Self {
        self.encodings = encodings;
        self
    }
}

/// Reads the reference file from disk on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    config: SourceConfig,
}

impl FileSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn io_error(&self, err: std::io::Error) -> IngestError {
        if err.kind() == ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: self.config.path.clone(),
            }
        } else {
            IngestError::FileRead {
                path: self.config.path.clone(),
                source: err,
            }
        }
    }
}

impl ReferenceSource for FileSource {
    fn load(&self) -> Result<Arc<ReferenceDataset>> {
        let path = &self.config.path;
        let bytes = fs::read(path).map_err(|e| self.io_error(e))?;
        let (text, encoding) = decode_with_fallback(&bytes, &self.config.encodings)
            .map_err(|failures| IngestError::Undecodable {
                path: path.clone(),
                failures,
            })?;
        let dataset = ReferenceDataset::from_text(path.clone(), text, encoding)?;
        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            encoding = %dataset.encoding(),
            delimiter = %dataset.delimiter(),
            columns = dataset.headers().len(),
            "reference file loaded"
        );
        Ok(Arc::new(dataset))
    }

    fn describe(&self) -> String {
        self.config.path.display().to_string()
    }

    fn stamp(&self) -> Option<SystemTime> {
        fs::metadata(&self.config.path)
            .and_then(|meta| meta.modified())
            .ok()
    }
}
