//! Electoral roll ingestion.
//!
//! This crate opens the reference file that fiches are checked against and
//! exposes it as a lazy sequence of header-keyed rows.
//!
//! # Features
//!
//! - **Encoding fallback**: UTF-8 first, then legacy 8-bit encodings
//! - **Delimiter detection**: semicolon, tab or comma from a leading sample
//! - **Lazy rows**: rows are parsed on demand; a malformed row never ends a scan
//! - **Sources**: a file source configured explicitly, and an optional cache
//!
//! # Example
//!
//! ```ignore
//! use electoral_ingest::{FileSource, ReferenceSource, SourceConfig};
//!
//! let source = FileSource::new(SourceConfig::new("data/sous_prefectures_selection.csv"));
//! let dataset = source.load()?;
//! for row in dataset.rows() {
//!     let row = row?;
//!     println!("{:?}", row.get("Numero Electeur"));
//! }
//! ```

mod cache;
mod dataset;
mod delimiter;
mod encoding;
mod error;
mod preview;
mod source;

// === Error Types ===
pub use error::{DecodeFailure, IngestError, Result, RowError};

// === Decoding ===
pub use delimiter::{DELIMITER_SAMPLE_CHARS, Delimiter, detect_delimiter};
pub use encoding::{ENCODING_FALLBACK, SourceEncoding, decode_with_fallback};

// === Dataset ===
pub use dataset::{RawRow, ReferenceDataset, Rows};

// === Sources ===
pub use cache::CachedSource;
pub use preview::{DatasetPreview, preview};
pub use source::{FileSource, ReferenceSource, SourceConfig};
