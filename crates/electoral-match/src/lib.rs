//! Electoral roll matching engine.
//!
//! Given the identity fields of a submitted fiche, decide whether the person
//! already appears in the electoral roll and, if so, which roll entry they
//! correspond to.
//!
//! # Example
//!
//! ```ignore
//! use electoral_ingest::{FileSource, SourceConfig};
//! use electoral_match::ReferenceMatcher;
//! use electoral_model::CandidateRecord;
//!
//! let matcher = ReferenceMatcher::new(FileSource::new(SourceConfig::new("roll.csv")));
//! let verdict = matcher.check(&CandidateRecord::new("ABA", "MICHEL"));
//! ```

pub mod count;
pub mod date;
pub mod matcher;
pub mod normalize;
pub mod timeout;

pub use count::count_reference_entries;
pub use date::normalize_birth_date;
pub use matcher::{MatcherOptions, ReferenceMatcher, ScanStats};
pub use normalize::{normalize, normalize_opt};
pub use timeout::check_with_timeout;

/// Placeholder logged instead of personal data unless explicitly enabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";
