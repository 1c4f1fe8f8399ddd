//! Decides whether a candidate already appears in the electoral roll.
//!
//! Rows are scanned in file order. A row is a name-candidate when both the
//! normalized family name and the normalized given names are equal to the
//! candidate's. Birth date and birth place then act as filters: they reject a
//! name-candidate only when the value is present on both sides and disagrees.
//! The first name-candidate surviving the filters is the match.

use serde::Serialize;
use tracing::{debug, debug_span, error, warn};

use electoral_ingest::{RawRow, ReferenceSource};
use electoral_model::{CandidateRecord, MatchVerdict, MatchedVoter, columns};

use crate::REDACTED_VALUE;
use crate::count::count_rows;
use crate::date::normalize_birth_date;
use crate::normalize::{normalize, normalize_opt};

/// Roll placeholder for an unknown birth date or birth place.
const UNKNOWN: &str = "INCONNU";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Include names, dates and places in log events.
    pub log_personal_data: bool,
}

/// Counters collected during one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub rows_scanned: usize,
    pub malformed_rows: usize,
    pub name_candidates: usize,
    pub rejected_by_birth_date: usize,
    pub rejected_by_birth_place: usize,
}

/// Candidate fields reduced to comparison keys.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CandidateKey {
    family_name: String,
    given_names: String,
    birth_date: String,
    birth_place: String,
}

impl CandidateKey {
    fn new(candidate: &CandidateRecord) -> Self {
        Self {
            family_name: normalize(&candidate.family_name),
            given_names: normalize(&candidate.given_names),
            birth_date: candidate
                .birth_date
                .as_ref()
                .map(normalize_birth_date)
                .unwrap_or_default(),
            birth_place: normalize_opt(candidate.birth_place.as_deref()),
        }
    }

    fn names_match(&self, row: &RawRow<'_>) -> Option<bool> {
        let family = row.get(columns::FAMILY_NAME)?;
        let given = row.get(columns::GIVEN_NAMES)?;
        Some(normalize(family) == self.family_name && normalize(given) == self.given_names)
    }

    fn filter(&self, row: &RawRow<'_>) -> FilterOutcome {
        let roll_date = row.get(columns::BIRTH_DATE).unwrap_or_default().trim();
        let date_applies = !self.birth_date.is_empty()
            && !roll_date.is_empty()
            && !roll_date.eq_ignore_ascii_case(UNKNOWN);
        if date_applies && self.birth_date != roll_date {
            return FilterOutcome::BirthDateMismatch;
        }

        let roll_place = normalize_opt(row.get(columns::BIRTH_PLACE));
        let place_applies =
            !self.birth_place.is_empty() && !roll_place.is_empty() && roll_place != UNKNOWN;
        if place_applies
            && !roll_place.contains(self.birth_place.as_str())
            && !self.birth_place.contains(roll_place.as_str())
        {
            return FilterOutcome::BirthPlaceMismatch;
        }

        FilterOutcome::Accepted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterOutcome {
    Accepted,
    BirthDateMismatch,
    BirthPlaceMismatch,
}

/// Checks candidates against a reference source.
///
/// Each check loads the source and scans it from the start; no state is kept
/// between checks beyond what the source itself caches.
#[derive(Debug)]
pub struct ReferenceMatcher<S> {
    source: S,
    options: MatcherOptions,
}

impl<S: ReferenceSource> ReferenceMatcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: MatcherOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MatcherOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Checks one candidate. Never fails: an unreadable roll yields
    /// [`MatchVerdict::SourceUnavailable`].
    pub fn check(&self, candidate: &CandidateRecord) -> MatchVerdict {
        self.check_with_stats(candidate).0
    }

    /// Like [`ReferenceMatcher::check`], also returning scan counters.
    pub fn check_with_stats(&self, candidate: &CandidateRecord) -> (MatchVerdict, ScanStats) {
        let span = debug_span!("reference_check", source = %self.source.describe());
        let _guard = span.enter();

        let key = CandidateKey::new(candidate);
        debug!(
            family_name = self.redact(&key.family_name),
            given_names = self.redact(&key.given_names),
            birth_date = self.redact(&key.birth_date),
            birth_place = self.redact(&key.birth_place),
            "normalized candidate"
        );

        let mut stats = ScanStats::default();
        let dataset = match self.source.load() {
            Ok(dataset) => dataset,
            Err(err) => {
                error!(error = %err, "reference dataset unavailable");
                return (MatchVerdict::source_unavailable(err.to_string()), stats);
            }
        };

        for row in dataset.rows() {
            stats.rows_scanned += 1;
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    stats.malformed_rows += 1;
                    warn!(error = %err, "skipping malformed reference row");
                    continue;
                }
            };

            match key.names_match(&row) {
                Some(true) => {}
                Some(false) => continue,
                None => {
                    // Absent name columns were reported when the file was loaded.
                    stats.malformed_rows += 1;
                    continue;
                }
            }
            stats.name_candidates += 1;

            match key.filter(&row) {
                FilterOutcome::Accepted => {}
                FilterOutcome::BirthDateMismatch => {
                    stats.rejected_by_birth_date += 1;
                    debug!(
                        line = row.line(),
                        candidate = self.redact(&key.birth_date),
                        roll = self.redact(row.get(columns::BIRTH_DATE).unwrap_or_default()),
                        "name matches but birth date differs"
                    );
                    continue;
                }
                FilterOutcome::BirthPlaceMismatch => {
                    stats.rejected_by_birth_place += 1;
                    debug!(
                        line = row.line(),
                        candidate = self.redact(&key.birth_place),
                        roll = self.redact(row.get(columns::BIRTH_PLACE).unwrap_or_default()),
                        "name matches but birth place differs"
                    );
                    continue;
                }
            }

            match row.to_reference_row() {
                Ok(reference) => {
                    let voter = MatchedVoter::from(reference);
                    debug!(
                        line = row.line(),
                        voter_number = self.redact(&voter.voter_number),
                        rows_scanned = stats.rows_scanned,
                        "candidate found in electoral roll"
                    );
                    return (MatchVerdict::Found(voter), stats);
                }
                Err(err) => {
                    stats.malformed_rows += 1;
                    warn!(line = row.line(), error = %err, "skipping incomplete reference row");
                }
            }
        }

        debug!(
            rows_scanned = stats.rows_scanned,
            malformed_rows = stats.malformed_rows,
            name_candidates = stats.name_candidates,
            rejected_by_birth_date = stats.rejected_by_birth_date,
            rejected_by_birth_place = stats.rejected_by_birth_place,
            "candidate not found in electoral roll"
        );
        (MatchVerdict::NotFound, stats)
    }

    /// Number of roll entries with both a family name and given names.
    ///
    /// Returns 0 when the roll cannot be read.
    pub fn count_reference_entries(&self) -> usize {
        match self.source.load() {
            Ok(dataset) => count_rows(&dataset),
            Err(err) => {
                error!(error = %err, "cannot count reference entries");
                0
            }
        }
    }

    fn redact<'a>(&self, value: &'a str) -> &'a str {
        if self.options.log_personal_data {
            value
        } else {
            REDACTED_VALUE
        }
    }
}
