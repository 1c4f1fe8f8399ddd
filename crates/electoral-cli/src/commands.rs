//! Command implementations shared by the `electoral` binary and its tests.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use electoral_ingest::{CachedSource, DatasetPreview, FileSource, ReferenceSource, preview};
use electoral_match::{ReferenceMatcher, check_with_timeout, count_reference_entries};
use electoral_model::{CandidateRecord, MatchVerdict, Notification, RegistrationStatus};

use crate::settings::Settings;

/// Identity fields and card number typed on a fiche.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub family_name: String,
    pub given_names: String,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub card_number: Option<String>,
}

impl CheckRequest {
    pub fn candidate(&self) -> CandidateRecord {
        let mut candidate = CandidateRecord::new(&self.family_name, &self.given_names);
        if let Some(date) = self.birth_date.as_deref() {
            candidate = candidate.with_birth_date(date);
        }
        if let Some(place) = self.birth_place.as_deref() {
            candidate = candidate.with_birth_place(place);
        }
        candidate
    }
}

/// Everything the application records and shows after checking a fiche.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub candidate: CandidateRecord,
    pub verdict: MatchVerdict,
    pub status: RegistrationStatus,
    /// Card number to store on the fiche, filled from the roll when blank.
    pub card_number: Option<String>,
    pub notification: Notification,
    pub elapsed_ms: u128,
}

impl CheckReport {
    /// Process exit code: 2 when the roll could not be consulted.
    pub fn exit_code(&self) -> i32 {
        if self.verdict.is_determined() { 0 } else { 2 }
    }
}

/// Builds the configured roll source, cached when a time-to-live is set.
pub fn build_source(settings: &Settings) -> Arc<dyn ReferenceSource> {
    let source = FileSource::new(settings.source_config());
    match settings.cache_ttl() {
        Some(ttl) => Arc::new(CachedSource::new(source, ttl)),
        None => Arc::new(source),
    }
}

pub fn run_check(settings: &Settings, request: &CheckRequest) -> CheckReport {
    let source = build_source(settings);
    let span = info_span!("check", source = %source.describe());
    let _guard = span.enter();

    let matcher =
        Arc::new(ReferenceMatcher::new(source).with_options(settings.matcher_options()));
    let candidate = request.candidate();
    let start = Instant::now();
    let verdict = check_with_timeout(&matcher, &candidate, settings.timeout());
    let elapsed_ms = start.elapsed().as_millis();

    let status = RegistrationStatus::from_verdict(&verdict);
    let card_number = status.card_number(request.card_number.as_deref());
    let notification = verdict.notification(&candidate.display_name());
    info!(
        found = verdict.is_found(),
        determined = verdict.is_determined(),
        elapsed_ms,
        "check complete"
    );

    CheckReport {
        candidate,
        verdict,
        status,
        card_number,
        notification,
        elapsed_ms,
    }
}

/// Number of usable roll entries; 0 when the roll cannot be read.
pub fn run_count(settings: &Settings) -> usize {
    let source = build_source(settings);
    let count = count_reference_entries(source.as_ref());
    info!(count, source = %source.describe(), "counted reference entries");
    count
}

pub fn run_inspect(settings: &Settings, rows: usize) -> Result<DatasetPreview> {
    let source = build_source(settings);
    preview(source.as_ref(), rows)
        .with_context(|| format!("inspect {}", source.describe()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_request() {
        let request = CheckRequest {
            family_name: "ABA".to_string(),
            given_names: "MICHEL".to_string(),
            birth_date: Some("1993-01-01".to_string()),
            birth_place: None,
            card_number: None,
        };
        let candidate = request.candidate();
        assert_eq!(candidate.display_name(), "MICHEL ABA");
        assert!(candidate.birth_date.is_some());
        assert!(candidate.birth_place.is_none());
    }

    #[test]
    fn test_missing_roll_is_unavailable() {
        let mut settings = Settings::default();
        settings.reference.path = "/nonexistent/roll.csv".into();
        let report = run_check(
            &settings,
            &CheckRequest {
                family_name: "ABA".to_string(),
                given_names: "MICHEL".to_string(),
                ..CheckRequest::default()
            },
        );
        assert!(!report.verdict.is_determined());
        assert_eq!(report.exit_code(), 2);
        assert!(!report.status.determined);
        assert_eq!(run_count(&settings), 0);
        assert!(run_inspect(&settings, 5).is_err());
    }
}
