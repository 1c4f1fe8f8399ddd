//! Integration tests for loading reference files from disk.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use electoral_ingest::{
    CachedSource, Delimiter, FileSource, IngestError, ReferenceSource, SourceConfig,
    SourceEncoding, preview,
};
use tempfile::TempDir;

fn write_roll(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write roll");
    path
}

#[test]
fn tab_separated_roll_is_detected() {
    let dir = TempDir::new().unwrap();
    let path = write_roll(
        &dir,
        "roll.tsv",
        b"Nom/Nom de Jeune Fille\tPrenoms\tNumero Electeur\nABA\tMICHEL\tCI00123\n",
    );
    let source = FileSource::new(SourceConfig::new(&path));
    let dataset = source.load().expect("load roll");

    assert_eq!(dataset.delimiter(), Delimiter::Tab);
    let row = dataset.rows().next().unwrap().unwrap();
    assert_eq!(row.get("Numero Electeur"), Some("CI00123"));
}

#[test]
fn quoted_fields_may_contain_the_delimiter() {
    let dir = TempDir::new().unwrap();
    let path = write_roll(
        &dir,
        "roll.csv",
        b"Nom/Nom de Jeune Fille;Prenoms;Adresse Physique\nABA;MICHEL;\"Quartier 1; Danane\"\n",
    );
    let dataset = FileSource::new(SourceConfig::new(&path)).load().unwrap();
    let row = dataset.rows().next().unwrap().unwrap();
    assert_eq!(row.get("Adresse Physique"), Some("Quartier 1; Danane"));
}

#[test]
fn empty_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = write_roll(&dir, "empty.csv", b"");
    let err = FileSource::new(SourceConfig::new(&path)).load().unwrap_err();
    assert!(matches!(err, IngestError::EmptyDataset { .. }));
}

#[test]
fn cached_source_picks_up_replaced_file() {
    let dir = TempDir::new().unwrap();
    let path = write_roll(&dir, "roll.csv", b"Nom/Nom de Jeune Fille;Prenoms\nABA;MICHEL\n");
    let cache = CachedSource::new(
        FileSource::new(SourceConfig::new(&path)),
        Duration::from_secs(3600),
    );
    let first = cache.load().unwrap();
    assert_eq!(first.rows().count(), 1);

    cache.invalidate();
    fs::write(&path, b"Nom/Nom de Jeune Fille;Prenoms\nABA;MICHEL\nKONE;LEA\n").unwrap();
    let second = cache.load().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.rows().count(), 2);
}

#[test]
fn preview_reports_layout_and_leading_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_roll(
        &dir,
        "roll.csv",
        "Nom/Nom de Jeune Fille,Prenoms\nABA,MICHEL\nKONÉ,LÉA\nDIALLO,AWA\n".as_bytes(),
    );
    let source = FileSource::new(SourceConfig::new(&path));
    let preview = preview(&source, 2).expect("preview");

    assert_eq!(preview.encoding, SourceEncoding::Utf8);
    assert_eq!(preview.delimiter, Delimiter::Comma);
    assert_eq!(preview.headers, vec!["Nom/Nom de Jeune Fille", "Prenoms"]);
    assert_eq!(preview.rows.len(), 2);
    assert_eq!(preview.rows[1], vec!["KONÉ", "LÉA"]);
    assert!(preview.missing_columns.contains(&"Numero Electeur"));
}
