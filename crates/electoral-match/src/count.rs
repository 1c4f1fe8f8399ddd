//! Size of the electoral roll, shown next to the fiche form.

use electoral_ingest::{ReferenceDataset, ReferenceSource};
use electoral_model::columns;

/// Counts roll entries whose family name and given names are both non-blank.
///
/// Uses the same ingestion path as the matcher. Returns 0 when the roll
/// cannot be read; malformed rows are not counted.
pub fn count_reference_entries(source: &dyn ReferenceSource) -> usize {
    match source.load() {
        Ok(dataset) => {
            let count = count_rows(&dataset);
            tracing::debug!(source = %source.describe(), count, "counted reference entries");
            count
        }
        Err(err) => {
            tracing::error!(error = %err, "cannot count reference entries");
            0
        }
    }
}

pub(crate) fn count_rows(dataset: &ReferenceDataset) -> usize {
    let non_blank = |value: Option<&str>| value.is_some_and(|v| !v.trim().is_empty());
    dataset
        .rows()
        .filter_map(Result::ok)
        .filter(|row| {
            non_blank(row.get(columns::FAMILY_NAME)) && non_blank(row.get(columns::GIVEN_NAMES))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use electoral_ingest::SourceEncoding;

    use super::*;

    #[test]
    fn test_blank_names_are_not_counted() {
        let dataset = ReferenceDataset::from_text(
            "roll.csv",
            "Nom/Nom de Jeune Fille;Prenoms\nABA;MICHEL\n  ;LEA\nKONE;\nDIALLO;AWA\n;\n"
                .to_string(),
            SourceEncoding::Utf8,
        )
        .unwrap();
        assert_eq!(count_rows(&dataset), 2);
    }
}
