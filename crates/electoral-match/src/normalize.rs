//! Canonical comparison keys for human-entered text.

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Maps `text` to the key used for every name and place comparison.
///
/// Accents are removed by decomposing to NFD and dropping nonspacing marks,
/// then the text is upper-cased and trimmed. Never displayed.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| c.general_category() != GeneralCategory::NonspacingMark)
        .collect();
    stripped.to_uppercase().trim().to_string()
}

/// [`normalize`] for optional values; `None` yields an empty key.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_accents() {
        assert_eq!(normalize("Émile"), "EMILE");
        assert_eq!(normalize("Danané"), "DANANE");
        assert_eq!(normalize("Kouan-Houlé"), "KOUAN-HOULE");
        assert_eq!(normalize("Gbon-Houyé"), "GBON-HOUYE");
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize(" jean "), normalize("JEAN"));
        assert_eq!(normalize("\tKoné Awa\n"), "KONE AWA");
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some(" léa ")), "LEA");
    }

    #[test]
    fn test_already_decomposed_input() {
        assert_eq!(normalize("E\u{301}mile"), "EMILE");
    }

    #[test]
    fn test_spacing_marks_are_kept() {
        // U+0903 DEVANAGARI SIGN VISARGA is a spacing combining mark.
        assert_eq!(normalize("\u{915}\u{903}"), "\u{915}\u{903}");
    }

    proptest! {
        #[test]
        fn prop_idempotent(text in "[a-zA-Z\u{c0}-\u{17f} '\\-]{0,32}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_ignores_case_and_padding(text in "[a-zA-Z\u{c0}-\u{17f}]{0,16}", pad in " {0,3}") {
            let padded = format!("{pad}{}{pad}", text.to_lowercase());
            prop_assert_eq!(normalize(&padded), normalize(&text.to_uppercase()));
        }
    }
}
