//! Field delimiter detection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of leading characters inspected to choose a delimiter.
pub const DELIMITER_SAMPLE_CHARS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    #[default]
    Semicolon,
    Tab,
    Comma,
}

impl Delimiter {
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Semicolon => b';',
            Self::Tab => b'\t',
            Self::Comma => b',',
        }
    }

    pub const fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Semicolon => f.write_str("';'"),
            Self::Tab => f.write_str("'\\t'"),
            Self::Comma => f.write_str("','"),
        }
    }
}

/// Picks the delimiter from the first [`DELIMITER_SAMPLE_CHARS`] characters.
///
/// Semicolon wins whenever it appears. Tab, then comma, are chosen only when
/// the sample contains no semicolon at all.
pub fn detect_delimiter(text: &str) -> Delimiter {
    let sample_end = text
        .char_indices()
        .nth(DELIMITER_SAMPLE_CHARS)
        .map_or(text.len(), |(idx, _)| idx);
    let sample = &text[..sample_end];

    if sample.contains(';') {
        Delimiter::Semicolon
    } else if sample.contains('\t') {
        Delimiter::Tab
    } else if sample.contains(',') {
        Delimiter::Comma
    } else {
        Delimiter::Semicolon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_only_sample() {
        assert_eq!(detect_delimiter("Nom\tPrenoms\nABA\tMICHEL\n"), Delimiter::Tab);
    }

    #[test]
    fn test_semicolon_always_wins() {
        assert_eq!(
            detect_delimiter("Nom;Prenoms\tX,Y\nABA;MICHEL\n"),
            Delimiter::Semicolon
        );
    }

    #[test]
    fn test_comma_without_semicolon() {
        assert_eq!(detect_delimiter("Nom,Prenoms\nABA,MICHEL\n"), Delimiter::Comma);
    }

    #[test]
    fn test_tab_preferred_over_comma() {
        assert_eq!(detect_delimiter("Nom\tAdresse\nABA\tRue 1, Danane\n"), Delimiter::Tab);
    }

    #[test]
    fn test_ambiguous_defaults_to_semicolon() {
        assert_eq!(detect_delimiter("Nom\n"), Delimiter::Semicolon);
        assert_eq!(detect_delimiter(""), Delimiter::Semicolon);
    }

    #[test]
    fn test_only_leading_sample_is_inspected() {
        let mut text = "a,".repeat(DELIMITER_SAMPLE_CHARS);
        text.push(';');
        assert_eq!(detect_delimiter(&text), Delimiter::Comma);
    }
}
