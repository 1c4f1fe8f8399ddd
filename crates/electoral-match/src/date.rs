//! Birth date formatting for the candidate side of a comparison.
//!
//! The roll stores birth dates as `dd/mm/yyyy` text and is compared verbatim;
//! only the submitted date is reshaped to that form.

use chrono::NaiveDate;

use electoral_model::BirthDate;

const ROLL_DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a submitted birth date the way the roll writes dates.
///
/// - calendar dates become `dd/mm/yyyy`
/// - text already containing `/` is kept as is
/// - `yyyy-mm-dd` text is reparsed and reformatted
/// - anything else is kept as is
///
/// An empty result means no birth date was supplied.
pub fn normalize_birth_date(date: &BirthDate) -> String {
    match date {
        BirthDate::Date(date) => date.format(ROLL_DATE_FORMAT).to_string(),
        BirthDate::Text(text) if text.is_empty() || text.contains('/') => text.clone(),
        BirthDate::Text(text) => NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
            .map(|date| date.format(ROLL_DATE_FORMAT).to_string())
            .unwrap_or_else(|_| text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_value_is_formatted() {
        let date = NaiveDate::from_ymd_opt(1993, 1, 1).unwrap();
        assert_eq!(normalize_birth_date(&BirthDate::Date(date)), "01/01/1993");
    }

    #[test]
    fn test_slash_text_passes_through() {
        assert_eq!(normalize_birth_date(&"01/01/1993".into()), "01/01/1993");
        assert_eq!(normalize_birth_date(&"1/1/93".into()), "1/1/93");
    }

    #[test]
    fn test_iso_text_is_reformatted() {
        assert_eq!(normalize_birth_date(&"1993-01-31".into()), "31/01/1993");
    }

    #[test]
    fn test_invalid_iso_text_passes_through() {
        assert_eq!(normalize_birth_date(&"1993-02-30".into()), "1993-02-30");
        assert_eq!(normalize_birth_date(&"vers 1960".into()), "vers 1960");
    }

    #[test]
    fn test_empty_text_means_not_supplied() {
        assert_eq!(normalize_birth_date(&"".into()), "");
    }
}
