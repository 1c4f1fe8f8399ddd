use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Birth date as supplied by a submission.
///
/// Form widgets hand over a calendar date, while imported or typed values
/// arrive as free text in whatever format the agent used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthDate {
    Date(NaiveDate),
    Text(String),
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<&str> for BirthDate {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for BirthDate {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Identity fields of one submitted fiche, as handed to the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub family_name: String,
    pub given_names: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<BirthDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
}

impl CandidateRecord {
    pub fn new(family_name: impl Into<String>, given_names: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            given_names: given_names.into(),
            birth_date: None,
            birth_place: None,
        }
    }

    #[must_use]
    pub fn with_birth_date(mut self, birth_date: impl Into<BirthDate>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    #[must_use]
    pub fn with_birth_place(mut self, birth_place: impl Into<String>) -> Self {
        self.birth_place = Some(birth_place.into());
        self
    }

    /// Name as the application shows it in banners ("given family").
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_names.trim(), self.family_name.trim())
            .trim()
            .to_string()
    }
}
