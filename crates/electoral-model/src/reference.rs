use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{ModelError, Result};

/// One registered person as listed in the electoral roll.
///
/// Values are kept exactly as they appear in the file; comparison keys are
/// derived by the matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub family_name: String,
    pub given_names: String,
    pub voter_number: String,
    pub sex: String,
    pub birth_date: String,
    pub birth_place: String,
    pub commune: String,
    pub polling_place: String,
    pub polling_bureau: String,
    pub profession: String,
    pub address: String,
}

impl ReferenceRow {
    /// Builds a row from a column-name lookup.
    ///
    /// Optional columns that are absent read as empty strings. The two name
    /// columns are required.
    pub fn from_lookup<'a, F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let required = |column: &'static str| {
            lookup(column)
                .map(str::to_string)
                .ok_or(ModelError::MissingColumn { column })
        };
        let optional = |column: &str| lookup(column).unwrap_or_default().to_string();

        Ok(Self {
            family_name: required(columns::FAMILY_NAME)?,
            given_names: required(columns::GIVEN_NAMES)?,
            voter_number: optional(columns::VOTER_NUMBER),
            sex: optional(columns::SEX),
            birth_date: optional(columns::BIRTH_DATE),
            birth_place: optional(columns::BIRTH_PLACE),
            commune: optional(columns::COMMUNE),
            polling_place: optional(columns::POLLING_PLACE),
            polling_bureau: optional(columns::POLLING_BUREAU),
            profession: optional(columns::PROFESSION),
            address: optional(columns::ADDRESS),
        })
    }
}
