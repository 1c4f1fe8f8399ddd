use serde::{Deserialize, Serialize};

use crate::verdict::MatchVerdict;

/// What the application stores alongside a fiche once it has been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStatus {
    /// Person appears in the electoral roll.
    pub already_registered: bool,
    /// Voter number found in the roll, when the roll lists one.
    pub voter_number: Option<String>,
    /// False when the roll could not be consulted.
    pub determined: bool,
}

impl RegistrationStatus {
    pub fn from_verdict(verdict: &MatchVerdict) -> Self {
        match verdict {
            MatchVerdict::Found(voter) => Self {
                already_registered: true,
                voter_number: Some(voter.voter_number.trim())
                    .filter(|n| !n.is_empty())
                    .map(str::to_string),
                determined: true,
            },
            MatchVerdict::NotFound => Self {
                already_registered: false,
                voter_number: None,
                determined: true,
            },
            MatchVerdict::SourceUnavailable { .. } => Self::default(),
        }
    }

    /// Voter card number to store on the fiche.
    ///
    /// A card number typed by the agent is kept; a blank one is filled from
    /// the roll.
    pub fn card_number(&self, existing: Option<&str>) -> Option<String> {
        match existing.map(str::trim) {
            Some(number) if !number.is_empty() => Some(number.to_string()),
            _ => self.voter_number.clone(),
        }
    }
}

impl From<&MatchVerdict> for RegistrationStatus {
    fn from(verdict: &MatchVerdict) -> Self {
        Self::from_verdict(verdict)
    }
}
