use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::ReferenceRow;

const NOT_PROVIDED: &str = "Non renseigné";

/// Roll entry that matched a candidate, copied verbatim from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedVoter {
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

impl From<ReferenceRow> for MatchedVoter {
    fn from(row: ReferenceRow) -> Self {
        Self {
            voter_number: row.voter_number.trim().to_string(),
            family_name: row.family_name,
            given_names: row.given_names,
            sex: row.sex,
            birth_date: row.birth_date,
            birth_place: row.birth_place,
            commune: row.commune,
            polling_place: row.polling_place,
            polling_bureau: row.polling_bureau,
            profession: row.profession,
            address: row.address,
        }
    }
}

/// Outcome of checking one candidate against the electoral roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchVerdict {
    Found(MatchedVoter),
    NotFound,
    /// The roll could not be read; no determination was made.
    SourceUnavailable { reason: String },
}

impl MatchVerdict {
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, Self::SourceUnavailable { .. })
    }

    pub fn matched(&self) -> Option<&MatchedVoter> {
        match self {
            Self::Found(voter) => Some(voter),
            _ => None,
        }
    }

    /// Banner shown to the agent after the fiche is saved.
    pub fn notification(&self, display_name: &str) -> Notification {
        match self {
            Self::Found(voter) => Notification {
                level: NotificationLevel::Warning,
                message: format!(
                    "Cette personne ({display_name}) est déjà enregistrée dans le fichier électoral. \
                     Numéro électeur : {} | Lieu de vote : {}",
                    or_not_provided(&voter.voter_number),
                    or_not_provided(&voter.polling_place),
                ),
            },
            Self::NotFound => Notification {
                level: NotificationLevel::Info,
                message: format!(
                    "Cette personne ({display_name}) n'a pas été trouvée dans le fichier électoral. \
                     Elle sera enregistrée comme nouvelle inscription potentielle."
                ),
            },
            Self::SourceUnavailable { reason } => Notification {
                level: NotificationLevel::Warning,
                message: format!(
                    "Le fichier électoral n'a pas pu être consulté ({reason}). \
                     La fiche de {display_name} est enregistrée sans vérification."
                ),
            },
        }
    }
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(voter) => write!(f, "found (voter number {})", voter.voter_number),
            Self::NotFound => write!(f, "not found"),
            Self::SourceUnavailable { reason } => write!(f, "source unavailable: {reason}"),
        }
    }
}

fn or_not_provided(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED
    } else {
        trimmed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(voter_number: &str, polling_place: &str) -> MatchedVoter {
        MatchedVoter::from(ReferenceRow {
            family_name: "ABA".to_string(),
            given_names: "MICHEL".to_string(),
            voter_number: voter_number.to_string(),
            polling_place: polling_place.to_string(),
            ..ReferenceRow::default()
        })
    }

    #[test]
    fn matched_voter_trims_voter_number_only() {
        let matched = MatchedVoter::from(ReferenceRow {
            family_name: " ABA ".to_string(),
            voter_number: "  CI00123 ".to_string(),
            ..ReferenceRow::default()
        });
        assert_eq!(matched.voter_number, "CI00123");
        assert_eq!(matched.family_name, " ABA ");
    }

    #[test]
    fn found_notification_mentions_voter_number_and_polling_place() {
        let verdict = MatchVerdict::Found(voter("CI00123", "EPP DANANE 1"));
        let note = verdict.notification("MICHEL ABA");
        assert_eq!(note.level, NotificationLevel::Warning);
        assert!(note.message.contains("(MICHEL ABA)"));
        assert!(note.message.contains("Numéro électeur : CI00123"));
        assert!(note.message.contains("Lieu de vote : EPP DANANE 1"));
    }

    #[test]
    fn found_notification_falls_back_when_fields_blank() {
        let verdict = MatchVerdict::Found(voter("", " "));
        let note = verdict.notification("MICHEL ABA");
        assert!(note.message.contains("Numéro électeur : Non renseigné"));
        assert!(note.message.contains("Lieu de vote : Non renseigné"));
    }

    #[test]
    fn not_found_and_unavailable_are_distinct() {
        let not_found = MatchVerdict::NotFound;
        let unavailable = MatchVerdict::source_unavailable("file missing");
        assert!(not_found.is_determined());
        assert!(!unavailable.is_determined());
        assert_eq!(
            not_found.notification("X").level,
            NotificationLevel::Info
        );
        assert!(unavailable.notification("X").message.contains("file missing"));
    }

    #[test]
    fn verdict_serializes_with_outcome_tag() {
        let json = serde_json::to_value(MatchVerdict::NotFound).unwrap();
        assert_eq!(json["outcome"], "not_found");
        let json = serde_json::to_value(MatchVerdict::Found(voter("CI1", ""))).unwrap();
        assert_eq!(json["outcome"], "found");
        assert_eq!(json["voter_number"], "CI1");
    }
}
