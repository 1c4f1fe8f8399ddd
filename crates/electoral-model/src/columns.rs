//! Header names recognized in the electoral roll file.

pub const FAMILY_NAME: &str = "Nom/Nom de Jeune Fille";
pub const GIVEN_NAMES: &str = "Prenoms";
pub const BIRTH_DATE: &str = "Date de Naissance";
pub const BIRTH_PLACE: &str = "Lieu de Naissance";
pub const VOTER_NUMBER: &str = "Numero Electeur";
pub const SEX: &str = "Sexe";
pub const COMMUNE: &str = "Libelle Commune";
pub const POLLING_PLACE: &str = "Libelle Lieu de Vote";
pub const POLLING_BUREAU: &str = "Bureau de vote";
pub const PROFESSION: &str = "Profession";
pub const ADDRESS: &str = "Adresse Physique";

/// Every recognized column, in the order the roll export lists them.
pub const ALL: [&str; 11] = [
    FAMILY_NAME,
    GIVEN_NAMES,
    BIRTH_DATE,
    BIRTH_PLACE,
    VOTER_NUMBER,
    SEX,
    COMMUNE,
    POLLING_PLACE,
    POLLING_BUREAU,
    PROFESSION,
    ADDRESS,
];

/// Columns whose absence makes a row unusable for matching.
pub const REQUIRED: [&str; 2] = [FAMILY_NAME, GIVEN_NAMES];
