use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A column required to identify a person is absent from the row.
    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
