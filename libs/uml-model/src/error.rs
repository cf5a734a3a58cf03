//! Error types for the UML syntax model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unrecognized relation kind: {0}")]
    UnrecognizedRelationKind(String),

    #[error("Unrecognized visibility: {0}")]
    UnrecognizedVisibility(String),

    #[error("Unrecognized parameter direction: {0}")]
    UnrecognizedDirection(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
