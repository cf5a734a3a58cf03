//! Error types for code generation

use thiserror::Error;
use umlgen_xmi::XmiError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Xmi(#[from] XmiError),

    #[error("Class is not mapped to an import path: {0}")]
    UnresolvedClass(String),

    #[error("Class name '{name}' is declared twice ({first} and {second})")]
    DuplicateClass {
        name: String,
        first: String,
        second: String,
    },

    #[error("Relation with client '{client}' passed while generating class '{class}'")]
    ForeignRelation { class: String, client: String },
}
