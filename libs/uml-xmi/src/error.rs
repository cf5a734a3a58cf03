//! Error types for XMI reading and writing

use thiserror::Error;
use umlgen_model::ModelError;

/// Result type alias
pub type Result<T> = std::result::Result<T, XmiError>;

#[derive(Debug, Error)]
pub enum XmiError {
    #[error("Malformed XMI document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),

    #[error("Missing element <{name}> in <{parent}>")]
    MissingElement { name: String, parent: String },

    #[error("Missing attribute '{key}' on <{element}>")]
    MissingAttribute { key: String, element: String },

    #[error("Invalid value on <{element}>: {source}")]
    InvalidValue { element: String, source: ModelError },

    #[error("Operation '{operation}' declares more than one return parameter")]
    MultipleReturnParameters { operation: String },

    #[error("XML write error: {0}")]
    Write(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
