use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum TraverseError {
    #[error("Unknown value type: {0}")]
    #[diagnostic(
        code(deep_traverse::unknown_value_type),
        help("expected one of: bigint, boolean, function, number, string, symbol")
    )]
    UnknownValueType(String),
    #[error("Invalid traversal options: {0}")]
    #[diagnostic(code(deep_traverse::invalid_options))]
    InvalidOptions(#[source] serde_json::Error),
    #[error("Invalid JSON document: {0}")]
    #[diagnostic(code(deep_traverse::invalid_document))]
    InvalidDocument(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TraverseError>;
