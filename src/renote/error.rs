use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenoteError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Nothing loaded for '{0}'")]
    Empty(String),

    #[error("Document '{0}' does not hold text")]
    NotText(String),

    #[error("Duplicate identifier '{identifier}' in '{document}'")]
    DuplicateIdentifier { identifier: String, document: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RenoteError>;
