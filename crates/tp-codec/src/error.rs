use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Truncated artifact header: need {needed} bytes, got {got}")]
    TruncatedHeader { needed: usize, got: usize },
    #[error("Unsupported artifact version: {0}")]
    UnsupportedVersion(u8),
    #[error("Artifact was encoded with table '{found}', active table is '{expected}'")]
    TableMismatch { expected: String, found: String },
    #[error("Table id too long for artifact header: {0} bytes")]
    TableIdTooLong(usize),
    #[error("Invalid table definition: {0}")]
    InvalidTable(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
