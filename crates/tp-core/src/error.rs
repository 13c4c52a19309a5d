use thiserror::Error;

#[derive(Error, Debug)]
pub enum TpError {
    #[error("Invalid trading day: {0} (expected YYYY-MM-DD)")]
    InvalidDay(String),
    #[error("Polygon API key required")]
    MissingApiKey,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TpError>;
