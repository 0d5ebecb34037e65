use thiserror::Error;

#[derive(Error, Debug)]
pub enum PracticeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found in catalog: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PracticeError>;
