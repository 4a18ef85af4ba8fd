use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApproachError>;

#[derive(Error, Debug)]
pub enum ApproachError {
    #[error("IO error {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error {0}")]
    CsvError(#[from] csv::Error),

    #[error("scenario config error {0}")]
    ConfigError(#[from] ron::error::SpannedError),

    #[error("JSON error {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("timestamp parse error {0}")]
    TimeParseError(#[from] chrono::ParseError),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("insufficient track data: {0}")]
    InsufficientTrack(String),
}
