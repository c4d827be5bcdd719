use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Drug data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid drug record: {0}")]
    InvalidRecord(String),

    #[error("Case validation error: {0}")]
    Validation(String),
}

pub type DoseResult<T> = Result<T, DoseError>;
