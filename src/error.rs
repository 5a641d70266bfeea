use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtGpsError {
    #[error("Malformed record: need {needed} bytes, have {available}")]
    MalformedRecord { needed: usize, available: usize },

    #[error("Record overflow: more than {capacity} bytes before next marker")]
    RecordOverflow { capacity: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AtGpsError>;
