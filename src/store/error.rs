use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode rows: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
