// Error handling for the chart store

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request to {path} failed with status {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Signals payload has no channel {0}")]
    MissingChannel(usize),

    #[error("Config error: {0}")]
    Config(String),
}
