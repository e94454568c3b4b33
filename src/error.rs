use thiserror::Error;

use crate::constants::EXIT_FAILURE;

/// Every way a query can fail, from argument handling to printing the result.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid server URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("malformed response: {0}")]
    Envelope(String),
    #[error("query failed ({error_type}): {error}")]
    Api { error_type: String, error: String },
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl QueryError {
    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::InvalidUrl { .. } => "invalid_url",
            QueryError::InvalidArgument(_) => "invalid_argument",
            QueryError::Transport(_) => "transport",
            QueryError::Http { .. } => "http",
            QueryError::Envelope(_) => "envelope",
            QueryError::Api { .. } => "api",
            QueryError::Output(_) => "output",
        }
    }

    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
