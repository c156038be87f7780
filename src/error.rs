use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while resolving remote sources.
#[derive(Debug, Error)]
pub enum Error {
    /// No session could be obtained through any login path.
    #[error("Could not fetch repositories from GitHub.")]
    Authentication,

    #[error("no session stored for host '{host}'")]
    NoSession { host: String },

    /// A repository record came back without a field we need.
    #[error("malformed repository record: missing field '{field}'")]
    MalformedRecord { field: &'static str },

    #[error("GitHub API responded {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("prompt failed: {0}")]
    Prompt(String),
}
