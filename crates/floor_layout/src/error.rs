//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. The
//! placement engine itself never fails; these variants are produced by the
//! validating entry points (`try_*` constructors and functions) that reject
//! malformed configuration, envelopes, or room programs before a run starts.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid room program: {0}")]
    InvalidProgram(String),

    #[error("invalid building envelope {width}x{depth}: dimensions must be finite and > 0")]
    InvalidEnvelope { width: f32, depth: f32 },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
