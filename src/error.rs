// Request-facing error taxonomy.
//
// Only two failure classes ever reach a caller: invalid input (rejected
// before analysis starts) and configuration problems (fatal at startup).
// Provider failures are data — they degrade a single SubSignal and never
// surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LitmusError {
    /// Empty or oversized text, rejected before any analysis runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed pattern tables or missing startup prerequisites.
    /// The analyzer refuses to start rather than silently returning
    /// empty pattern results.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl LitmusError {
    /// Human-readable message without the error-class prefix, for
    /// API responses.
    pub fn reason(&self) -> &str {
        match self {
            LitmusError::InvalidInput(msg) => msg,
            LitmusError::Configuration(msg) => msg,
        }
    }
}
