//! Error types for the ibex toolkit

use thiserror::Error;

/// Main error type for header reading and classification
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated input: need {expected} bytes at offset {offset:#x}, source holds {actual}")]
    TruncatedInput {
        offset: u64,
        expected: usize,
        actual: u64,
    },

    #[error("description matches no known stage: {description:?}")]
    UnrecognizedStage { description: String },

    #[error("no device delimiter after the stage prefix: {description:?}")]
    MalformedDescription { description: String },

    #[error("version field does not start with \"iBoot-\": {found:?}")]
    MissingVersionPrefix { found: String },

    #[error("version component is not a number: {text:?}")]
    InvalidVersionNumber { text: String },
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn truncated(offset: u64, expected: usize, actual: u64) -> Self {
        Self::TruncatedInput {
            offset,
            expected,
            actual,
        }
    }

    /// True for the routine "this is simply not an iBoot image" outcomes.
    ///
    /// The classifier runs speculatively against arbitrary binaries, so an
    /// unrecognized stage or a missing version prefix is an expected miss,
    /// not a malformed input.
    pub fn is_not_applicable(&self) -> bool {
        matches!(
            self,
            Error::UnrecognizedStage { .. } | Error::MissingVersionPrefix { .. }
        )
    }
}
