use thiserror::Error;

use crate::timestamp::TimestampError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("line too short: needed {needed} characters, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("line contains a NUL byte")]
    NulByte,
    #[error("closing bracket precedes opening bracket")]
    UnbalancedBrackets,
    #[error("no epoch timestamp among {tokens} fields")]
    MissingTimestamp { tokens: usize },
    #[error("invalid epoch timestamp '{text}'")]
    InvalidEpoch { text: String },
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
    #[error("line layout not recognized")]
    Unrecognized,
}
