use thiserror::Error;

use crate::codec::DecodeError;
use crate::extract::ExtractError;

#[derive(Debug, Error)]
pub enum PcapError {
    #[error("malformed payload hex: {0}")]
    Decode(#[from] DecodeError),
    #[error("payload of {len} bytes does not fit a record length field")]
    PayloadTooLarge { len: usize },
    #[error("timestamp of {secs} seconds does not fit a record header")]
    TimestampOverflow { secs: u64 },
}

/// Why a line produced no record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Encode(#[from] PcapError),
}
