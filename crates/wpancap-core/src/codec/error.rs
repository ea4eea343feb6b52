use thiserror::Error;

/// Errors returned when hex text cannot be turned into numbers or bytes.
///
/// # Examples
/// ```
/// use wpancap_core::codec::{DecodeError, hex_token_to_dec};
///
/// let err = hex_token_to_dec("zz").unwrap_err();
/// assert_eq!(err, DecodeError::InvalidToken("zz".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty hex token")]
    EmptyToken,
    #[error("invalid hex token '{0}'")]
    InvalidToken(String),
    #[error("hex token '{0}' does not fit in a byte")]
    ByteOverflow(String),
    #[error("odd number of hex digits in payload")]
    OddLength,
    #[error("invalid hex character {c:?} at index {index}")]
    InvalidCharacter { c: char, index: usize },
}

impl From<hex::FromHexError> for DecodeError {
    fn from(value: hex::FromHexError) -> Self {
        match value {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                DecodeError::InvalidCharacter { c, index }
            }
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                DecodeError::OddLength
            }
        }
    }
}
