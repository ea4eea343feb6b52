use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("empty timestamp text")]
    Empty,
    #[error("unexpected character {found:?} in timestamp '{text}'")]
    InvalidCharacter { text: String, found: char },
    #[error("timestamp '{text}' has {digits} digits, at most {max} are supported")]
    TooManyDigits {
        text: String,
        digits: usize,
        max: usize,
    },
    #[error("invalid calendar value in '{text}': {source}")]
    Calendar {
        text: String,
        #[source]
        source: time::error::ComponentRange,
    },
    #[error("timestamp '{text}' lies before the Unix epoch")]
    BeforeEpoch { text: String },
    #[error("timestamp {0} is negative or not finite")]
    OutOfRange(f64),
    #[error("timestamp outside the calendar range: {0}")]
    Range(#[from] time::error::ComponentRange),
    #[error("timestamp formatting failed: {0}")]
    Format(#[from] time::error::Format),
    #[error("local UTC offset could not be determined")]
    IndeterminateOffset,
}
