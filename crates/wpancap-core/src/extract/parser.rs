use crate::timestamp::{Timestamp, TimestampNormalizer};

use super::error::ExtractError;
use super::layout;
use super::reader::{
    LineReader, char_index_of, char_len, epoch_text, normalize_payload, split_at_char,
};

/// Line layouts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Bracketed,
    Delimited,
    Undelimited,
}

impl Strategy {
    pub const PRIORITY: [Strategy; 3] = [
        Strategy::Bracketed,
        Strategy::Delimited,
        Strategy::Undelimited,
    ];

    fn apply(self, line: &str) -> Result<Option<RawFields<'_>>, ExtractError> {
        match self {
            Strategy::Bracketed => bracketed(line),
            Strategy::Delimited => delimited(line),
            Strategy::Undelimited => undelimited(line),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineData {
    pub timestamp: Timestamp,
    /// Lowercase hex, no separators.
    pub payload: String,
    pub strategy: Strategy,
}

#[derive(Debug)]
enum RawTimestamp<'a> {
    Calendar(&'a str),
    Epoch(String),
}

#[derive(Debug)]
struct RawFields<'a> {
    timestamp: RawTimestamp<'a>,
    payload: String,
}

/// Turns raw log lines into [`LineData`].
///
/// Calendar timestamps are interpreted through the configured
/// [`TimestampNormalizer`]; epoch tokens are absolute.
///
/// # Examples
/// ```
/// use wpancap_core::extract::LineExtractor;
/// use wpancap_core::TimestampNormalizer;
///
/// let extractor = LineExtractor::new(TimestampNormalizer::utc());
/// let data = extractor.extract("1500564304533 aa bb cc dd\n")?;
/// assert_eq!(data.timestamp.as_secs_f64(), 1_500_564_304.533);
/// assert_eq!(data.payload, "aabbccdd");
/// # Ok::<(), wpancap_core::extract::ExtractError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LineExtractor {
    normalizer: TimestampNormalizer,
}

impl LineExtractor {
    pub fn new(normalizer: TimestampNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &TimestampNormalizer {
        &self.normalizer
    }

    pub fn extract(&self, line: &str) -> Result<LineData, ExtractError> {
        let reader = LineReader::new(line);
        reader.require_data()?;
        let cleaned = reader.cleaned();

        for strategy in Strategy::PRIORITY {
            if let Some(fields) = strategy.apply(&cleaned)? {
                let timestamp = self.resolve(fields.timestamp)?;
                return Ok(LineData {
                    timestamp,
                    payload: normalize_payload(&fields.payload),
                    strategy,
                });
            }
        }
        Err(ExtractError::Unrecognized)
    }

    fn resolve(&self, raw: RawTimestamp<'_>) -> Result<Timestamp, ExtractError> {
        match raw {
            RawTimestamp::Calendar(text) => Ok(self.normalizer.parse_flexible(Some(text))?),
            RawTimestamp::Epoch(text) => {
                let secs = text
                    .parse::<f64>()
                    .map_err(|_| ExtractError::InvalidEpoch { text: text.clone() })?;
                Ok(Timestamp::from_secs_f64(secs)?)
            }
        }
    }
}

fn bracketed(line: &str) -> Result<Option<RawFields<'_>>, ExtractError> {
    let (Some(open), Some(close)) = (
        line.find(layout::TIMESTAMP_OPEN),
        line.find(layout::TIMESTAMP_CLOSE),
    ) else {
        return Ok(None);
    };
    if close < open {
        return Err(ExtractError::UnbalancedBrackets);
    }
    let timestamp = &line[open + layout::TIMESTAMP_OPEN.len_utf8()..close];
    let payload = &line[close + layout::TIMESTAMP_CLOSE.len_utf8()..];
    Ok(Some(RawFields {
        timestamp: RawTimestamp::Calendar(timestamp),
        payload: payload.to_string(),
    }))
}

fn delimited(line: &str) -> Result<Option<RawFields<'_>>, ExtractError> {
    let tokens: Vec<&str> = line.split(layout::TOKEN_DELIMITER).collect();
    if tokens.len() < 2 {
        return Ok(None);
    }

    let timestamp = tokens
        .iter()
        .find(|token| is_epoch_token(token))
        .map(|token| epoch_text(&token.replace('.', "")))
        .ok_or(ExtractError::MissingTimestamp {
            tokens: tokens.len(),
        })?;

    let payload = if tokens.len() == 2 {
        tokens[1].to_string()
    } else {
        trailing_payload(&tokens)
    };
    Ok(Some(RawFields {
        timestamp: RawTimestamp::Epoch(timestamp),
        payload,
    }))
}

fn undelimited(line: &str) -> Result<Option<RawFields<'_>>, ExtractError> {
    let dotted = char_index_of(line, '.').is_some_and(|index| index < layout::EPOCH_TOKEN_CHARS);
    let (timestamp, payload) = if dotted {
        let (timestamp, payload) = split_at_char(line, layout::EPOCH_TOKEN_DOTTED_CHARS);
        (timestamp.to_string(), payload)
    } else {
        let (timestamp, payload) = split_at_char(line, layout::EPOCH_TOKEN_CHARS);
        (epoch_text(timestamp), payload)
    };
    Ok(Some(RawFields {
        timestamp: RawTimestamp::Epoch(timestamp),
        payload: payload.to_string(),
    }))
}

fn is_epoch_token(token: &str) -> bool {
    match char_len(token) {
        layout::EPOCH_TOKEN_CHARS => true,
        layout::EPOCH_TOKEN_DOTTED_CHARS => {
            char_index_of(token, '.').is_some_and(|index| index < layout::EPOCH_TOKEN_CHARS)
        }
        _ => false,
    }
}

/// Walks back from the last field while fields keep the last field's width;
/// the run of equal-width fields is the payload. A blank field stops the walk
/// one field early.
fn trailing_payload(tokens: &[&str]) -> String {
    let count = tokens.len();
    let width = char_len(tokens[count - 1]);
    let mut idx = count;
    for token in tokens.iter().rev() {
        if token.is_empty() {
            idx += 1;
            break;
        }
        if char_len(token) != width {
            break;
        }
        idx -= 1;
    }
    if idx < count {
        tokens[idx..].concat()
    } else {
        tokens[count - 1].to_string()
    }
}
