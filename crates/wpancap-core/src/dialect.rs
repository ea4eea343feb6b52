//! Per-tool line formats that need rewriting before extraction.
//!
//! The dialect of a source is resolved once from its file extension. Most
//! tools write lines the extractor understands directly; Daintree condensed
//! captures (`.dcf`) are rewritten into the bracketed layout. Ember Insight
//! (`.isd`) and TI Packet Sniffer (`.psd`) captures are recognized but not
//! supported.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::{Timestamp, TimestampError, TimestampNormalizer};

/// Fields in a Daintree condensed line.
pub const DAINTREE_FIELDS: usize = 12;
pub const DAINTREE_TIME_FIELD: usize = 1;
pub const DAINTREE_PAYLOAD_FIELD: usize = 3;
/// Trailing hex characters of the FCS placeholder in Daintree payloads.
pub const DAINTREE_FCS_CHARS: usize = 4;

#[derive(Debug, Error)]
pub enum DialectError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid capture time '{text}'")]
    InvalidTime { text: String },
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    PlainHex,
    DaintreeCondensed,
    EmberInsight,
    TiPacketSniffer,
}

impl Dialect {
    /// Resolve from the extension, ignoring case.
    pub fn for_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("dcf") => Dialect::DaintreeCondensed,
            Some("isd") => Dialect::EmberInsight,
            Some("psd") => Dialect::TiPacketSniffer,
            _ => Dialect::PlainHex,
        }
    }

    pub fn is_supported(self) -> bool {
        matches!(self, Dialect::PlainHex | Dialect::DaintreeCondensed)
    }

    /// Rewrite `line` into a layout the extractor understands.
    ///
    /// # Errors
    /// Returns `DialectError` for lines the dialect cannot rewrite; such lines
    /// carry no frame. Unsupported dialects pass lines through unchanged and
    /// must be rejected before reading.
    pub fn preprocess<'a>(
        self,
        line: &'a str,
        normalizer: &TimestampNormalizer,
    ) -> Result<Cow<'a, str>, DialectError> {
        match self {
            Dialect::DaintreeCondensed => daintree_to_bracketed(line, normalizer).map(Cow::Owned),
            Dialect::PlainHex | Dialect::EmberInsight | Dialect::TiPacketSniffer => {
                Ok(Cow::Borrowed(line))
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::PlainHex => "plain hex",
            Dialect::DaintreeCondensed => "Daintree condensed (.dcf)",
            Dialect::EmberInsight => "Ember Insight (.isd)",
            Dialect::TiPacketSniffer => "TI Packet Sniffer (.psd)",
        };
        f.write_str(name)
    }
}

fn daintree_to_bracketed(
    line: &str,
    normalizer: &TimestampNormalizer,
) -> Result<String, DialectError> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != DAINTREE_FIELDS {
        return Err(DialectError::FieldCount {
            expected: DAINTREE_FIELDS,
            found: fields.len(),
        });
    }

    let time = fields[DAINTREE_TIME_FIELD];
    let secs = time.parse::<f64>().map_err(|_| DialectError::InvalidTime {
        text: time.to_string(),
    })?;
    let stamp = normalizer.to_compact_text(Timestamp::from_secs_f64(secs)?, true)?;

    let payload = fields[DAINTREE_PAYLOAD_FIELD];
    let keep = payload.chars().count().saturating_sub(DAINTREE_FCS_CHARS);
    let payload: String = payload.chars().take(keep).collect();
    Ok(format!("[{stamp}] {payload}\n"))
}
