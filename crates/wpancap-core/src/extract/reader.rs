use super::error::ExtractError;
use super::layout;

/// Raw line as read from the source, terminator still attached.
pub struct LineReader<'a> {
    raw: &'a str,
}

impl<'a> LineReader<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn require_data(&self) -> Result<(), ExtractError> {
        let actual = char_len(self.raw);
        if actual < layout::MIN_LINE_CHARS {
            return Err(ExtractError::TooShort {
                needed: layout::MIN_LINE_CHARS,
                actual,
            });
        }
        if self.raw.contains('\0') {
            return Err(ExtractError::NulByte);
        }
        Ok(())
    }

    /// The line without terminators and FCS markers.
    pub fn cleaned(&self) -> String {
        self.raw
            .replace(layout::LINE_TERMINATORS, "")
            .replace(layout::FCS_MARKER, "")
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn char_index_of(text: &str, needle: char) -> Option<usize> {
    text.chars().position(|c| c == needle)
}

/// Split after `index` characters; an index past the end yields `(text, "")`.
pub fn split_at_char(text: &str, index: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(index)
        .map_or(text.len(), |(byte, _)| byte);
    text.split_at(byte)
}

/// `1500564304533` -> `1500564304.533`
pub fn epoch_text(digits: &str) -> String {
    let (secs, fraction) = split_at_char(digits, layout::EPOCH_SECONDS_DIGITS);
    format!("{secs}.{fraction}")
}

pub fn normalize_payload(raw: &str) -> String {
    raw.replace(layout::HEX_PREFIX, "")
        .replace(layout::TOKEN_DELIMITER, "")
        .to_lowercase()
}
