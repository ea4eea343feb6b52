use super::error::DecodeError;
use super::order::swap_groups;

/// Parse a single hex token (any width up to 16 digits).
///
/// # Examples
/// ```
/// use wpancap_core::codec::hex_token_to_dec;
///
/// assert_eq!(hex_token_to_dec("ff").unwrap(), 255);
/// ```
///
/// # Errors
/// Returns `DecodeError` for empty tokens or non-hex characters.
pub fn hex_token_to_dec(token: &str) -> Result<u64, DecodeError> {
    if token.is_empty() {
        return Err(DecodeError::EmptyToken);
    }
    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidToken(token.to_string()));
    }
    u64::from_str_radix(token, 16).map_err(|_| DecodeError::InvalidToken(token.to_string()))
}

/// Parse a pre-split sequence of hex tokens.
pub fn hex_tokens_to_dec<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<u64>, DecodeError> {
    tokens
        .iter()
        .map(|token| hex_token_to_dec(token.as_ref()))
        .collect()
}

/// Parse whitespace-separated hex tokens, e.g. `"af fe"` -> `[175, 254]`.
///
/// A single token yields a single-element vector.
///
/// # Examples
/// ```
/// use wpancap_core::codec::hex_to_dec;
///
/// assert_eq!(hex_to_dec("af fe").unwrap(), vec![175, 254]);
/// assert_eq!(hex_to_dec("ff").unwrap(), vec![255]);
/// ```
pub fn hex_to_dec(text: &str) -> Result<Vec<u64>, DecodeError> {
    let tokens: Vec<&str> = text.split_ascii_whitespace().collect();
    if tokens.is_empty() {
        return Err(DecodeError::EmptyToken);
    }
    hex_tokens_to_dec(&tokens)
}

/// Parse hex tokens that must each fit in one byte.
pub fn hex_tokens_to_bytes<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<u8>, DecodeError> {
    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();
            let value = hex_token_to_dec(token)?;
            u8::try_from(value).map_err(|_| DecodeError::ByteOverflow(token.to_string()))
        })
        .collect()
}

/// Encode a value as big-endian 2-character hex tokens.
///
/// With `size == 0` the encoding is the minimal even-length form. With
/// `size > 0` it is exactly `size` bytes: short values are zero-padded on the
/// left and long values keep their low-order bytes.
///
/// # Examples
/// ```
/// use wpancap_core::codec::dec_to_hex;
///
/// assert_eq!(dec_to_hex(12_648_430, 0), ["c0", "ff", "ee"]);
/// assert_eq!(dec_to_hex(255, 2), ["00", "ff"]);
/// assert_eq!(dec_to_hex(0x0102_0304, 2), ["03", "04"]);
/// ```
pub fn dec_to_hex(value: u64, size: usize) -> Vec<String> {
    let mut digits = format!("{value:x}");
    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }
    if size > 0 {
        let width = size * 2;
        digits = if digits.len() < width {
            format!("{digits:0>width$}")
        } else {
            digits.split_off(digits.len() - width)
        };
    }
    chunk(&digits, 2).into_iter().map(str::to_string).collect()
}

/// Encode each value minimally and flatten the tokens.
///
/// # Examples
/// ```
/// use wpancap_core::codec::dec_seq_to_hex;
///
/// assert_eq!(dec_seq_to_hex(&[255, 255]), ["ff", "ff"]);
/// assert_eq!(dec_seq_to_hex(&[65_535, 10]), ["ff", "ff", "0a"]);
/// ```
pub fn dec_seq_to_hex(values: &[u64]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| dec_to_hex(*value, 0))
        .collect()
}

/// Split text into substrings of `size` characters; the last may be shorter.
///
/// # Examples
/// ```
/// use wpancap_core::codec::chunk;
///
/// assert_eq!(chunk("abcdefg", 2), ["ab", "cd", "ef", "g"]);
/// assert!(chunk("", 2).is_empty());
/// ```
pub fn chunk(text: &str, size: usize) -> Vec<&str> {
    let size = size.max(1);
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .step_by(size)
        .chain(std::iter::once(text.len()))
        .collect();
    bounds
        .windows(2)
        .map(|pair| &text[pair[0]..pair[1]])
        .collect()
}

/// Fixed-width little-endian field of `size` bytes.
///
/// # Examples
/// ```
/// use wpancap_core::codec::le_bytes;
///
/// assert_eq!(le_bytes(230, 4).unwrap(), [0xe6, 0x00, 0x00, 0x00]);
/// ```
pub fn le_bytes(value: u64, size: usize) -> Result<Vec<u8>, DecodeError> {
    let tokens = swap_groups(&dec_to_hex(value, size), None);
    hex_tokens_to_bytes(&tokens)
}
