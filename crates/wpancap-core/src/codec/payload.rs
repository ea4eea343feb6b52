use super::error::DecodeError;

/// Decode a cleaned payload hex string (two characters per byte).
///
/// # Examples
/// ```
/// use wpancap_core::codec::decode_payload;
///
/// assert_eq!(decode_payload("aabb").unwrap(), [0xaa, 0xbb]);
/// assert!(decode_payload("aab").is_err());
/// ```
///
/// # Errors
/// Returns `DecodeError` for odd-length input or non-hex characters; nothing
/// is partially decoded.
pub fn decode_payload(payload_hex: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(hex::decode(payload_hex)?)
}

#[cfg(test)]
mod tests {
    use super::decode_payload;
    use crate::codec::DecodeError;

    #[test]
    fn empty_payload_is_empty() {
        assert!(decode_payload("").unwrap().is_empty());
    }

    #[test]
    fn non_hex_character() {
        let err = decode_payload("aazz").unwrap_err();
        assert_eq!(err, DecodeError::InvalidCharacter { c: 'z', index: 2 });
    }

    #[test]
    fn odd_length() {
        assert_eq!(decode_payload("abc").unwrap_err(), DecodeError::OddLength);
    }
}
