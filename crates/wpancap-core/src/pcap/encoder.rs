use crate::codec::{
    DecodeError, dec_to_hex, decode_payload, hex_tokens_to_bytes, le_bytes, swap_groups,
};
use crate::extract::LineExtractor;
use crate::timestamp::Timestamp;

use super::error::{PcapError, RecordError};
use super::layout;
use super::link_type::LinkType;

/// One encoded record: header plus frame bytes, ready to append to a file.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    pub timestamp: Timestamp,
    pub bytes: Vec<u8>,
}

/// The 24-byte global header.
///
/// # Examples
/// ```
/// use wpancap_core::pcap::{LinkType, build_global_header};
///
/// let header = build_global_header(LinkType::Ieee802154NoFcs)?;
/// assert_eq!(header.len(), 24);
/// assert_eq!(&header[..4], &[0xd4, 0xc3, 0xb2, 0xa1]);
/// assert_eq!(&header[20..], &[0xe6, 0x00, 0x00, 0x00]);
/// # Ok::<(), wpancap_core::pcap::PcapError>(())
/// ```
pub fn build_global_header(link_type: LinkType) -> Result<Vec<u8>, PcapError> {
    let mut header = Vec::with_capacity(layout::GLOBAL_HEADER_LEN);
    header.extend_from_slice(&layout::MAGIC);
    header.extend(version_field()?);
    header.extend(le_bytes(layout::GMT_OFFSET, layout::FIELD_BYTES)?);
    header.extend(le_bytes(layout::ACCURACY, layout::FIELD_BYTES)?);
    header.extend(le_bytes(layout::SNAPLEN, layout::FIELD_BYTES)?);
    header.extend(le_bytes(u64::from(link_type.code()), layout::FIELD_BYTES)?);
    Ok(header)
}

/// Major and minor version, each a 2-byte little-endian field.
fn version_field() -> Result<Vec<u8>, DecodeError> {
    let mut tokens = dec_to_hex(layout::VERSION_MAJOR, layout::VERSION_PART_BYTES);
    tokens.extend(dec_to_hex(layout::VERSION_MINOR, layout::VERSION_PART_BYTES));
    hex_tokens_to_bytes(&swap_groups(&tokens, Some(layout::VERSION_PART_BYTES)))
}

/// Record header and frame bytes for one frame.
///
/// # Errors
/// Returns `PcapError::Decode` for odd-length or non-hex payloads, and a
/// range error when the payload length or the seconds do not fit 32 bits.
pub fn build_record(timestamp: Timestamp, payload_hex: &str) -> Result<Vec<u8>, PcapError> {
    let payload = decode_payload(payload_hex)?;
    let len = u32::try_from(payload.len())
        .map_err(|_| PcapError::PayloadTooLarge { len: payload.len() })?;
    let (secs, micros) = timestamp.split_micros();
    if secs > u64::from(u32::MAX) {
        return Err(PcapError::TimestampOverflow { secs });
    }

    let mut record = Vec::with_capacity(layout::RECORD_HEADER_LEN + payload.len());
    record.extend(le_bytes(secs, layout::FIELD_BYTES)?);
    record.extend(le_bytes(u64::from(micros), layout::FIELD_BYTES)?);
    record.extend(le_bytes(u64::from(len), layout::FIELD_BYTES)?);
    record.extend(le_bytes(u64::from(len), layout::FIELD_BYTES)?);
    record.extend(payload);
    Ok(record)
}

/// Extract and encode one raw line.
pub fn encode_line(extractor: &LineExtractor, line: &str) -> Result<EncodedRecord, RecordError> {
    let data = extractor.extract(line)?;
    let bytes = build_record(data.timestamp, &data.payload)?;
    Ok(EncodedRecord {
        timestamp: data.timestamp,
        bytes,
    })
}
