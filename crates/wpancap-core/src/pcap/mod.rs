//! Classic little-endian PCAP encoding.
//!
//! A file is one 24-byte global header followed by records, each a 16-byte
//! header (seconds, microseconds, captured length, original length) and the
//! frame bytes. Captured and original lengths are always equal; frames are
//! never truncated.
//!
//! Header fields are assembled from the `codec` primitives as fixed-width
//! big-endian hex tokens swapped into little-endian order.

pub mod encoder;
pub mod error;
pub mod layout;
pub mod link_type;

pub use encoder::{EncodedRecord, build_global_header, build_record, encode_line};
pub use error::{PcapError, RecordError};
pub use link_type::LinkType;
