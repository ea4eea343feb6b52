//! Byte and number conversions.
//!
//! Everything here is a pure function over hex tokens, integers and bit
//! vectors. The PCAP encoder builds its fixed-width little-endian header
//! fields from these primitives (`dec_to_hex` + `swap_groups`), and payload
//! bytes are decoded through `decode_payload`.
//!
//! Hex tokens are lowercase, two characters per byte, most significant byte
//! first unless swapped.

pub mod bits;
pub mod digits;
pub mod error;
pub mod order;
pub mod payload;

pub use bits::{bits_to_dec, dec_to_bit, val_to_dec};
pub use digits::{
    chunk, dec_seq_to_hex, dec_to_hex, hex_to_dec, hex_token_to_dec, hex_tokens_to_bytes,
    hex_tokens_to_dec, le_bytes,
};
pub use error::DecodeError;
pub use order::swap_groups;
pub use payload::decode_payload;
