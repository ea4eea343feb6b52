//! Timestamp normalization.
//!
//! The canonical representation is [`Timestamp`], seconds since the Unix
//! epoch as `f64` with microsecond granularity downstream. Wall-clock text is
//! interpreted and rendered through a [`TimestampNormalizer`], which carries
//! the UTC offset the capture tool wrote its times in.
//!
//! Accepted calendar text is anything that reduces to the 20-digit form
//! `YYYYMMDDHHMMSSffffff` once `-`, `:`, `,`, `.` and spaces are stripped;
//! shorter inputs are padded with zeros on the right.

pub mod error;
pub mod layout;
pub mod normalizer;
pub mod value;

pub use error::TimestampError;
pub use normalizer::{TimestampNormalizer, to_rfc3339};
pub use value::Timestamp;
