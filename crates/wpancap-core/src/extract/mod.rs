//! Timestamp and payload extraction from one log line.
//!
//! Capture tools write their frames in loosely structured text. Three layouts
//! are recognized and tried in a fixed order, each answering "matched" or
//! "not mine":
//!
//! 1. bracketed calendar time, `[2017-07-20 17:25:04.533] aa bb cc`
//! 2. space-delimited fields with an epoch-millis token, `1500564304533 aa bb cc`
//! 3. an epoch-millis prefix glued to the payload, `1500564304533aabbcc`
//!
//! A line shorter than 18 characters (terminator included) or carrying a NUL
//! byte is never considered. `\r`, `\n` and the ` *` FCS marker are removed
//! before matching; the payload loses `0x` prefixes and spaces and is
//! lowercased.
//!
//! Every failure is reported as an [`ExtractError`]; callers treat any error
//! as "no data on this line" and move on.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::ExtractError;
pub use parser::{LineData, LineExtractor, Strategy};
