/// Shortest raw line, terminator included, that may carry a frame.
pub const MIN_LINE_CHARS: usize = 18;

pub const EPOCH_TOKEN_CHARS: usize = 13;
pub const EPOCH_TOKEN_DOTTED_CHARS: usize = 14;
/// Digits before the decimal point in an epoch-millis token.
pub const EPOCH_SECONDS_DIGITS: usize = 10;

pub const LINE_TERMINATORS: [char; 2] = ['\r', '\n'];
pub const FCS_MARKER: &str = " *";
pub const HEX_PREFIX: &str = "0x";

pub const TOKEN_DELIMITER: char = ' ';
pub const TIMESTAMP_OPEN: char = '[';
pub const TIMESTAMP_CLOSE: char = ']';
