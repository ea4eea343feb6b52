/// Digits in the canonical `YYYYMMDDHHMMSSffffff` form.
pub const CANONICAL_DIGITS: usize = 20;

pub const YEAR_RANGE: std::ops::Range<usize> = 0..4;
pub const MONTH_RANGE: std::ops::Range<usize> = 4..6;
pub const DAY_RANGE: std::ops::Range<usize> = 6..8;
pub const HOUR_RANGE: std::ops::Range<usize> = 8..10;
pub const MINUTE_RANGE: std::ops::Range<usize> = 10..12;
pub const SECOND_RANGE: std::ops::Range<usize> = 12..14;
pub const MICROS_RANGE: std::ops::Range<usize> = 14..20;

/// Separators dropped before the digits are read.
pub const SEPARATORS: [char; 5] = ['-', ':', ',', '.', ' '];

/// Elapsed time is measured from this many seconds past the epoch, then
/// shifted back.
pub const ANCHOR_SECS: i64 = 1;

pub const MICROS_PER_SECOND: u64 = 1_000_000;
