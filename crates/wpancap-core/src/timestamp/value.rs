use std::cmp::Ordering;
use std::fmt;

use super::error::TimestampError;
use super::layout::MICROS_PER_SECOND;

/// Seconds since the Unix epoch, never negative.
///
/// # Examples
/// ```
/// use wpancap_core::Timestamp;
///
/// let ts = Timestamp::from_secs_f64(1_500_564_304.533)?;
/// assert_eq!(ts.split_micros(), (1_500_564_304, 533_000));
/// # Ok::<(), wpancap_core::TimestampError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0.0);

    /// # Errors
    /// Returns `TimestampError::OutOfRange` for negative, NaN or infinite input.
    pub fn from_secs_f64(secs: f64) -> Result<Self, TimestampError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(TimestampError::OutOfRange(secs));
        }
        Ok(Self(secs))
    }

    pub fn from_micros(micros: u64) -> Self {
        Self(micros as f64 / MICROS_PER_SECOND as f64)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Whole seconds and rounded microseconds, carrying into the seconds
    /// when rounding reaches a full second.
    pub fn split_micros(self) -> (u64, u32) {
        let whole = self.0.floor();
        let mut secs = whole as u64;
        let mut micros = ((self.0 - whole) * MICROS_PER_SECOND as f64).round() as u64;
        if micros >= MICROS_PER_SECOND {
            secs += 1;
            micros -= MICROS_PER_SECOND;
        }
        (secs, micros as u32)
    }

    pub fn total_micros(self) -> i128 {
        let (secs, micros) = self.split_micros();
        i128::from(secs) * i128::from(MICROS_PER_SECOND) + i128::from(micros)
    }

    /// True when `self` lies strictly after `anchor + period_secs`.
    pub fn exceeds(self, anchor: Timestamp, period_secs: u64) -> bool {
        self.0 > anchor.0 + period_secs as f64
    }

    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
