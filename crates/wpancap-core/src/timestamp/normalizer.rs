use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use super::error::TimestampError;
use super::layout::{
    ANCHOR_SECS, CANONICAL_DIGITS, DAY_RANGE, HOUR_RANGE, MICROS_PER_SECOND, MICROS_RANGE,
    MINUTE_RANGE, MONTH_RANGE, SECOND_RANGE, SEPARATORS, YEAR_RANGE,
};
use super::value::Timestamp;

/// Converts between [`Timestamp`] values and wall-clock text written in a
/// fixed UTC offset.
///
/// # Examples
/// ```
/// use wpancap_core::TimestampNormalizer;
///
/// let normalizer = TimestampNormalizer::utc();
/// let ts = normalizer.parse_flexible(Some("2017-07-20 15:25:04.533"))?;
/// assert_eq!(ts.as_secs_f64(), 1_500_564_304.533);
/// assert_eq!(normalizer.to_compact_text(ts, false)?, "20170720-152504");
/// # Ok::<(), wpancap_core::TimestampError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampNormalizer {
    offset: UtcOffset,
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimestampNormalizer {
    pub fn utc() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }

    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Normalizer for the offset of the local system clock.
    ///
    /// # Errors
    /// Returns `TimestampError::IndeterminateOffset` when the platform cannot
    /// report the local offset soundly (e.g. other threads are running).
    pub fn local() -> Result<Self, TimestampError> {
        UtcOffset::current_local_offset()
            .map(Self::with_offset)
            .map_err(|_| TimestampError::IndeterminateOffset)
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Parse calendar text such as `2017-07-20 17:25:04.533` or the compact
    /// digit form `20170720172504533000`. `None` yields the current time.
    ///
    /// # Errors
    /// Returns `TimestampError` for foreign characters, more than 20 digits,
    /// impossible calendar values, or instants before the epoch.
    pub fn parse_flexible(&self, text: Option<&str>) -> Result<Timestamp, TimestampError> {
        let text = match text {
            Some(text) => text,
            None => return Ok(now()),
        };
        let digits = canonical_digits(text)?;
        let naive = calendar(&digits).map_err(|source| TimestampError::Calendar {
            text: text.to_string(),
            source,
        })?;

        let anchor = OffsetDateTime::UNIX_EPOCH + Duration::seconds(ANCHOR_SECS);
        let elapsed = naive.assume_offset(self.offset) - anchor;
        let micros =
            elapsed.whole_microseconds() + i128::from(ANCHOR_SECS) * i128::from(MICROS_PER_SECOND);
        let micros = u64::try_from(micros).map_err(|_| TimestampError::BeforeEpoch {
            text: text.to_string(),
        })?;
        Ok(Timestamp::from_micros(micros))
    }

    /// Render as `YYYYMMDD-HHMMSS`, or `YYYYMMDD-HHMMSS-ffffff` with micros.
    pub fn to_compact_text(
        &self,
        ts: Timestamp,
        with_micros: bool,
    ) -> Result<String, TimestampError> {
        let local = self.datetime(ts)?;
        let text = if with_micros {
            let format = format_description!(
                "[year][month][day]-[hour][minute][second]-[subsecond digits:6]"
            );
            local.format(&format)?
        } else {
            let format = format_description!("[year][month][day]-[hour][minute][second]");
            local.format(&format)?
        };
        Ok(text)
    }

    /// Calendar date-time of `ts` in this normalizer's offset.
    pub fn datetime(&self, ts: Timestamp) -> Result<OffsetDateTime, TimestampError> {
        let utc = OffsetDateTime::from_unix_timestamp_nanos(ts.total_micros() * 1_000)?;
        Ok(utc.to_offset(self.offset))
    }
}

/// RFC 3339 rendering in UTC, `None` when out of range.
pub fn to_rfc3339(ts: Timestamp) -> Option<String> {
    OffsetDateTime::from_unix_timestamp_nanos(ts.total_micros() * 1_000)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

fn now() -> Timestamp {
    let micros = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000;
    Timestamp::from_micros(u64::try_from(micros).unwrap_or(0))
}

fn canonical_digits(text: &str) -> Result<String, TimestampError> {
    let mut digits = String::with_capacity(CANONICAL_DIGITS);
    for c in text.chars() {
        if SEPARATORS.contains(&c) {
            continue;
        }
        if !c.is_ascii_digit() {
            return Err(TimestampError::InvalidCharacter {
                text: text.to_string(),
                found: c,
            });
        }
        digits.push(c);
    }
    if digits.is_empty() {
        return Err(TimestampError::Empty);
    }
    if digits.len() > CANONICAL_DIGITS {
        return Err(TimestampError::TooManyDigits {
            text: text.to_string(),
            digits: digits.len(),
            max: CANONICAL_DIGITS,
        });
    }
    Ok(format!("{digits:0<width$}", width = CANONICAL_DIGITS))
}

fn calendar(digits: &str) -> Result<PrimitiveDateTime, time::error::ComponentRange> {
    let field = |range: std::ops::Range<usize>| {
        digits.as_bytes()[range]
            .iter()
            .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'))
    };
    let date = Date::from_calendar_date(
        field(YEAR_RANGE) as i32,
        Month::try_from(field(MONTH_RANGE) as u8)?,
        field(DAY_RANGE) as u8,
    )?;
    let time = Time::from_hms_micro(
        field(HOUR_RANGE) as u8,
        field(MINUTE_RANGE) as u8,
        field(SECOND_RANGE) as u8,
        field(MICROS_RANGE),
    )?;
    Ok(PrimitiveDateTime::new(date, time))
}
