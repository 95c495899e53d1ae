//! Error types.
//!
//! Calendar lookups fail with [`RangeError`], malformed charts and textual
//! input fail with [`ValidationError`]. [`Error`] wraps both.

use thiserror::Error;

use crate::chinese::Month;

/// A calendar value outside what the lunisolar table (or the Gregorian
/// calendar) can represent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum RangeError {
    /// Year not covered by the lunisolar table (1900..=2049).
    #[error("year {0} is outside the lunar table (1900..=2049)")]
    Year(i32),
    #[error("month {0} not in 1..=12")]
    Month(u32),
    #[error("day {0} not in 1..=30")]
    Day(u32),
    /// Day past the last day of a month that only has `len` days.
    #[error("day {day} exceeds the {len} days of lunar month {month:?}")]
    DayOfMonth { month: Month, day: u32, len: u32 },
    /// The year has no such leap month.
    #[error("year {year} has no leap month {month}")]
    NoLeapMonth { year: i32, month: u32 },
    /// Not a valid Gregorian date, or one outside the supported range.
    #[error("invalid gregorian date {year:04}-{month:02}-{day:02}")]
    Gregorian { year: i32, month: i32, day: i32 },
    /// A civil date outside the span covered by the lunar table.
    #[error("date {0} is outside the lunar table")]
    OutsideTable(crate::date::Date),
}

/// Input that is not a well-formed chart or cannot be parsed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("chart has {0} symbols, expected 8")]
    Length(usize),
    #[error("unknown symbol {symbol:?} at position {position}")]
    UnknownSymbol { position: usize, symbol: String },
    #[error("expected a heavenly stem at position {position}, found {symbol:?}")]
    ExpectedStem { position: usize, symbol: String },
    #[error("expected an earthly branch at position {position}, found {symbol:?}")]
    ExpectedBranch { position: usize, symbol: String },
    /// Text that does not follow the expected layout.
    #[error("cannot parse {input:?}, expected {expected}")]
    Format {
        input: String,
        expected: &'static str,
    },
}

impl ValidationError {
    pub(crate) fn format(input: &str, expected: &'static str) -> Self {
        Self::Format {
            input: input.to_owned(),
            expected,
        }
    }
}

/// Any error returned by this crate.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
