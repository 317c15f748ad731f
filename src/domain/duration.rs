//! Parsing of human-entered borrow durations.
//!
//! Accepted forms (case-insensitive, surrounding whitespace ignored):
//! - `"5"` -> 5 days
//! - `"10 days"` -> 10 days
//! - `"2 weeks"` -> 14 days
//! - `"1 month"` -> 30 days
//!
//! No positivity check happens here; `Item::borrow` rejects non-positive values.

use thiserror::Error;

/// Days in a week
pub const DAYS_PER_WEEK: i64 = 7;

/// Days in a month (flat, no calendar)
pub const DAYS_PER_MONTH: i64 = 30;

/// The duration string could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid duration format: '{input}'")]
pub struct InvalidDurationFormat {
    /// Input exactly as the caller supplied it
    pub input: String,
}

impl InvalidDurationFormat {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Parse a duration string into a day count
pub fn parse_duration(input: &str) -> Result<i64, InvalidDurationFormat> {
    let normalized = input.trim().to_lowercase();

    if !normalized.is_empty() && normalized.chars().all(|c| c.is_ascii_digit()) {
        return normalized
            .parse::<i64>()
            .map_err(|_| InvalidDurationFormat::new(input));
    }

    let multiplier = if normalized.contains("day") {
        1
    } else if normalized.contains("week") {
        DAYS_PER_WEEK
    } else if normalized.contains("month") {
        DAYS_PER_MONTH
    } else {
        return Err(InvalidDurationFormat::new(input));
    };

    let count = normalized
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<i64>().ok())
        .ok_or_else(|| InvalidDurationFormat::new(input))?;

    count
        .checked_mul(multiplier)
        .ok_or_else(|| InvalidDurationFormat::new(input))
}
