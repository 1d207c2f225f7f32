//! Error types for recurrence rules and their expansion.

/// Errors raised while building a recurrence rule or expanding it.
///
/// All variants are configuration errors surfaced directly to the caller.
/// Nothing here is retried or recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurrenceError {
    /// Frequency tag outside daily/weekly/monthly/yearly.
    #[error("unsupported recurrence frequency: {value}")]
    UnsupportedFrequency { value: String },

    /// Interval of zero or below.
    #[error("invalid recurrence interval: {interval} (must be a positive integer)")]
    InvalidInterval { interval: i64 },

    /// Weekday code other than MO..SU.
    #[error("invalid weekday code: {code} (expected one of MO, TU, WE, TH, FR, SA, SU)")]
    InvalidWeekday { code: String },

    /// Text that does not carry a calendar date.
    #[error("invalid calendar date: {input:?} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    /// The window holds more occurrences than the configured cap.
    #[error("recurrence expands to more than {limit} occurrences")]
    TooManyOccurrences { limit: usize },
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
