use std::iter::FusedIterator;

use chrono::NaiveDate;

use crate::error::{RecurrenceError, Result};
use crate::rule::RecurrenceRule;
use crate::utils::{format_calendar_date, parse_calendar_date};

/// Upper bounds applied while expanding a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Fail once more than this many occurrences would be emitted.
    pub max_occurrences: Option<usize>,
}

impl ExpansionLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_occurrences(max: usize) -> Self {
        Self {
            max_occurrences: Some(max),
        }
    }
}

/// Lazy walk over the occurrences of a rule inside `[start, end]`.
///
/// The cursor only ever moves forward by one rule interval, so the output
/// is strictly ascending. Exceptions are skipped without moving the cadence.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
    rule: &'a RecurrenceRule,
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            let current = self.cursor.filter(|date| *date <= self.end)?;
            self.cursor = self.rule.advance(current);
            if !self.rule.is_exception(current) {
                return Some(current);
            }
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

/// Occurrences of `rule` from `start` up to and including `end`.
///
/// A window with `start > end` yields nothing.
pub fn occurrences(start: NaiveDate, end: NaiveDate, rule: &RecurrenceRule) -> Occurrences<'_> {
    Occurrences {
        cursor: Some(start),
        end,
        rule,
    }
}

pub fn expand_dates(start: NaiveDate, end: NaiveDate, rule: &RecurrenceRule) -> Vec<NaiveDate> {
    occurrences(start, end, rule).collect()
}

/// Expand into `YYYY-MM-DD` strings.
pub fn expand(start: NaiveDate, end: NaiveDate, rule: &RecurrenceRule) -> Vec<String> {
    occurrences(start, end, rule)
        .map(format_calendar_date)
        .collect()
}

/// Expand, failing instead of truncating when `limits` would be exceeded.
pub fn expand_bounded(
    start: NaiveDate,
    end: NaiveDate,
    rule: &RecurrenceRule,
    limits: ExpansionLimits,
) -> Result<Vec<NaiveDate>> {
    let Some(limit) = limits.max_occurrences else {
        return Ok(expand_dates(start, end, rule));
    };
    let dates: Vec<NaiveDate> = occurrences(start, end, rule)
        .take(limit.saturating_add(1))
        .collect();
    if dates.len() > limit {
        return Err(RecurrenceError::TooManyOccurrences { limit });
    }
    Ok(dates)
}

/// Expand a rule over a textual window (`YYYY-MM-DD` bounds).
pub fn generate_recurring_events(
    start: &str,
    end: &str,
    rule: &RecurrenceRule,
) -> Result<Vec<String>> {
    let start = parse_calendar_date(start)?;
    let end = parse_calendar_date(end)?;
    Ok(expand(start, end, rule))
}
