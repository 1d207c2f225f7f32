//! Recurrence rule model: frequency tags, the increment table, weekday codes
//! and the validated rule value object.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::{RecurrenceError, Result};
use crate::utils::parse_exception_date;

/// Recurrence cadence unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Advance `date` by `interval` units of this frequency.
    ///
    /// Monthly and yearly steps clamp a missing day-of-month to the last day
    /// of the target month (Jan 31 + 1 month = Feb 28/29, Feb 29 + 1 year =
    /// Feb 28). Returns `None` once the result leaves chrono's date range.
    pub fn advance(self, date: NaiveDate, interval: NonZeroU32) -> Option<NaiveDate> {
        let n = interval.get();
        match self {
            Frequency::Daily => date.checked_add_days(Days::new(u64::from(n))),
            Frequency::Weekly => date.checked_add_days(Days::new(u64::from(n) * 7)),
            Frequency::Monthly => date.checked_add_months(Months::new(n)),
            Frequency::Yearly => date.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| RecurrenceError::UnsupportedFrequency {
                value: s.to_string(),
            })
    }
}

/// Parse a two-letter weekday code (`MO`..`SU`), case-insensitively.
pub fn parse_weekday_code(code: &str) -> Result<Weekday> {
    match code.trim().to_ascii_uppercase().as_str() {
        "MO" => Ok(Weekday::Mon),
        "TU" => Ok(Weekday::Tue),
        "WE" => Ok(Weekday::Wed),
        "TH" => Ok(Weekday::Thu),
        "FR" => Ok(Weekday::Fri),
        "SA" => Ok(Weekday::Sat),
        "SU" => Ok(Weekday::Sun),
        _ => Err(RecurrenceError::InvalidWeekday {
            code: code.to_string(),
        }),
    }
}

pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Wire form of a recurrence rule, as received in JSON or config.
///
/// Nothing is validated here; convert with `RecurrenceRule::try_from`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRuleSpec {
    pub frequency: String,
    pub interval: i64,
    #[serde(default)]
    pub by_weekday: Option<Vec<String>>,
    #[serde(default)]
    pub exceptions: Option<Vec<String>>,
}

/// Validated recurrence rule.
///
/// `by_weekday` is kept for callers that want to inspect it. Expansion does
/// not filter on it: weekly steps add whole weeks, so the start date's
/// weekday is what repeats.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RecurrenceRuleSpec")]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: NonZeroU32,
    by_weekday: Vec<Weekday>,
    exceptions: HashSet<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, interval: u32) -> Result<Self> {
        let interval = NonZeroU32::new(interval).ok_or(RecurrenceError::InvalidInterval {
            interval: i64::from(interval),
        })?;
        Ok(Self {
            frequency,
            interval,
            by_weekday: Vec::new(),
            exceptions: HashSet::new(),
        })
    }

    pub fn with_exceptions<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.exceptions.extend(dates);
        self
    }

    /// Attach weekday codes; repeats are dropped, first-seen order kept.
    pub fn with_by_weekday<I>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        for day in days {
            if !self.by_weekday.contains(&day) {
                self.by_weekday.push(day);
            }
        }
        self
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> NonZeroU32 {
        self.interval
    }

    pub fn by_weekday(&self) -> &[Weekday] {
        &self.by_weekday
    }

    pub fn exceptions(&self) -> &HashSet<NaiveDate> {
        &self.exceptions
    }

    pub fn is_exception(&self, date: NaiveDate) -> bool {
        self.exceptions.contains(&date)
    }

    /// Step `date` forward by one interval of this rule's frequency.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.frequency.advance(date, self.interval)
    }
}

impl TryFrom<RecurrenceRuleSpec> for RecurrenceRule {
    type Error = RecurrenceError;

    fn try_from(spec: RecurrenceRuleSpec) -> Result<Self> {
        let frequency: Frequency = spec.frequency.parse()?;
        let interval = u32::try_from(spec.interval)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(RecurrenceError::InvalidInterval {
                interval: spec.interval,
            })?;
        let by_weekday = spec
            .by_weekday
            .unwrap_or_default()
            .iter()
            .map(|code| parse_weekday_code(code))
            .collect::<Result<Vec<_>>>()?;
        let exceptions = spec
            .exceptions
            .unwrap_or_default()
            .iter()
            .map(|raw| parse_exception_date(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(RecurrenceRule::new(frequency, interval.get())?
            .with_by_weekday(by_weekday)
            .with_exceptions(exceptions))
    }
}
