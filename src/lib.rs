//! Recurrence expansion for calendar events.
//!
//! A [`RecurrenceRule`] (frequency, interval, optional weekday codes and
//! exception dates) expands into the ascending calendar dates it occurs on
//! inside an inclusive window:
//!
//! ```
//! use chrono::NaiveDate;
//! use event_recurrence::{expand, Frequency, RecurrenceRule};
//!
//! let rule = RecurrenceRule::new(Frequency::Daily, 1)
//!     .unwrap()
//!     .with_exceptions([NaiveDate::from_ymd_opt(2023, 10, 3).unwrap()]);
//! let start = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2023, 10, 4).unwrap();
//! assert_eq!(expand(start, end, &rule), ["2023-10-01", "2023-10-02", "2023-10-04"]);
//! ```
//!
//! The [`calendars`] module aggregates calendar-provider listings and is not
//! used by expansion. [`http`] serves expansion over axum.

pub mod calendars;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod recurrence;
pub mod rule;
pub mod utils;

pub use error::RecurrenceError;
pub use recurrence::{
    expand, expand_bounded, expand_dates, generate_recurring_events, occurrences,
    ExpansionLimits, Occurrences,
};
pub use rule::{Frequency, RecurrenceRule, RecurrenceRuleSpec};
