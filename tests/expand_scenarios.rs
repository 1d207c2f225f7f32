use chrono::NaiveDate;
use event_recurrence::{
    expand, expand_dates, generate_recurring_events, Frequency, RecurrenceError, RecurrenceRule,
    RecurrenceRuleSpec,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rule_from(frequency: &str, interval: i64, exceptions: &[&str]) -> RecurrenceRule {
    RecurrenceRule::try_from(RecurrenceRuleSpec {
        frequency: frequency.to_string(),
        interval,
        by_weekday: None,
        exceptions: Some(exceptions.iter().map(|s| s.to_string()).collect()),
    })
    .unwrap()
}

#[test]
fn daily_with_exceptions() {
    let rule = rule_from("daily", 1, &["2023-10-03", "2023-10-05"]);
    let events = generate_recurring_events("2023-10-01", "2023-10-07", &rule).unwrap();
    assert_eq!(
        events,
        vec!["2023-10-01", "2023-10-02", "2023-10-04", "2023-10-06", "2023-10-07"]
    );
}

#[test]
fn weekly_on_monday_with_exception() {
    let rule = RecurrenceRule::try_from(RecurrenceRuleSpec {
        frequency: "weekly".into(),
        interval: 1,
        by_weekday: Some(vec!["MO".into()]),
        exceptions: Some(vec!["2023-10-09".into()]),
    })
    .unwrap();
    let events = generate_recurring_events("2023-10-02", "2023-10-30", &rule).unwrap();
    assert_eq!(
        events,
        vec!["2023-10-02", "2023-10-16", "2023-10-23", "2023-10-30"]
    );
}

#[test]
fn monthly_with_exception() {
    let rule = rule_from("monthly", 1, &["2023-11-15"]);
    let events = generate_recurring_events("2023-10-15", "2024-01-15", &rule).unwrap();
    assert_eq!(events, vec!["2023-10-15", "2023-12-15", "2024-01-15"]);
}

#[test]
fn yearly_with_exception() {
    let rule = rule_from("yearly", 1, &["2024-12-25"]);
    let events = generate_recurring_events("2023-12-25", "2025-12-25", &rule).unwrap();
    assert_eq!(events, vec!["2023-12-25", "2025-12-25"]);
}

#[test]
fn unsupported_frequency_fails_before_expansion() {
    let err = RecurrenceRule::try_from(RecurrenceRuleSpec {
        frequency: "hourly".into(),
        interval: 1,
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(
        err,
        RecurrenceError::UnsupportedFrequency {
            value: "hourly".into()
        }
    );
}

#[test]
fn exception_with_time_of_day_matches() {
    let rule = rule_from("daily", 1, &["2023-10-02T15:30:00", "2023-10-03T00:00:00Z"]);
    let events = generate_recurring_events("2023-10-01", "2023-10-04", &rule).unwrap();
    assert_eq!(events, vec!["2023-10-01", "2023-10-04"]);
}

#[test]
fn by_weekday_does_not_filter() {
    // Start is a Monday; WE is carried but steps stay on Mondays.
    let rule = RecurrenceRule::try_from(RecurrenceRuleSpec {
        frequency: "weekly".into(),
        interval: 1,
        by_weekday: Some(vec!["WE".into()]),
        exceptions: None,
    })
    .unwrap();
    let events = generate_recurring_events("2023-10-02", "2023-10-16", &rule).unwrap();
    assert_eq!(events, vec!["2023-10-02", "2023-10-09", "2023-10-16"]);
}

#[test]
fn containment_and_ordering_hold_for_every_frequency() {
    let (start, end) = (ymd(2019, 1, 31), ymd(2026, 3, 1));
    let exceptions = [ymd(2020, 2, 29), ymd(2021, 5, 28), ymd(2024, 1, 31)];
    for frequency in Frequency::ALL {
        for interval in [1, 2, 5] {
            let rule = RecurrenceRule::new(frequency, interval)
                .unwrap()
                .with_exceptions(exceptions);
            let dates = expand_dates(start, end, &rule);
            assert!(!dates.is_empty(), "{frequency}/{interval}");
            assert_eq!(dates[0], start, "{frequency}/{interval}");
            assert!(dates.iter().all(|d| (start..=end).contains(d)));
            assert!(dates.windows(2).all(|w| w[0] < w[1]));
            assert!(dates.iter().all(|d| !exceptions.contains(d)));
        }
    }
}

#[test]
fn occurrences_follow_the_stepping_chain() {
    let rule = RecurrenceRule::new(Frequency::Monthly, 2)
        .unwrap()
        .with_exceptions([ymd(2023, 5, 31)]);
    let dates = expand_dates(ymd(2023, 1, 31), ymd(2023, 12, 31), &rule);

    let mut chain = Vec::new();
    let mut cursor = Some(ymd(2023, 1, 31));
    while let Some(date) = cursor.filter(|d| *d <= ymd(2023, 12, 31)) {
        chain.push(date);
        cursor = rule.advance(date);
    }
    let expected: Vec<NaiveDate> = chain.into_iter().filter(|d| !rule.is_exception(*d)).collect();
    assert_eq!(dates, expected);
}

#[test]
fn expansion_is_deterministic() {
    let rule = rule_from("weekly", 3, &["2024-03-04"]);
    let (start, end) = (ymd(2024, 1, 1), ymd(2024, 12, 31));
    assert_eq!(expand(start, end, &rule), expand(start, end, &rule));
}

#[test]
fn reversed_window_is_empty_not_an_error() {
    let rule = rule_from("daily", 1, &[]);
    let events = generate_recurring_events("2023-10-07", "2023-10-01", &rule).unwrap();
    assert!(events.is_empty());
}
