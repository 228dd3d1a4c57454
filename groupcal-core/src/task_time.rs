//! Time values found on tasks.
//!
//! The backend stores whatever the client sent: bare dates for all-day
//! tasks, naive local date-times from the create form, and UTC instants
//! from reschedules. `TaskTime` keeps that distinction instead of forcing
//! everything into one representation.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use crate::error::{GroupCalError, GroupCalResult};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTime {
    /// All-day (YYYY-MM-DD)
    Date(NaiveDate),
    /// Wall-clock time without zone information
    Floating(NaiveDateTime),
    /// An instant with an explicit offset, normalized to UTC
    Utc(DateTime<Utc>),
}

impl TaskTime {
    pub fn parse(s: &str) -> GroupCalResult<Self> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(TaskTime::Utc(dt.with_timezone(&Utc)));
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(TaskTime::Floating(dt));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(TaskTime::Date)
            .map_err(|_| GroupCalError::InvalidTime(s.to_string()))
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, TaskTime::Date(_))
    }

    /// Calendar day in the local timezone.
    pub fn local_date(&self) -> NaiveDate {
        match self {
            TaskTime::Date(d) => *d,
            TaskTime::Floating(dt) => dt.date(),
            TaskTime::Utc(dt) => dt.with_timezone(&Local).date_naive(),
        }
    }

    /// Local wall-clock value used for ordering; all-day sorts first.
    pub fn sort_key(&self) -> NaiveDateTime {
        match self {
            TaskTime::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            TaskTime::Floating(dt) => *dt,
            TaskTime::Utc(dt) => dt.with_timezone(&Local).naive_local(),
        }
    }

    /// "HH:MM" in local time, or "all-day".
    pub fn time_label(&self) -> String {
        match self {
            TaskTime::Date(_) => "all-day".to_string(),
            TaskTime::Floating(dt) => dt.format("%H:%M").to_string(),
            TaskTime::Utc(dt) => dt.with_timezone(&Local).format("%H:%M").to_string(),
        }
    }
}

impl fmt::Display for TaskTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskTime::Date(d) => write!(f, "{}", d.format("%a %b %-d")),
            _ => write!(
                f,
                "{} {}",
                self.local_date().format("%a %b %-d"),
                self.time_label()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_day() {
        let t = TaskTime::parse("2025-03-20").unwrap();
        assert_eq!(t, TaskTime::Date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()));
        assert!(t.is_all_day());
        assert_eq!(t.time_label(), "all-day");
    }

    #[test]
    fn parses_form_datetime_as_floating() {
        let t = TaskTime::parse("2025-03-20T15:00:00").unwrap();
        assert!(matches!(t, TaskTime::Floating(_)));
        assert_eq!(t.time_label(), "15:00");
    }

    #[test]
    fn parses_iso_utc() {
        let t = TaskTime::parse("2025-03-20T06:00:00.000Z").unwrap();
        let expected: DateTime<Utc> = "2025-03-20T06:00:00Z".parse().unwrap();
        assert_eq!(t, TaskTime::Utc(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            TaskTime::parse("next week"),
            Err(GroupCalError::InvalidTime(_))
        ));
    }

    #[test]
    fn all_day_sorts_before_timed_on_same_day() {
        let all_day = TaskTime::parse("2025-03-20").unwrap();
        let timed = TaskTime::parse("2025-03-20T00:30").unwrap();
        assert!(all_day.sort_key() < timed.sort_key());
    }
}
