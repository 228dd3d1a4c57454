use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use groupcal_core::api::ApiClient;
use groupcal_core::calendar::{self, NewTask};
use groupcal_core::{GroupId, Session};

use crate::terminal::Terminal;
use crate::utils::tui;

pub fn parse_new_task(
    title: String,
    date: &str,
    start: Option<&str>,
    end: Option<&str>,
    location: Option<String>,
    description: Option<String>,
) -> Result<NewTask> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
    let start_time = start.map(parse_clock).transpose()?;
    let end_time = end.map(parse_clock).transpose()?;

    if let (Some(s), Some(e)) = (start_time, end_time)
        && e <= s
    {
        anyhow::bail!(
            "End time {} is not after start time {}",
            e.format("%H:%M"),
            s.format("%H:%M")
        );
    }

    Ok(NewTask {
        title,
        date,
        start_time,
        end_time,
        location: location.filter(|l| !l.is_empty()),
        description: description.filter(|d| !d.is_empty()),
    })
}

fn parse_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .with_context(|| format!("Invalid time '{}', expected HH:MM", s))
}

pub async fn run(api: ApiClient, group: GroupId, task: NewTask) -> Result<()> {
    let spinner = tui::create_spinner("Checking permissions...");
    let session = Session::resolve(&api, group).await;
    spinner.finish_and_clear();

    let ui = Terminal::new(true);
    calendar::create_task(&api, &session?, &task, &ui).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_times() {
        let task = parse_new_task(
            "Practice".into(),
            "2025-03-20",
            Some("18:00"),
            Some("20:30"),
            Some(String::new()),
            None,
        )
        .unwrap();

        assert_eq!(task.start_time, NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(task.end_time, NaiveTime::from_hms_opt(20, 30, 0));
        assert!(task.location.is_none());
    }

    #[test]
    fn all_day_without_times() {
        let task = parse_new_task("Trip".into(), "2025-03-20", None, None, None, None).unwrap();
        assert!(task.start_time.is_none());
        assert!(task.end_time.is_none());
    }

    #[test]
    fn rejects_end_before_start() {
        let parsed = parse_new_task(
            "x".into(),
            "2025-03-20",
            Some("18:00"),
            Some("17:00"),
            None,
            None,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_bad_formats() {
        assert!(parse_new_task("x".into(), "03/20", None, None, None, None).is_err());
        assert!(parse_new_task("x".into(), "2025-03-20", Some("6pm"), None, None, None).is_err());
    }
}
