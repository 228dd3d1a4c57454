use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use groupcal_core::api::ApiClient;
use groupcal_core::calendar::{self, RescheduleOutcome, RevertReason};
use groupcal_core::task_time::TaskTime;
use groupcal_core::{GroupId, Session, TaskId};
use owo_colors::OwoColorize;

use crate::terminal::Terminal;
use crate::utils::tui;

pub async fn run(
    api: ApiClient,
    group: GroupId,
    task_id: TaskId,
    start: &str,
    end: Option<&str>,
    yes: bool,
) -> Result<()> {
    let start = parse_instant(start)?;
    let end = end.map(parse_instant).transpose()?;
    if let Some(end) = end
        && end <= start
    {
        anyhow::bail!("End must be after start");
    }

    let spinner = tui::create_spinner("Loading task...");
    let (session, tasks) = tokio::join!(Session::resolve(&api, group), api.tasks(group));
    spinner.finish_and_clear();

    let session = session?;
    let tasks = tasks?;
    let Some(task) = tasks.iter().find(|t| t.task_id == task_id) else {
        anyhow::bail!("Task {} not found in group {}", task_id, group);
    };

    let ui = Terminal::new(yes);
    match calendar::reschedule_task(&api, &session, task, start, end, &ui).await? {
        RescheduleOutcome::Applied(_) => {
            println!("{}", format!("Rescheduled: {}", task.title).green());
            Ok(())
        }
        RescheduleOutcome::Reverted(RevertReason::Cancelled) => {
            println!("{}", "Nothing changed".dimmed());
            Ok(())
        }
        RescheduleOutcome::Reverted(RevertReason::NotAdministrator) => {
            anyhow::bail!("Only group administrators can reschedule tasks")
        }
        RescheduleOutcome::Reverted(RevertReason::Failed(_)) => {
            anyhow::bail!("\"{}\" keeps its previous time", task.title)
        }
    }
}

/// Parse a command-line time. Values without an offset are local time;
/// a bare date means local midnight.
fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    let local = match TaskTime::parse(s)? {
        TaskTime::Utc(dt) => return Ok(dt),
        TaskTime::Floating(dt) => dt,
        TaskTime::Date(d) => d.and_time(chrono::NaiveTime::MIN),
    };

    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("'{}' does not exist in the local timezone", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_is_taken_as_is() {
        let dt = parse_instant("2025-03-21T09:00:00+09:00").unwrap();
        assert_eq!(dt, "2025-03-21T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn local_time_round_trips() {
        let dt = parse_instant("2025-03-21T09:00").unwrap();
        assert_eq!(dt.with_timezone(&Local).format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_instant("soon").is_err());
    }
}
