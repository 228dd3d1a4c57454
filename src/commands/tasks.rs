use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use groupcal_core::api::ApiClient;
use groupcal_core::view::GroupView;
use groupcal_core::{GroupId, ReactionKind, Task};
use owo_colors::OwoColorize;
use tracing::warn;

use crate::render::Render;
use crate::utils::tui;

/// Days shown when --to is not given.
const DEFAULT_SPAN_DAYS: i64 = 30;

pub async fn run(
    api: ApiClient,
    group: GroupId,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let from = match from {
        Some(s) => parse_day(s)?,
        None => Local::now().date_naive(),
    };
    let to = match to {
        Some(s) => parse_day(s)?,
        None => from + Duration::days(DEFAULT_SPAN_DAYS),
    };

    let view = GroupView::new(api, group);

    let spinner = tui::create_spinner("Loading tasks...");
    let (session, tasks) = tokio::join!(view.refresh_session(), view.refresh_tasks());
    spinner.finish_and_clear();

    let tasks = tasks?;
    let me = match session {
        Ok(session) => Some(session.user),
        Err(e) => {
            warn!(error = %e, "showing tasks without your reactions");
            None
        }
    };

    let mut in_range: Vec<&Task> = tasks
        .iter()
        .filter(|t| {
            t.start()
                .is_some_and(|s| (from..=to).contains(&s.local_date()))
        })
        .collect();
    in_range.sort_by_key(|t| t.start().map(|s| s.sort_key()));

    if in_range.is_empty() {
        println!("{}", "No tasks found".dimmed());
        return Ok(());
    }

    let mut current_date: Option<NaiveDate> = None;

    for task in in_range {
        let Some(start) = task.start() else { continue };
        let date = start.local_date();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date).bold());
            current_date = Some(date);
        }

        let summary = task.reactions_for(me.as_ref());
        let mut line = format!("  {}", task.render());
        if summary.my_status != ReactionKind::Undecided {
            line.push_str(&format!(" {}", summary.my_status.render()));
        }
        if !summary.joined_members.is_empty() {
            line.push_str(&format!(
                " {}",
                format!("({} going)", summary.joined_members.len()).dimmed()
            ));
        }
        println!("{}", line);
    }

    Ok(())
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
