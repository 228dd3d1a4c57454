use anyhow::Result;
use groupcal_core::api::ApiClient;
use groupcal_core::view::GroupView;
use groupcal_core::{GroupId, TaskId};
use owo_colors::OwoColorize;

use crate::render::render_participants;
use crate::utils::tui;

pub async fn run(api: ApiClient, group: GroupId, task_id: TaskId) -> Result<()> {
    let view = GroupView::new(api, group);

    let spinner = tui::create_spinner("Loading task...");
    let (session, tasks) = tokio::join!(view.refresh_session(), view.refresh_tasks());
    spinner.finish_and_clear();

    let tasks = tasks?;
    let Some(task) = tasks.iter().find(|t| t.task_id == task_id) else {
        anyhow::bail!("Task {} not found in group {}", task_id, group);
    };
    let me = session.ok().map(|s| s.user);

    println!("{}", task.title.bold());

    let when = match (task.start(), task.end()) {
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        (Some(start), None) => start.to_string(),
        _ => "(no date)".to_string(),
    };
    println!("{}", when.dimmed());
    println!();

    if let Some(location) = &task.location {
        println!("{} {}", "Where:".dimmed(), location);
    }
    println!(
        "{} {}",
        "Details:".dimmed(),
        task.description.as_deref().unwrap_or("No details")
    );
    println!();

    println!("{}", render_participants(&task.reactions_for(me.as_ref())));

    Ok(())
}
