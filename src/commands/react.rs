use anyhow::Result;
use groupcal_core::api::ApiClient;
use groupcal_core::calendar;
use groupcal_core::{GroupId, ReactionKind, TaskId};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::terminal::Terminal;
use crate::utils::tui;

pub async fn run(
    api: ApiClient,
    group: GroupId,
    task_id: TaskId,
    reaction: ReactionKind,
    comment: Option<String>,
) -> Result<()> {
    let ui = Terminal::new(true);

    let spinner = tui::create_spinner("Saving your reaction...");
    let result = calendar::submit_reaction(&api, group, task_id, reaction, comment, &ui).await;
    spinner.finish_and_clear();
    let tasks = result?;

    let Some(task) = tasks.iter().find(|t| t.task_id == task_id) else {
        println!("{}", format!("Saved: {}", reaction.as_str()).green());
        return Ok(());
    };

    let me = api.me().await.ok();
    let summary = task.reactions_for(me.as_ref());
    println!(
        "{}: {} {}",
        task.title.bold(),
        summary.my_status.render(),
        format!("({} going)", summary.joined_members.len()).dimmed()
    );

    Ok(())
}
