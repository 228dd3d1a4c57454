use anyhow::Result;
use groupcal_core::GroupId;
use groupcal_core::api::ApiClient;
use groupcal_core::view::GroupView;
use owo_colors::OwoColorize;

use crate::utils::tui;

pub async fn run(api: ApiClient, group: GroupId) -> Result<()> {
    let view = GroupView::new(api, group);

    let spinner = tui::create_spinner("Checking your membership...");
    let result = view.refresh_session().await;
    spinner.finish_and_clear();

    let session = match result {
        Ok(session) => session,
        Err(e) if e.is_unauthorized() => anyhow::bail!(
            "{}\n\nSet an access token with GROUPCAL_TOKEN or in the config file.",
            e
        ),
        Err(e) => return Err(e.into()),
    };

    println!(
        "Signed in as {} {}",
        session.user.display_name().bold(),
        format!("(user {})", session.user.user_id).dimmed()
    );

    if view.is_admin() {
        println!("You are an {} of group {}", "administrator".magenta(), group);
    } else {
        println!("You are a member of group {}", group);
    }

    Ok(())
}
