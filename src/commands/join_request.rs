use anyhow::Result;
use groupcal_core::GroupId;
use groupcal_core::api::ApiClient;
use groupcal_core::members::{self, JoinAction, MemberChange};
use owo_colors::OwoColorize;

use crate::render::render_member_list;
use crate::terminal::Terminal;

pub async fn run(
    api: ApiClient,
    group: GroupId,
    identifier: &str,
    action: JoinAction,
    yes: bool,
) -> Result<()> {
    let (session, list) = members::load(&api, group).await?;

    if session.is_admin && !list.requests.iter().any(|r| r.identifier() == identifier) {
        println!(
            "{}",
            format!("No pending request from {} is listed; sending anyway", identifier).dimmed()
        );
    }

    let ui = Terminal::new(yes);
    match members::answer_join_request(&api, &session, identifier, action, &ui).await? {
        MemberChange::Applied(list) => {
            println!();
            println!("{}", render_member_list(&list, session.is_admin));
        }
        MemberChange::AppliedUnrefreshed => {}
        MemberChange::Declined => println!("{}", "Nothing changed".dimmed()),
    }

    Ok(())
}
