use anyhow::Result;
use groupcal_core::api::ApiClient;
use groupcal_core::members::{self, MemberChange};
use groupcal_core::membership::find_member;
use groupcal_core::{GroupId, UserId};

use crate::render::render_member_list;
use crate::terminal::Terminal;

pub async fn run(api: ApiClient, group: GroupId, user_id: UserId, grant: bool) -> Result<()> {
    let (session, list) = members::load(&api, group).await?;

    let Some(target) = find_member(&list.members, user_id) else {
        let available: Vec<_> = list
            .members
            .iter()
            .filter_map(|m| m.user_id.map(|id| format!("{} ({})", id, m.display_name())))
            .collect();
        anyhow::bail!(
            "User {} is not a member of group {}. Members: {}",
            user_id,
            group,
            available.join(", ")
        );
    };

    if target.is_representative == grant {
        println!(
            "{} {} an administrator",
            target.display_name(),
            if grant { "is already" } else { "is not" }
        );
        return Ok(());
    }

    let ui = Terminal::new(true);
    if let MemberChange::Applied(list) =
        members::set_representative(&api, &session, target, grant, &ui).await?
    {
        println!();
        println!("{}", render_member_list(&list, session.is_admin));
    }
    Ok(())
}
