use anyhow::Result;
use groupcal_core::GroupId;
use groupcal_core::api::ApiClient;
use groupcal_core::view::GroupView;

use crate::render::render_member_list;
use crate::utils::tui;

pub async fn run(api: ApiClient, group: GroupId) -> Result<()> {
    let view = GroupView::new(api, group);

    let spinner = tui::create_spinner("Loading members...");
    let result = view.refresh_members().await;
    spinner.finish_and_clear();

    let list = result?;
    println!("{}", render_member_list(&list, view.is_admin()));

    Ok(())
}
