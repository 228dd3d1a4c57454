//! Terminal rendering for groupcal-core types.

use groupcal_core::members::MemberList;
use groupcal_core::reaction::ReactionSummary;
use groupcal_core::{Membership, ReactionKind, Task};
use owo_colors::OwoColorize;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ReactionKind {
    fn render(&self) -> String {
        match self {
            ReactionKind::Join => "✓ joining".green().to_string(),
            ReactionKind::Absent => "✗ absent".red().to_string(),
            ReactionKind::Undecided => "undecided".dimmed().to_string(),
        }
    }
}

impl Render for Membership {
    fn render(&self) -> String {
        let mut line = format!(
            "({}) {}",
            self.initial(),
            self.user_name.as_deref().unwrap_or("(no name)").bold()
        );
        if self.is_representative {
            line.push_str(&format!(" {}", "[admin]".magenta()));
        }
        if let Some(email) = &self.email {
            line.push_str(&format!(" {}", email.dimmed()));
        }
        if let Some(id) = self.user_id {
            line.push_str(&format!(" {}", format!("#{}", id).dimmed()));
        }
        line
    }
}

impl Render for Task {
    fn render(&self) -> String {
        let time = self
            .start()
            .map(|t| t.time_label())
            .unwrap_or_else(|| "??:??".to_string());
        let mut line = format!("{:>7} {}", time, self.title);
        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }
        line.push_str(&format!(" {}", format!("#{}", self.task_id).dimmed()));
        line
    }
}

/// Render a member list. The requests section only appears for
/// administrators.
pub fn render_member_list(list: &MemberList, is_admin: bool) -> String {
    let mut lines = vec![format!("{} ({})", "Members".bold(), list.members.len())];

    if list.members.is_empty() {
        lines.push(format!("   {}", "No members".dimmed()));
    }
    for member in &list.members {
        lines.push(format!("   {}", member.render()));
    }

    if is_admin {
        lines.push(String::new());
        lines.push(format!("{} ({})", "Join requests".bold(), list.requests.len()));
        if list.requests.is_empty() {
            lines.push(format!("   {}", "No pending requests".dimmed()));
        }
        for request in &list.requests {
            lines.push(format!("   {}", request.render()));
        }
    }

    lines.join("\n")
}

/// Participants section of a task.
pub fn render_participants(summary: &ReactionSummary<'_>) -> String {
    let mut lines = vec![format!(
        "{} ({})",
        "Going".bold(),
        summary.joined_members.len()
    )];

    if summary.joined_members.is_empty() {
        lines.push(format!("   {}", "Nobody has joined yet".dimmed().italic()));
    }
    for user in &summary.joined_members {
        lines.push(format!("   ({}) {}", user.initial(), user.display_name()));
    }

    lines.push(String::new());
    lines.push(format!("Your reaction: {}", summary.my_status.render()));
    lines.join("\n")
}
