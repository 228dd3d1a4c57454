mod commands;
mod render;
mod terminal;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use groupcal_core::api::ApiClient;
use groupcal_core::config::GroupCalConfig;
use groupcal_core::members::JoinAction;
use groupcal_core::{GroupId, ReactionKind, TaskId, UserId};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "groupcal")]
#[command(about = "View your group's calendar, react to events and manage members")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show who you are signed in as and your role in the group
    Whoami {
        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// List members, and pending join requests if you are an administrator
    Members {
        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// Approve a pending join request (by email or user id)
    Approve {
        identifier: String,

        #[arg(short, long)]
        group: Option<GroupId>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Reject a pending join request (by email or user id)
    Reject {
        identifier: String,

        #[arg(short, long)]
        group: Option<GroupId>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Make a member an administrator
    Promote {
        user_id: UserId,

        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// Remove a member's administrator rights
    Demote {
        user_id: UserId,

        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// Show the group's tasks, grouped by day
    Tasks {
        #[arg(short, long)]
        group: Option<GroupId>,

        /// First day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        from: Option<String>,

        /// Last day to show (YYYY-MM-DD, default 30 days from the first)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show a task with its participants and your reaction
    Show {
        task_id: TaskId,

        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// Create a task (administrators only)
    New {
        title: String,

        /// Day of the task (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Start time (HH:MM); omit for an all-day task
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// Move or resize a task (administrators only)
    Move {
        task_id: TaskId,

        /// New start (YYYY-MM-DDTHH:MM local time, or RFC 3339)
        #[arg(short, long)]
        start: String,

        /// New end (same formats as --start)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        group: Option<GroupId>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Join or skip a task
    React {
        task_id: TaskId,

        /// join, absent or undecided
        reaction: ReactionKind,

        #[arg(short, long)]
        comment: Option<String>,

        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// Show configuration paths and values
    Config {
        /// Store a default group for commands run without --group
        #[arg(long)]
        default_group: Option<GroupId>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Whoami { group } => {
            let (api, group) = connect(group)?;
            commands::whoami::run(api, group).await
        }
        Commands::Members { group } => {
            let (api, group) = connect(group)?;
            commands::members::run(api, group).await
        }
        Commands::Approve {
            identifier,
            group,
            yes,
        } => {
            let (api, group) = connect(group)?;
            commands::join_request::run(api, group, &identifier, JoinAction::Approve, yes).await
        }
        Commands::Reject {
            identifier,
            group,
            yes,
        } => {
            let (api, group) = connect(group)?;
            commands::join_request::run(api, group, &identifier, JoinAction::Reject, yes).await
        }
        Commands::Promote { user_id, group } => {
            let (api, group) = connect(group)?;
            commands::role::run(api, group, user_id, true).await
        }
        Commands::Demote { user_id, group } => {
            let (api, group) = connect(group)?;
            commands::role::run(api, group, user_id, false).await
        }
        Commands::Tasks { group, from, to } => {
            let (api, group) = connect(group)?;
            commands::tasks::run(api, group, from.as_deref(), to.as_deref()).await
        }
        Commands::Show { task_id, group } => {
            let (api, group) = connect(group)?;
            commands::show::run(api, group, task_id).await
        }
        Commands::New {
            title,
            date,
            start,
            end,
            location,
            description,
            group,
        } => {
            let (api, group) = connect(group)?;
            let task = commands::new::parse_new_task(
                title,
                &date,
                start.as_deref(),
                end.as_deref(),
                location,
                description,
            )?;
            commands::new::run(api, group, task).await
        }
        Commands::Move {
            task_id,
            start,
            end,
            group,
            yes,
        } => {
            let (api, group) = connect(group)?;
            commands::reschedule::run(api, group, task_id, &start, end.as_deref(), yes).await
        }
        Commands::React {
            task_id,
            reaction,
            comment,
            group,
        } => {
            let (api, group) = connect(group)?;
            commands::react::run(api, group, task_id, reaction, comment).await
        }
        Commands::Config { default_group } => commands::config::run(default_group),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load config, build the API client and pick the group to operate on.
fn connect(group: Option<GroupId>) -> Result<(ApiClient, GroupId)> {
    let config = GroupCalConfig::load().context("Failed to load config")?;
    let api = ApiClient::from_config(&config)?;

    let group = match group.or(config.default_group) {
        Some(g) => g,
        None => anyhow::bail!(
            "No group selected.\n\n\
            Pass one with:\n  \
            groupcal <command> --group <id>\n\n\
            or store a default:\n  \
            groupcal config --default-group <id>"
        ),
    };

    Ok((api, group))
}
