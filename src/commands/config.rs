use anyhow::Result;
use groupcal_core::GroupId;
use groupcal_core::config::GroupCalConfig;
use owo_colors::OwoColorize;

pub fn run(default_group: Option<GroupId>) -> Result<()> {
    let config_path = GroupCalConfig::config_path()?;
    let config = GroupCalConfig::load()?;

    if let Some(group) = default_group {
        let mut stored = GroupCalConfig::load_from(&config_path)?;
        stored.default_group = Some(group);
        stored.save_to(&config_path)?;
        println!("{}", format!("Default group set to {}", group).green());
        println!();
    }

    let config = match default_group {
        Some(group) => GroupCalConfig {
            default_group: Some(group),
            ..config
        },
        None => config,
    };

    println!("{}", "Paths".bold());
    println!("  Config:         {}", config_path.display());
    println!();
    println!("{}", "Values".bold());
    println!("  API:            {}", config.api_url);
    println!(
        "  Token:          {}",
        if config.token.is_some() { "set" } else { "not set" }
    );
    println!(
        "  Default group:  {}",
        config
            .default_group
            .map(|g| g.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!("  Timeout:        {}s", config.timeout_secs);

    Ok(())
}
