//! Configuration view and validation commands: `issuetracker config`.

use anyhow::Result;

use super::super::ConfigCommands;

pub fn cmd_config(
    project_dir: &std::path::Path,
    endpoint: Option<String>,
    command: Option<ConfigCommands>,
) -> Result<()> {
    use issuetracker::config::Config;
    use issuetracker::tracker_config::{TrackerToml, config_path};

    let config_path = config_path(project_dir);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Issue Tracker Configuration");
            println!("===========================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                TrackerToml::load(&config_path)?
            } else {
                println!("No tracker.toml found at {}", config_path.display());
                println!("Using default configuration:");
                TrackerToml::default()
            };
            println!();

            println!("[api]");
            println!("  endpoint = \"{}\"", toml.api.endpoint);
            println!();
            println!("[ui]");
            println!("  toast_delay_ms = {}", toml.ui.toast_delay_ms);
            println!();
            println!("[store]");
            println!("  location = \"{}\"", toml.store.location);
            println!("  collection = \"{}\"", toml.store.collection);
            println!();

            println!("Effective values (with env/CLI overrides):");
            let config = Config::new(project_dir.to_path_buf(), endpoint, false)?;
            println!("  endpoint = \"{}\"", config.endpoint);
            match config.toast_delay {
                Some(delay) => println!("  toast_delay = {}ms", delay.as_millis()),
                None => println!("  toast_delay = until dismissed"),
            }
            println!("  store = \"{}\"", config.store_location);
            println!();

            if !config_path.exists() {
                println!("Run 'issuetracker config init' to create a tracker.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No tracker.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = TrackerToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("tracker.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            TrackerToml::default().save(&config_path)?;

            println!("Created tracker.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] endpoint");
            println!("  - [ui] toast_delay_ms");
            println!("  - [store] location, collection");
            println!();
        }
    }

    Ok(())
}
