use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use issuetracker::config::Config;
use issuetracker::logging::init_logging;

mod cmd;

#[derive(Parser)]
#[command(name = "issuetracker")]
#[command(version, about = "Terminal client for a GraphQL issue tracker")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// GraphQL endpoint. Overrides tracker.toml and UI_API_ENDPOINT.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter applied to the list before it is shown or addressed by position.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// New, Assigned, Fixed or Closed
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub effort_min: Option<String>,

    #[arg(long)]
    pub effort_max: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List issues matching a filter
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// File a new issue
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        owner: Option<String>,
        #[arg(short, long)]
        effort: Option<u32>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Close the issue at a table position
    Close {
        position: usize,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Delete the issue at a table position
    Delete {
        position: usize,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show an issue's description
    Show { id: i64 },
    /// Browse and edit issues interactively
    Browse,
    /// Show the static prototype page
    Prototype,
    /// Insert and read back a document in the local document store
    TryStore {
        /// Database file, or :memory:. Defaults to store.location.
        #[arg(long)]
        location: Option<String>,
    },
    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default tracker.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = || Config::new(project_dir.clone(), cli.endpoint.clone(), cli.verbose);

    match &cli.command {
        Commands::List { filter } => cmd::cmd_list(&config()?, filter).await?,
        Commands::Add {
            title,
            owner,
            effort,
            description,
        } => {
            cmd::cmd_add(
                &config()?,
                title,
                owner.as_deref(),
                *effort,
                description.as_deref(),
            )
            .await?
        }
        Commands::Close { position, filter } => {
            cmd::cmd_close(&config()?, *position, filter).await?
        }
        Commands::Delete { position, filter } => {
            cmd::cmd_delete(&config()?, *position, filter).await?
        }
        Commands::Show { id } => cmd::cmd_show(&config()?, *id).await?,
        Commands::Browse => cmd::cmd_browse(&config()?).await?,
        Commands::Prototype => cmd::cmd_prototype().await?,
        Commands::TryStore { location } => {
            cmd::cmd_try_store(&config()?, location.clone()).await?
        }
        Commands::Config { command } => {
            cmd::cmd_config(&project_dir, cli.endpoint.clone(), command.clone())?
        }
    }

    Ok(())
}
