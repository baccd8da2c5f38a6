//! Priorities CLI - inspect fixtures, layouts and the saved priorities list
//!
//! Runs the same core code as the mobile app, so layout numbers printed here
//! match what the app renders.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands, ConfigCommands, PrioritiesCommands};
use crate::commands::common::{load_config, resolve_config_path, resolve_db_path};
use crate::commands::config::{run_config_init, run_config_path, run_config_show};
use crate::commands::grid::run_grid;
use crate::commands::layout::{run_angle, run_sticky};
use crate::commands::priorities::{run_add, run_clear, run_list, run_remove};
use crate::commands::timeline::run_timeline;
use crate::commands::users::run_users;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "priorities=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config)?;

    match cli.command {
        Commands::Users { json } => run_users(json)?,
        Commands::Grid {
            width,
            priorities,
            json,
        } => {
            let db_path = resolve_db_path(cli.db_path)?;
            let config = load_config(&config_path);
            run_grid(width, priorities, json, &db_path, &config).await?;
        }
        Commands::Priorities { command } => {
            let db_path = resolve_db_path(cli.db_path)?;
            match command {
                PrioritiesCommands::List { json } => run_list(json, &db_path).await?,
                PrioritiesCommands::Add { user } => run_add(&user, &db_path).await?,
                PrioritiesCommands::Remove { user } => run_remove(&user, &db_path).await?,
                PrioritiesCommands::Clear => run_clear(&db_path).await?,
            }
        }
        Commands::Timeline { user, json } => run_timeline(&user, json)?,
        Commands::Angle {
            user_id,
            row,
            width,
            height,
        } => run_angle(user_id, row, width, height, &load_config(&config_path)),
        Commands::Sticky {
            cards,
            scroll,
            json,
        } => run_sticky(cards, scroll, json, &load_config(&config_path))?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(&config_path)?,
            ConfigCommands::Path => run_config_path(&config_path),
            ConfigCommands::Init { force } => run_config_init(&config_path, force)?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests;
