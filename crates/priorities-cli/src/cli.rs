use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "priorities")]
#[command(about = "Inspect Priorities fixtures, layouts and saved lists")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users from the bundled fixtures
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how users are packed into grid rows
    Grid {
        /// Content width in px
        #[arg(short, long, default_value = "390")]
        width: f32,
        /// Pack the saved priorities instead of every fixture user
        #[arg(long)]
        priorities: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the saved priorities list
    Priorities {
        #[command(subcommand)]
        command: PrioritiesCommands,
    },
    /// Show a user's timeline grouped by month and day
    Timeline {
        /// User id or unique user id (e.g. `u-ava`)
        user: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the seeded decoration angle for a grid cell
    Angle {
        /// User id
        user_id: u64,
        /// Grid row index
        row: usize,
        /// Cell width in px
        #[arg(long, default_value = "120")]
        width: f32,
        /// Cell height in px
        #[arg(long, default_value = "120")]
        height: f32,
    },
    /// Show sticky card transforms at a scroll offset
    Sticky {
        /// Number of cards in the stack
        #[arg(short, long, default_value = "5")]
        cards: usize,
        /// Scroll offset in px
        #[arg(short, long, default_value = "0")]
        scroll: f32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum PrioritiesCommands {
    /// Show the saved list, refreshed from the fixtures
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Append a user to the list
    Add {
        /// User id or unique user id
        user: String,
    },
    /// Remove a user from the list
    Remove {
        /// User id or unique user id
        user: String,
    },
    /// Remove everyone from the list
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
