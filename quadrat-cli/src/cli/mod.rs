pub mod commands;
pub mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quadrat",
    version,
    about = "Quality interpretation of biodiversity occurrence records",
    long_about = "Quadrat turns verbatim occurrence records into typed values: it validates and \
                  repairs coordinates against the stated country, reconciles dates, matches names \
                  against a reference taxonomy, and flags every correction as an issue."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Report progress and issue counts on stderr (-vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Worker threads for batch interpretation; 0 uses every core
    #[arg(short = 'j', long, value_name = "N", default_value_t = 0, global = true)]
    pub threads: usize,

    /// Configuration file (defaults to $QUADRAT_CONFIG or $QUADRAT_HOME/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override the lookup API base URL
    #[arg(long, value_name = "URL", global = true, env = "QUADRAT_API_URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interpret verbatim records from a JSON lines file
    Interpret(commands::interpret::InterpretArgs),

    /// Interpret a single recorded date
    Date(commands::date::DateArgs),

    /// Interpret a single coordinate pair
    Coordinate(commands::coordinate::CoordinateArgs),

    /// Show or initialise the configuration
    Config(commands::config::ConfigArgs),
}
