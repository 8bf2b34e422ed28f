use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::settings::Settings;
use crate::cli::{Cli, Commands};
use quadrat_core::QuadratError;

/// Filter used when QUADRAT_LOG is unset or unparsable
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging() {
    let filter = EnvFilter::try_from_env("QUADRAT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries interpreted records, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        let code = err
            .downcast_ref::<QuadratError>()
            .map_or(1, QuadratError::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let threads = match cli.threads {
        0 => num_cpus::get(),
        n => n,
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Cannot start {} worker threads: {}", threads, e))?;
    if cli.verbose > 0 {
        eprintln!("Interpreting with {} worker threads", threads);
    }

    let settings = Settings::load(cli.config.as_deref(), cli.api_url.as_deref())?;

    match cli.command {
        Commands::Interpret(args) => cli::commands::interpret::run(args, &settings, cli.verbose),
        Commands::Date(args) => cli::commands::date::run(args, &settings),
        Commands::Coordinate(args) => cli::commands::coordinate::run(args, &settings),
        Commands::Config(args) => cli::commands::config::run(args, &settings),
    }
}
