use super::super::settings::Settings;
use anyhow::Result;
use clap::Args;
use colored::*;
use quadrat_core::system::paths::config_path;
use quadrat_core::{default_config, save_config, QuadratError};

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the built-in defaults instead of the effective configuration
    #[arg(long)]
    pub default: bool,

    /// Print the configuration file location and exit
    #[arg(long)]
    pub path: bool,

    /// Write the default configuration to the configuration file location
    #[arg(long, conflicts_with_all = ["default", "path"])]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

pub fn run(args: ConfigArgs, settings: &Settings) -> Result<()> {
    if args.path {
        let path = settings.source.clone().unwrap_or_else(config_path);
        println!("{}", path.display());
        return Ok(());
    }

    if args.init {
        let path = config_path();
        if path.exists() && !args.force {
            return Err(QuadratError::Configuration(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))
            .into());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(QuadratError::from)?;
        }
        save_config(&path, &default_config())?;
        eprintln!("{} Wrote {}", "✓".green(), path.display());
        return Ok(());
    }

    let config = if args.default {
        default_config()
    } else {
        settings.config.clone()
    };
    let text = toml::to_string_pretty(&config)
        .map_err(|e| QuadratError::Configuration(format!("Failed to serialize config: {}", e)))?;
    print!("{}", text);
    Ok(())
}
