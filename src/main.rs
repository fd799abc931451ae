use anyhow::{Context, Result};
use clap::Parser;

use miqat::cli::args::{Cli, Commands, ConfigCommands};
use miqat::cli::handlers;
use miqat::config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Must work even when the file on disk does not parse
    if let Some(Commands::Config {
        action: ConfigCommands::Path,
    }) = &cli.command
    {
        println!("{}", AppConfig::config_path()?.display());
        return Ok(());
    }

    let config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Some(Commands::Times { date, json }) => handlers::handle_times(&config, date, json)?,
        Some(Commands::Next) => handlers::handle_next(&config)?,
        Some(Commands::Watch) => handlers::handle_watch(&config)?,
        Some(Commands::Config { action }) => handlers::handle_config(&config, &action)?,
        // No subcommand → today's times
        None => handlers::handle_times(&config, None, false)?,
    }

    Ok(())
}
