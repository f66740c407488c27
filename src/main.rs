//! envconf
//!
//! Command-line front end for resolving environment-scoped configuration.

use anyhow::{Context, Result};
use clap::Parser;
use envconf::cli::{Cli, Command};
use envconf::config::ConfigRepository;
use envconf::logging::{self, LogTarget};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let Ok(target) = cli.log.parse::<LogTarget>();
    logging::init(&target, cli.verbose).context("Failed to initialize logging")?;

    let settings = cli.settings().context("Invalid resolver settings")?;
    debug!(
        dirs = ?settings.config_dirs,
        environment = %settings.environment,
        format = %settings.format,
        overrides = settings.overrides.len(),
        "Resolver settings"
    );
    let mut repo = ConfigRepository::new(settings);

    let output = match &cli.command {
        Command::Resolve(args) => args
            .execute(&mut repo, cli.output)
            .with_context(|| format!("Failed to resolve '{}'", args.name))?,
        Command::Get(args) => args
            .execute(&mut repo, cli.output)
            .with_context(|| format!("Failed to read '{}' from '{}'", args.path, args.name))?,
        Command::Locate(args) => args
            .execute(&repo)
            .with_context(|| format!("Failed to locate '{}'", args.name))?,
    };

    println!("{}", output);
    Ok(())
}
