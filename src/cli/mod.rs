//! CLI command definitions for envconf
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod get;
pub mod locate;
pub mod resolve;

use crate::config::{FormatPreference, OverrideRule, ResolverSettings};
use crate::error::ConfigResult;
use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use get::GetArgs;
use locate::LocateArgs;
use resolve::ResolveArgs;
use std::path::PathBuf;

/// Resolve environment-scoped YAML/JSON configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config search directory, tried in the order given (replaces ENVCONF_DIRS)
    #[arg(short, long = "dir", value_name = "DIR", global = true)]
    pub dirs: Vec<PathBuf>,

    /// Active environment (overrides ENVCONF_ENV, default: all)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Preferred config format: auto, yaml or json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Override rule TARGET=SEARCH, applied in the order given
    #[arg(short = 'O', long = "override", value_name = "TARGET=SEARCH", global = true)]
    pub overrides: Vec<OverrideRule>,

    /// Output format for printed trees
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration tree
    Resolve(ResolveArgs),

    /// Print a single value by dotted path
    Get(GetArgs),

    /// Print the file a config name resolves to
    Locate(LocateArgs),
}

impl Cli {
    /// Resolver settings from the environment, refined by command-line flags.
    pub fn settings(&self) -> ConfigResult<ResolverSettings> {
        let mut settings = ResolverSettings::from_env()?;

        if !self.dirs.is_empty() {
            settings.config_dirs = self.dirs.clone();
        }
        if let Some(env) = &self.env {
            settings.set_environment(env.clone());
        }
        if let Some(format) = &self.format {
            settings.set_format(format.parse::<FormatPreference>()?);
        }
        for rule in &self.overrides {
            settings.overrides.add(rule.clone());
        }

        Ok(settings)
    }
}
