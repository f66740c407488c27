//! Resolve subcommand: print the merged tree for a config name.

use crate::config::ConfigRepository;
use crate::format::{OutputFormat, format_tree};
use anyhow::{Result, bail};
use clap::Args;

/// Arguments for the resolve subcommand
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Logical config name (e.g. `database` or `database.yaml`)
    pub name: String,

    /// Dotted path of the subtree to print
    #[arg(short, long, value_name = "PATH")]
    pub root: Option<String>,
}

impl ResolveArgs {
    pub fn execute(&self, repo: &mut ConfigRepository, output: OutputFormat) -> Result<String> {
        match repo.load(&self.name, self.root.as_deref())? {
            Some(config) => format_tree(config.as_value(), output),
            None => bail!("config '{}' not found or not a mapping", self.name),
        }
    }
}
