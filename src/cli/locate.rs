//! Locate subcommand: print the file backing a config name.

use crate::config::ConfigRepository;
use anyhow::{Result, bail};
use clap::Args;

/// Arguments for the locate subcommand
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Logical config name
    pub name: String,
}

impl LocateArgs {
    pub fn execute(&self, repo: &ConfigRepository) -> Result<String> {
        match repo.locate(&self.name) {
            Some(path) => Ok(path.display().to_string()),
            None => bail!(
                "no file for '{}' in search directories {:?}",
                self.name,
                repo.settings().config_dirs
            ),
        }
    }
}
