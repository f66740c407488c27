//! Get subcommand: print one value from a resolved config.

use crate::config::ConfigRepository;
use crate::format::{OutputFormat, format_value};
use anyhow::{Result, bail};
use clap::Args;

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Logical config name
    pub name: String,

    /// Dotted path of the value (e.g. `primary.pool.size`)
    pub path: String,

    /// Printed when the path does not resolve, instead of failing
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetArgs {
    pub fn execute(&self, repo: &mut ConfigRepository, output: OutputFormat) -> Result<String> {
        let Some(config) = repo.load(&self.name, None)? else {
            bail!("config '{}' not found or not a mapping", self.name);
        };

        match &self.default {
            Some(default) => match config.dig(&self.path) {
                Some(value) => format_value(value, output),
                None => Ok(default.clone()),
            },
            None => format_value(config.dig_or_fail(&self.path)?, output),
        }
    }
}
