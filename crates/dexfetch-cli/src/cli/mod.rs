//! CLI for the dexfetch bulk fetcher.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dexfetch_core::config::{self, FetchConfig};
use std::path::PathBuf;

use commands::{run_fetch, run_status};

/// Top-level CLI for dexfetch.
#[derive(Debug, Parser)]
#[command(name = "dexfetch")]
#[command(about = "dexfetch: resumable bulk fetch of PokeAPI records into a CSV table", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by every subcommand; each overrides the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Read configuration from this file instead of the XDG config.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Fetch identifiers 1..=N.
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,
    /// Checkpoint (partial table) path.
    #[arg(long, value_name = "PATH")]
    pub checkpoint: Option<PathBuf>,
    /// Final table path.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Primary endpoint base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

impl ConfigOverrides {
    /// Load the config file (explicit or XDG) and apply command-line overrides.
    pub fn resolve(&self) -> Result<FetchConfig> {
        let base = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        let cfg = self.apply(base);
        cfg.validate()?;
        tracing::debug!("effective config: {:?}", cfg);
        Ok(cfg)
    }

    fn apply(&self, mut cfg: FetchConfig) -> FetchConfig {
        if let Some(limit) = self.limit {
            cfg.limit = limit;
        }
        if let Some(path) = &self.checkpoint {
            cfg.checkpoint_path = path.clone();
        }
        if let Some(path) = &self.output {
            cfg.final_path = path.clone();
        }
        if let Some(url) = &self.base_url {
            cfg.base_url = url.clone();
        }
        cfg
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every identifier in range, resuming from the checkpoint if present.
    Run {
        #[command(flatten)]
        overrides: ConfigOverrides,
        /// Suppress the per-identifier progress line.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show how much of the range the checkpoint covers.
    Status {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run { overrides, quiet } => run_fetch(&overrides.resolve()?, quiet)?,
            CliCommand::Status { overrides } => run_status(&overrides.resolve()?)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
