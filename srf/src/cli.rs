// srf/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand};
use srf_common::config::Config;
use srf_common::error::Result;

// Module declarations
pub mod fetch;
pub mod list;
pub mod verify;

use crate::cli::fetch::FetchArgs;
use crate::cli::list::ListArgs;
use crate::cli::verify::VerifyArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "srf", bin_name = "srf")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the pretrained models, falling back through every source
    Fetch(FetchArgs),
    /// Check which models are already present and valid (no network)
    Verify(VerifyArgs),
    /// Show the artifact table
    List(ListArgs),
}

impl Command {
    pub async fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Fetch(command) => command.run(config).await,
            Self::Verify(command) => command.run(config).await,
            Self::List(command) => command.run(config).await,
        }
    }
}
