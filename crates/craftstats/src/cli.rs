//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use craftstats_core::constants::{
    DEFAULT_BASE_DIRECTORY, DEFAULT_POLL_DELAY_SECS, DEFAULT_REPORT_WINDOW_DAYS,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "craftstats")]
#[command(version, about = "Player activity monitor for MineOS-hosted Minecraft servers")]
#[command(after_help = "Specify a mode (single, multi or interactive) to start monitoring")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity (-v, -vv, -vvv); without it logs go to craftstats.log
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Seconds to wait between checks
    #[arg(short, long, default_value_t = DEFAULT_POLL_DELAY_SECS, global = true)]
    pub delay: u64,

    /// MineOS server base location
    #[arg(short, long, default_value = DEFAULT_BASE_DIRECTORY, global = true)]
    pub base_directory: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List servers and their up/down state
    List,

    /// Watch a single server
    Single {
        /// Server name under <base>/servers
        name: String,
    },

    /// Watch every server in the base directory
    Multi,

    /// Pick the servers to watch through an interactive prompt
    Interactive,

    /// Generate the usage report and email it
    Report {
        /// Send one report and exit instead of looping
        #[arg(long)]
        once: bool,

        /// Trailing window in days
        #[arg(long, default_value_t = DEFAULT_REPORT_WINDOW_DAYS)]
        days: u32,
    },

    /// Configure settings interactively
    Configure {
        #[command(subcommand)]
        target: ConfigureTarget,
    },

    /// Remove a password stored in the system keyring
    ClearPassword {
        #[arg(value_enum)]
        target: CredentialTarget,
    },
}

#[derive(Subcommand)]
pub enum ConfigureTarget {
    /// Database connection settings
    Db,
    /// Report email settings
    Email,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CredentialTarget {
    Db,
    Email,
}
