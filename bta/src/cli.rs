//! Command-line definitions for the test runner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use bta_common::types::TestKind;

#[derive(Parser)]
#[command(name = "bta")]
#[command(author, version, about = "BtAssist - scripted wireless link test runner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Power the radio on
    Open(RunArgs),
    /// Power the radio off
    Close(RunArgs),
    /// Scan until the target device is observed
    Discover(RunArgs),
    /// Discover and bond with the target device
    Pair(RunArgs),
    /// Remove the bond with the target device
    Unpair(RunArgs),
    /// Rename the local adapter
    Rename {
        /// New local adapter name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        args: RunArgs,
    },
}

impl Command {
    pub fn kind(&self) -> TestKind {
        match self {
            Self::Open(_) => TestKind::Open,
            Self::Close(_) => TestKind::Close,
            Self::Discover(_) => TestKind::Discover,
            Self::Pair(_) => TestKind::Pair,
            Self::Unpair(_) => TestKind::Unpair,
            Self::Rename { .. } => TestKind::Rename,
        }
    }

    pub fn args(&self) -> &RunArgs {
        match self {
            Self::Open(args)
            | Self::Close(args)
            | Self::Discover(args)
            | Self::Pair(args)
            | Self::Unpair(args) => args,
            Self::Rename { args, .. } => args,
        }
    }

    pub fn rename_to(&self) -> Option<String> {
        match self {
            Self::Rename { name, .. } => name.clone(),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Notification script to replay (JSONL; "-" reads stdin)
    #[arg(short, long, default_value = "-")]
    pub script: String,

    /// Target device name (defaults to the configured one)
    #[arg(short, long)]
    pub device: Option<String>,

    /// Result file path (defaults to the configured one)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write the result as JSON instead of the plain format
    #[arg(long)]
    pub json: bool,

    /// Pairing PIN applied by auto-confirmation
    #[arg(long)]
    pub pin: Option<String>,

    /// Start the simulated radio powered on
    #[arg(long)]
    pub radio_on: bool,

    /// Seed the simulated paired-device set (repeatable)
    #[arg(long = "bonded")]
    pub bonded: Vec<String>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommands_map_to_test_kinds() {
        let cli = Cli::parse_from(["bta", "open"]);
        assert_eq!(cli.command.kind(), TestKind::Open);

        let cli = Cli::parse_from(["bta", "pair", "--device", "test-bt", "--radio-on"]);
        assert_eq!(cli.command.kind(), TestKind::Pair);
        assert_eq!(cli.command.args().device.as_deref(), Some("test-bt"));
        assert!(cli.command.args().radio_on);

        let cli = Cli::parse_from(["bta", "rename", "--name", "bench-7"]);
        assert_eq!(cli.command.kind(), TestKind::Rename);
        assert_eq!(cli.command.rename_to().as_deref(), Some("bench-7"));
    }

    #[test]
    fn bonded_seed_is_repeatable() {
        let cli = Cli::parse_from(["bta", "unpair", "--bonded", "a", "--bonded", "b"]);
        assert_eq!(cli.command.args().bonded, ["a", "b"]);
    }

    #[test]
    fn script_defaults_to_stdin() {
        let cli = Cli::parse_from(["bta", "close"]);
        assert_eq!(cli.command.args().script, "-");
    }
}
