//! solpick - Solidity compiler version picker
//!
//! Reads the `pragma solidity` directive of a source file, picks the newest
//! compiler release satisfying it and drives that compiler.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use eyre::Result;
use solpick_engine::VersionRegistry;

mod cmd;

/// Command-line interface for solpick
#[derive(Debug, Parser)]
#[command(name = "solpick")]
#[command(about = "Solidity compiler version picker - resolves pragma solidity to a solc release")]
#[command(version)]
pub struct Cli {
    /// Only consider compilers that are already installed (also: SOLPICK_OFFLINE=1)
    #[arg(long, global = true)]
    pub offline: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the compiler version selected for a source file
    Version {
        /// Solidity source file
        file: PathBuf,
    },
    /// Print the compiler binary selected for a source file, installing it if needed
    Binary {
        /// Solidity source file
        file: PathBuf,
    },
    /// Print the parsed pragma solidity constraint of a source file
    Pragma {
        /// Solidity source file
        file: PathBuf,
    },
    /// Compile a source file with the selected compiler
    Compile {
        /// Solidity source file
        file: PathBuf,

        /// Compiler binary to use instead of the selected one
        #[arg(long)]
        solc: Option<PathBuf>,

        /// JSON file with standard JSON compiler settings
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Arguments replacing the default `--allow-paths .,/` (also: SOLPICK_SOLC_ARGS)
        #[arg(long, allow_hyphen_values = true)]
        solc_args: Option<String>,
    },
    /// List the compiler versions pragmas are resolved against
    Versions,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    solpick_common::logging::init_logging("solpick", cli.verbose)?;

    if cli.offline {
        tracing::debug!("Offline mode requested, using installed compilers");
        VersionRegistry::init_global(VersionRegistry::installed())?;
    }

    match &cli.command {
        Commands::Version { file } => cmd::print_version(file),
        Commands::Binary { file } => cmd::print_binary(file),
        Commands::Pragma { file } => cmd::print_pragma(file),
        Commands::Compile { file, solc, settings, solc_args } => {
            cmd::compile_file(file, solc.as_deref(), settings.as_deref(), solc_args.as_deref())
        }
        Commands::Versions => cmd::list_versions(),
    }
}
