use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// clrprobe - find .NET assemblies by their PE headers, without loading them
#[derive(Debug, Parser)]
#[command(name = "clrprobe", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Args)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report whether each file is a CLR assembly.
    ///
    /// Exits with 0 if every file is an assembly, 1 if any is not, 2 if any could not be read.
    Check {
        /// Files to probe.
        #[arg(value_name = "FILE", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Probe every .exe/.dll below a directory.
    Scan {
        /// Directory to scan.
        #[arg(value_name = "DIR")]
        path: PathBuf,

        /// Only look at files directly inside DIR.
        #[arg(long)]
        no_recursive: bool,

        /// List every candidate, not just the assemblies.
        #[arg(long)]
        all: bool,
    },
}
