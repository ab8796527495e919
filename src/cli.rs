use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clipforge")]
#[command(author, version, about = "Variant transcoding and distribution pipeline")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transcode a source video into every configured variant and
    /// distribute the results. The job takes ownership of the input
    /// artifact and removes it when it completes.
    Run {
        /// Input file to process
        #[arg(required = true)]
        input: PathBuf,

        /// Job identifier (defaults to a fresh UUID)
        #[arg(long)]
        job_id: Option<String>,

        /// Show the planned invocations without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// List the configured variant catalog
    Specs,

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
