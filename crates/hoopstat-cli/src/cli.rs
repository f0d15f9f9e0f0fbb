// Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hoopstat",
    version,
    about = "Derive per-season efficiency metrics and leaderboards from a player stats CSV"
)]
pub struct Cli {
    /// Config file (default: hoopstat.toml in the working directory, if present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Source stats file; overrides `data.input`.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory for the metrics table and leaderboards; overrides `data.output_dir`.
    #[arg(short, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Input field delimiter; overrides `data.delimiter`.
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Log at debug level.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default tracing directive when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "hoopstat=debug,hoopstat_core=debug,warn"
        } else if self.quiet {
            "warn"
        } else {
            "hoopstat=info,hoopstat_core=info,warn"
        }
    }
}
