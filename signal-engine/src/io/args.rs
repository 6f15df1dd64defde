use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory watched for incoming signal JSON files
    #[arg(long, default_value = "signals")]
    pub signal_dir: PathBuf,

    /// Path to the user settings JSON file
    /// Re-read before every decision, so edits apply without a restart.
    #[arg(long, default_value = "settings.json")]
    pub settings: PathBuf,

    /// Milliseconds between directory polls
    #[arg(long, default_value_t = 1000)]
    pub poll_interval_ms: u64,
}
