//! Reads chat messages from stdin, one per line, and drops every parsed
//! signal as a JSON file into the engine's watch directory.

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Parser;
use log::{info, warn};
use signal_engine::parser::{parse_signal, strip_markdown};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory where signal JSON files are written
    #[arg(long, default_value = "signals")]
    signal_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    fs::create_dir_all(&args.signal_dir)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match relay_message(&line, &args.signal_dir, Local::now()) {
            Ok(Some(path)) => info!("wrote {}", path.display()),
            Ok(None) => {}
            Err(e) => warn!("could not relay message: {e}"),
        }
    }
    Ok(())
}

/// Parse one chat message and, if it carries a signal, write it out.
/// Returns the path written, or `None` when the message held no signal.
fn relay_message<Tz: chrono::TimeZone>(
    message: &str,
    signal_dir: &Path,
    received_at: DateTime<Tz>,
) -> Result<Option<PathBuf>>
where
    Tz::Offset: std::fmt::Display,
{
    let cleaned = strip_markdown(message);
    let Some(raw) = parse_signal(&cleaned) else {
        return Ok(None);
    };

    let file_name = format!(
        "{}{}.json",
        raw.ticker,
        received_at.format("%d-%b-%y_%H_%M_%S")
    );
    let path = signal_dir.join(file_name);
    fs::write(&path, serde_json::to_string_pretty(&raw)?)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use trader_api::model::RawSignal;

    fn received_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 12, 20, 9, 30, 5).unwrap()
    }

    #[test]
    fn test_signal_message_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = relay_message("BTO INTC 50C 12/31 @0.45", dir.path(), received_at())
            .unwrap()
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "INTC20-Dec-21_09_30_05.json"
        );

        let raw: RawSignal = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.instruction, "BTO");
        assert_eq!(raw.ticker, "INTC");
    }

    #[test]
    fn test_markdown_stripped_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = relay_message("**BTO INTC 50C 12/31 @0.45**", dir.path(), received_at())
            .unwrap();
        assert!(path.is_some());
    }

    #[test]
    fn test_chatter_produces_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = relay_message("good morning traders", dir.path(), received_at()).unwrap();
        assert!(path.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
