use log::warn;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use trader_api::model::RawSignal;

/// Watches a directory for signal files dropped by the relay.
///
/// Every JSON file is picked up at most once, tracked by path. A file
/// that fails to parse is logged and marked seen anyway, so one bad
/// drop never wedges the poll loop.
pub struct SignalMonitor {
    dir: PathBuf,
    seen: HashSet<PathBuf>,
}

impl SignalMonitor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seen: HashSet::new(),
        }
    }

    /// Collect signals from files that appeared since the last poll, in
    /// file-name order.
    pub fn poll(&mut self) -> io::Result<Vec<RawSignal>> {
        let mut fresh: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter(|path| !self.seen.contains(path))
            .collect();
        fresh.sort();

        let mut signals = Vec::new();
        for path in fresh {
            if let Some(raw) = read_signal_file(&path) {
                signals.push(raw);
            }
            self.seen.insert(path);
        }
        Ok(signals)
    }
}

fn read_signal_file(path: &Path) -> Option<RawSignal> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("could not read signal file {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("malformed signal file {}: {e}", path.display());
            None
        }
    }
}
