pub mod args;
pub mod monitor;

pub use args::Args;
pub use monitor::SignalMonitor;
