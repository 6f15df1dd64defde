use anyhow::Result;
use broker_gateway::PaperBroker;
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use signal_engine::engine::DecisionEngine;
use signal_engine::io::{Args, SignalMonitor};
use signal_engine::params::{normalize, validate};
use signal_engine::settings::load_settings;
use std::fs;
use std::time::Duration;
use trader_api::model::OrderPlan;
use trader_api::traits::{BrokerError, BrokerGateway};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    fs::create_dir_all(&args.signal_dir)?;
    let mut monitor = SignalMonitor::new(&args.signal_dir);
    let mut broker = PaperBroker::new();
    info!("watching {} for signals", args.signal_dir.display());

    loop {
        for raw in monitor.poll()? {
            if let Err(e) = handle_signal(&raw, &args.settings, &mut broker) {
                warn!("broker error while handling {raw:?}: {e}");
            }
        }
        tokio::time::sleep(Duration::from_millis(args.poll_interval_ms)).await;
    }
}

fn handle_signal(
    raw: &trader_api::model::RawSignal,
    settings_path: &std::path::Path,
    broker: &mut PaperBroker,
) -> Result<(), BrokerError> {
    let today = Local::now().date_naive();
    if !validate(raw, today) {
        return Ok(());
    }
    let signal = match normalize(raw, today) {
        Ok(signal) => signal,
        Err(e) => {
            warn!("could not normalize {raw:?}: {e}");
            return Ok(());
        }
    };

    // Settings are re-read for every signal so that edits to the file
    // take effect immediately.
    let settings = match load_settings(settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("settings unavailable, dropping signal: {e}");
            return Ok(());
        }
    };

    let engine = DecisionEngine::new(settings);
    let symbol = signal.option_symbol();
    let plan = engine.decide(&signal, broker)?;
    match &plan {
        OrderPlan::NoAction => {
            info!("{symbol}: nothing to do");
        }
        OrderPlan::Reject { reason } => {
            warn!("{symbol}: rejected: {reason}");
        }
        _ => {
            let receipts = broker.submit(&symbol, &plan)?;
            for receipt in receipts {
                info!("{symbol}: order {} now {:?}", receipt.order_id, receipt.status);
            }
        }
    }
    Ok(())
}
