use chrono::{Datelike, NaiveDate};
use log::warn;
use trader_api::model::RawSignal;

use super::expiration_to_date;

/// Validate a raw signal before any order logic runs.
///
/// Every field rule must hold; the first failure makes the whole signal
/// invalid. Failures are logged and reported as `false`; an invalid
/// signal is discarded, not fatal. `today` anchors the calendar checks.
pub fn validate(raw: &RawSignal, today: NaiveDate) -> bool {
    let valid = field_rules_hold(raw, today);
    if !valid {
        warn!("{raw:?} failed validation");
    }
    valid
}

fn field_rules_hold(raw: &RawSignal, today: NaiveDate) -> bool {
    if raw.instruction != "BTO" && raw.instruction != "STC" {
        return false;
    }

    let ticker_ok = (1..=5).contains(&raw.ticker.len())
        && raw.ticker.chars().all(|c| c.is_ascii_uppercase());
    if !ticker_ok {
        return false;
    }

    let strike: f64 = match raw.strike_price.parse() {
        Ok(v) => v,
        Err(_) => return false,
    };
    if !(1.0..100_000.0).contains(&strike) || strike % 0.5 != 0.0 {
        return false;
    }

    if raw.contract_type != "C" && raw.contract_type != "P" {
        return false;
    }

    let price: f64 = match raw.contract_price.parse() {
        Ok(v) => v,
        Err(_) => return false,
    };
    if !(price > 0.0 && price < 1000.0) {
        return false;
    }

    is_expiration_valid(&raw.expiration, today)
}

/// Whether an expiration string denotes a usable date: a real calendar
/// date no more than 3 years out and not already past. Expiring today is
/// still valid.
pub fn is_expiration_valid(date_str: &str, today: NaiveDate) -> bool {
    let separators = date_str.matches('/').count();
    if !(1..=2).contains(&separators) {
        return false;
    }
    match expiration_to_date(date_str, today) {
        Some(date) => date.year() <= today.year() + 3 && date >= today,
        None => false,
    }
}
