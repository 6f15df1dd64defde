use chrono::NaiveDate;
use thiserror::Error;
use trader_api::model::{
    ContractType, Instruction, RawSignal, RiskLevel, Signal, SignalFlags, StrikeError,
    StrikePrice,
};

use super::expiration_to_date;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A strike that is neither whole nor half-dollar. Unreachable for
    /// signals that passed validation; hitting it means an invariant was
    /// broken upstream.
    #[error(transparent)]
    Strike(#[from] StrikeError),
    #[error("cannot normalize {field} from {value:?}")]
    Field { field: &'static str, value: String },
}

fn field_error(field: &'static str, value: &str) -> NormalizeError {
    NormalizeError::Field {
        field,
        value: value.to_string(),
    }
}

/// Convert a validated raw signal into its canonical typed form.
///
/// Must only be called after `validate` returned `true`; errors here are
/// invariant violations, not user input problems.
pub fn normalize(raw: &RawSignal, today: NaiveDate) -> Result<Signal, NormalizeError> {
    let instruction = match raw.instruction.as_str() {
        "BTO" => Instruction::Bto,
        "STC" => Instruction::Stc,
        other => return Err(field_error("instruction", other)),
    };

    let strike_value: f64 = raw
        .strike_price
        .parse()
        .map_err(|_| field_error("strike_price", &raw.strike_price))?;
    let strike = StrikePrice::new(strike_value)?;

    let contract_type = match raw.contract_type.as_str() {
        "C" => ContractType::Call,
        "P" => ContractType::Put,
        other => return Err(field_error("contract_type", other)),
    };

    let expiration = expiration_to_date(&raw.expiration, today)
        .ok_or_else(|| field_error("expiration", &raw.expiration))?;

    let contract_price: f64 = raw
        .contract_price
        .parse()
        .map_err(|_| field_error("contract_price", &raw.contract_price))?;

    let stop_loss = raw
        .flags
        .stop_loss
        .as_deref()
        .map(|s| s.parse::<f64>().map_err(|_| field_error("stop_loss", s)))
        .transpose()?;

    let reduce = raw
        .flags
        .reduce
        .as_deref()
        .map(parse_reduce_fraction)
        .transpose()?;

    // Unknown risk tags fall back to the standard order value rather
    // than failing the signal.
    let risk_level = raw
        .flags
        .risk_level
        .as_deref()
        .and_then(|tag| (tag == "high risk").then_some(RiskLevel::High));

    Ok(Signal::new(
        instruction,
        raw.ticker.clone(),
        strike,
        contract_type,
        expiration,
        contract_price,
        raw.comments.clone(),
        SignalFlags {
            stop_loss,
            risk_level,
            reduce,
        },
    ))
}

/// Turn a reduce flag like "50%" (or "50") into the fraction 0.5. The
/// numeral is always divided by 100 and the result must land in (0, 1].
fn parse_reduce_fraction(raw: &str) -> Result<f64, NormalizeError> {
    let numeral = raw.strip_suffix('%').unwrap_or(raw);
    let fraction = numeral
        .parse::<f64>()
        .map_err(|_| field_error("reduce", raw))?
        / 100.0;
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(fraction)
    } else {
        Err(field_error("reduce", raw))
    }
}
