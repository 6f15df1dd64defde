use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Buy-to-open a long position.
    Bto,
    /// Sell-to-close an existing long position.
    Stc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    Call,
    Put,
}

impl ContractType {
    /// Single-letter code used inside option symbols.
    pub fn code(&self) -> char {
        match self {
            ContractType::Call => 'C',
            ContractType::Put => 'P',
        }
    }
}

/// Risk tag carried on a signal. Unknown tags are dropped during
/// normalization rather than failing the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
}

#[derive(Debug, Error)]
#[error("strike price {0} is not a multiple of 0.5")]
pub struct StrikeError(pub f64);

/// A strike price at half-dollar granularity, carrying its canonical
/// rendering: integers lose the decimal part ("50"), half-dollar strikes
/// keep exactly one digit ("50.5").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikePrice {
    value: f64,
    rendered: String,
}

impl StrikePrice {
    pub fn new(value: f64) -> Result<Self, StrikeError> {
        let rendered = if value % 1.0 == 0.0 {
            format!("{}", value as i64)
        } else if value % 0.5 == 0.0 {
            format!("{:.1}", value)
        } else {
            return Err(StrikeError(value));
        };
        Ok(Self { value, rendered })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for StrikePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalFlags {
    pub stop_loss: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    /// Fraction of the held position to sell immediately, in (0, 1].
    pub reduce: Option<f64>,
}

/// A fully normalized trading signal. Constructed only from a validated
/// raw signal, so every field is already inside its legal range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    instruction: Instruction,
    ticker: String,
    strike: StrikePrice,
    contract_type: ContractType,
    expiration: NaiveDate,
    contract_price: f64,
    comments: Option<String>,
    flags: SignalFlags,
}

impl Signal {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        instruction: Instruction,
        ticker: impl Into<String>,
        strike: StrikePrice,
        contract_type: ContractType,
        expiration: NaiveDate,
        contract_price: f64,
        comments: Option<String>,
        flags: SignalFlags,
    ) -> Self {
        Self {
            instruction,
            ticker: ticker.into(),
            strike,
            contract_type,
            expiration,
            contract_price,
            comments,
            flags,
        }
    }

    pub fn instruction(&self) -> Instruction {
        self.instruction
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn strike(&self) -> &StrikePrice {
        &self.strike
    }

    pub fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    pub fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    pub fn contract_price(&self) -> f64 {
        self.contract_price
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn flags(&self) -> &SignalFlags {
        &self.flags
    }

    /// Broker option symbol: underlying, expiration as MMDDYY, contract
    /// type code, then the canonical strike rendering.
    /// e.g. "INTC_123121C50"
    pub fn option_symbol(&self) -> String {
        format!(
            "{}_{}{}{}",
            self.ticker,
            self.expiration.format("%m%d%y"),
            self.contract_type.code(),
            self.strike.as_str()
        )
    }
}
