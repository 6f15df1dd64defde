use serde::{Deserialize, Serialize};

/// Optional modifiers attached to a raw signal. Only `stop_loss` is ever
/// derived from the message text itself; `risk_level` and `reduce` arrive
/// through the transport record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSignalFlags {
    #[serde(default)]
    pub stop_loss: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub reduce: Option<String>,
}

/// A trading instruction extracted from one chat message, still untyped.
/// Every field is the exact substring captured by the signal grammar;
/// nothing has been range-checked yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSignal {
    pub instruction: String,
    pub ticker: String,
    pub strike_price: String,
    pub contract_type: String,
    pub expiration: String,
    pub contract_price: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub flags: RawSignalFlags,
}
