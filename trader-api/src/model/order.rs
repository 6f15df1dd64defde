use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    Day,
    FillOrKill,
    GoodTillCancel,
}

/// The concrete order action decided for one signal. Consumed by the
/// broker gateway and never retained by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderPlan {
    /// Nothing to do (e.g. close requested with no position held).
    NoAction,
    /// The signal was understood but no order may be placed.
    Reject { reason: String },
    /// Limit buy-to-open that, once filled, triggers a good-till-cancel
    /// stop-market sell-to-close at `stop_price` for the same quantity.
    OpenWithStop {
        quantity: u32,
        limit_price: f64,
        stop_price: f64,
        time_in_force: TimeInForce,
    },
    /// Cancel the listed orders, market-sell `sell_quantity` immediately
    /// and, when `keep_quantity > 0`, park the remainder behind a
    /// good-till-cancel stop at `keep_stop_price`.
    CloseAndMaybeSplit {
        cancel_ids: Vec<String>,
        sell_quantity: u32,
        keep_quantity: u32,
        keep_stop_price: Option<f64>,
    },
}
