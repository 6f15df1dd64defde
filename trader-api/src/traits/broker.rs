use crate::model::{OrderPlan, OrderReceipt, OrderRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("unknown order id: {0}")]
    UnknownOrder(String),
    #[error("order rejected by broker: {0}")]
    Rejected(String),
    #[error("broker call failed: {0}")]
    Transport(String),
}

/// Synchronous request/response surface of the brokerage. The engine
/// performs no retries of its own; any error propagates to the caller
/// unmodified.
pub trait BrokerGateway: Send {
    /// Long quantity currently held for an option symbol (0 if none).
    fn get_long_quantity(&self, symbol: &str) -> Result<f64, BrokerError>;

    /// Orders on the symbol that are candidates for sell-to-close
    /// matching, including triggered children nested one level deep.
    fn get_active_single_leg_orders(&self, symbol: &str)
        -> Result<Vec<OrderRecord>, BrokerError>;

    /// Execute an order plan for the given option symbol. Cancellations
    /// listed in the plan are attempted individually; one failed cancel
    /// must not stop the others, nor the subsequent submissions.
    fn submit(&mut self, symbol: &str, plan: &OrderPlan)
        -> Result<Vec<OrderReceipt>, BrokerError>;

    /// Cancel a single working order.
    fn cancel(&mut self, order_id: &str) -> Result<OrderReceipt, BrokerError>;
}

impl BrokerGateway for Box<dyn BrokerGateway> {
    fn get_long_quantity(&self, symbol: &str) -> Result<f64, BrokerError> {
        (**self).get_long_quantity(symbol)
    }

    fn get_active_single_leg_orders(
        &self,
        symbol: &str,
    ) -> Result<Vec<OrderRecord>, BrokerError> {
        (**self).get_active_single_leg_orders(symbol)
    }

    fn submit(
        &mut self,
        symbol: &str,
        plan: &OrderPlan,
    ) -> Result<Vec<OrderReceipt>, BrokerError> {
        (**self).submit(symbol, plan)
    }

    fn cancel(&mut self, order_id: &str) -> Result<OrderReceipt, BrokerError> {
        (**self).cancel(order_id)
    }
}
