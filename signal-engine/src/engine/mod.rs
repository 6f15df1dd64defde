//! Order decision logic.
//!
//! The engine turns one normalized signal plus current broker state into
//! a single [`OrderPlan`]. It holds no state of its own beyond the user
//! settings and never talks to the broker for anything but reads; the
//! caller executes the plan.

use log::warn;
use trader_api::model::{
    Instruction, OrderPlan, OrderRecord, OrderStatus, RiskLevel, Signal, StrategyType,
    TimeInForce,
};
use trader_api::traits::{BrokerError, BrokerGateway};

use crate::settings::UserSettings;

pub struct DecisionEngine {
    settings: UserSettings,
}

impl DecisionEngine {
    pub fn new(settings: UserSettings) -> Self {
        Self { settings }
    }

    /// Decide what to do about one signal. Buy-to-open needs no broker
    /// state; sell-to-close reads the held quantity and the open orders
    /// on the symbol first.
    pub fn decide(
        &self,
        signal: &Signal,
        broker: &dyn BrokerGateway,
    ) -> Result<OrderPlan, BrokerError> {
        match signal.instruction() {
            Instruction::Bto => Ok(self.plan_open(signal)),
            Instruction::Stc => self.plan_close(signal, broker),
        }
    }

    fn plan_open(&self, signal: &Signal) -> OrderPlan {
        let order_value = self.order_value_for(signal);
        let quantity = buy_quantity(
            order_value,
            signal.contract_price(),
            self.settings.buy_limit_percent,
        );
        if quantity < 1 {
            warn!(
                "{}: order value {} cannot buy a single contract at {}",
                signal.option_symbol(),
                order_value,
                signal.contract_price()
            );
            return OrderPlan::Reject {
                reason: format!(
                    "order value {} too small for contract price {}",
                    order_value,
                    signal.contract_price()
                ),
            };
        }

        let limit_price =
            round_cents(signal.contract_price() * (1.0 + self.settings.buy_limit_percent));
        let stop_price =
            round_cents(signal.contract_price() * (1.0 - self.stop_loss_percent_for(signal)));
        OrderPlan::OpenWithStop {
            quantity,
            limit_price,
            stop_price,
            time_in_force: TimeInForce::FillOrKill,
        }
    }

    fn plan_close(
        &self,
        signal: &Signal,
        broker: &dyn BrokerGateway,
    ) -> Result<OrderPlan, BrokerError> {
        let symbol = signal.option_symbol();
        let held = broker.get_long_quantity(&symbol)?;
        if held < 1.0 {
            warn!("{symbol}: close requested but no position held");
            return Ok(OrderPlan::NoAction);
        }

        let orders = broker.get_active_single_leg_orders(&symbol)?;
        let cancel_ids = existing_stc_order_ids(&symbol, &orders);

        let (sell_quantity, keep_quantity) = split_position(held, signal.flags().reduce);
        let keep_stop_price = (keep_quantity > 0).then(|| {
            round_cents(signal.contract_price() * (1.0 - self.settings.stop_loss_percent))
        });

        Ok(OrderPlan::CloseAndMaybeSplit {
            cancel_ids,
            sell_quantity,
            keep_quantity,
            keep_stop_price,
        })
    }

    /// High-risk signals spend the dedicated budget when one is
    /// configured; otherwise the standard cap applies.
    fn order_value_for(&self, signal: &Signal) -> f64 {
        match (signal.flags().risk_level, self.settings.high_risk_order_value) {
            (Some(RiskLevel::High), Some(value)) => value,
            _ => self.settings.max_order_value,
        }
    }

    /// Effective stop-loss percentage for an open. A stop price carried
    /// on the signal is honored only when it is tighter than the
    /// configured percentage.
    fn stop_loss_percent_for(&self, signal: &Signal) -> f64 {
        let configured = self.settings.stop_loss_percent;
        match signal.flags().stop_loss {
            Some(stop) => {
                let from_signal = (signal.contract_price() - stop) / signal.contract_price();
                from_signal.min(configured)
            }
            None => configured,
        }
    }
}

/// Whole contracts purchasable for `order_value` dollars at the limit
/// price, one contract covering 100 shares. Truncates toward zero.
fn buy_quantity(order_value: f64, contract_price: f64, buy_limit_percent: f64) -> u32 {
    (order_value / (contract_price * 100.0 * (1.0 + buy_limit_percent))) as u32
}

/// Split a held position into an immediate sell tranche and a kept
/// tranche. The sell side rounds up, so a reduce flag always sells at
/// least one contract.
fn split_position(held: f64, reduce: Option<f64>) -> (u32, u32) {
    let held_whole = held as u32;
    match reduce {
        Some(fraction) => {
            let sell = ((held * fraction).ceil() as u32).min(held_whole);
            (sell, held_whole - sell)
        }
        None => (held_whole, 0),
    }
}

/// Ids of sell-to-close orders on `symbol` that must be cancelled before
/// a replacement close goes in: active single-leg orders themselves, and
/// still-active children hanging off triggered parents. A filled parent
/// keeps its child order alive, so filled parents are inspected too.
fn existing_stc_order_ids(symbol: &str, orders: &[OrderRecord]) -> Vec<String> {
    let mut ids = Vec::new();
    for order in orders {
        if order.status.is_active() && order.is_single_leg_stc(symbol) {
            ids.push(order.id.clone());
        }
        let parent_relevant = order.status.is_active() || order.status == OrderStatus::Filled;
        if order.strategy == StrategyType::Triggered && parent_relevant {
            if let Some(child) = &order.child {
                if child.status.is_active() && child.is_single_leg_stc(symbol) {
                    ids.push(child.id.clone());
                }
            }
        }
    }
    ids
}

/// Round a dollar amount to whole cents, half a cent rounding up.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
