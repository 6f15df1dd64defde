use log::warn;
use std::collections::HashMap;
use trader_api::model::{
    LegInstruction, OrderLeg, OrderPlan, OrderReceipt, OrderRecord, OrderStatus, StrategyType,
};
use trader_api::traits::{BrokerError, BrokerGateway};
use uuid::Uuid;

/// In-memory brokerage simulation.
///
/// Limit buys fill immediately at their limit and leave the linked stop
/// order working; market sells fill immediately. Stop orders rest until
/// cancelled, there is no market data to trigger them.
#[derive(Default)]
pub struct PaperBroker {
    positions: HashMap<String, f64>,
    orders: Vec<OrderRecord>,
}

impl PaperBroker {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn stop_order(symbol: &str) -> OrderRecord {
        OrderRecord {
            id: Self::fresh_id(),
            status: OrderStatus::Working,
            strategy: StrategyType::Single,
            legs: vec![OrderLeg {
                instruction: LegInstruction::SellToClose,
                symbol: symbol.to_string(),
            }],
            child: None,
        }
    }

    fn open_with_stop(&mut self, symbol: &str, quantity: u32) -> Vec<OrderReceipt> {
        let child = Self::stop_order(symbol);
        let parent = OrderRecord {
            id: Self::fresh_id(),
            status: OrderStatus::Filled,
            strategy: StrategyType::Triggered,
            legs: vec![OrderLeg {
                instruction: LegInstruction::BuyToOpen,
                symbol: symbol.to_string(),
            }],
            child: Some(Box::new(child.clone())),
        };
        let receipts = vec![
            OrderReceipt {
                order_id: parent.id.clone(),
                status: parent.status,
            },
            OrderReceipt {
                order_id: child.id.clone(),
                status: child.status,
            },
        ];
        self.orders.push(parent);
        *self.positions.entry(symbol.to_string()).or_insert(0.0) += f64::from(quantity);
        receipts
    }

    fn close_position(
        &mut self,
        symbol: &str,
        cancel_ids: &[String],
        sell_quantity: u32,
        keep_quantity: u32,
    ) -> Result<Vec<OrderReceipt>, BrokerError> {
        let mut receipts = Vec::new();
        for id in cancel_ids {
            // One failed cancel must not block the close itself.
            match self.cancel(id) {
                Ok(receipt) => receipts.push(receipt),
                Err(e) => warn!("could not cancel order {id}: {e}"),
            }
        }

        let held = self.positions.get(symbol).copied().unwrap_or(0.0);
        if held < f64::from(sell_quantity) {
            return Err(BrokerError::Rejected(format!(
                "cannot sell {sell_quantity} of {symbol}, only {held} held"
            )));
        }
        *self.positions.entry(symbol.to_string()).or_insert(0.0) -=
            f64::from(sell_quantity);

        let sell = OrderRecord {
            id: Self::fresh_id(),
            status: OrderStatus::Filled,
            strategy: StrategyType::Single,
            legs: vec![OrderLeg {
                instruction: LegInstruction::SellToClose,
                symbol: symbol.to_string(),
            }],
            child: None,
        };
        receipts.push(OrderReceipt {
            order_id: sell.id.clone(),
            status: sell.status,
        });
        self.orders.push(sell);

        if keep_quantity > 0 {
            let stop = Self::stop_order(symbol);
            receipts.push(OrderReceipt {
                order_id: stop.id.clone(),
                status: stop.status,
            });
            self.orders.push(stop);
        }
        Ok(receipts)
    }

    fn order_touches_symbol(order: &OrderRecord, symbol: &str) -> bool {
        order.legs.iter().any(|leg| leg.symbol == symbol)
            || order
                .child
                .as_ref()
                .is_some_and(|child| child.legs.iter().any(|leg| leg.symbol == symbol))
    }
}

impl BrokerGateway for PaperBroker {
    fn get_long_quantity(&self, symbol: &str) -> Result<f64, BrokerError> {
        Ok(self.positions.get(symbol).copied().unwrap_or(0.0))
    }

    fn get_active_single_leg_orders(
        &self,
        symbol: &str,
    ) -> Result<Vec<OrderRecord>, BrokerError> {
        Ok(self
            .orders
            .iter()
            .filter(|order| Self::order_touches_symbol(order, symbol))
            .cloned()
            .collect())
    }

    fn submit(
        &mut self,
        symbol: &str,
        plan: &OrderPlan,
    ) -> Result<Vec<OrderReceipt>, BrokerError> {
        match plan {
            OrderPlan::NoAction | OrderPlan::Reject { .. } => Ok(Vec::new()),
            OrderPlan::OpenWithStop { quantity, .. } => Ok(self.open_with_stop(symbol, *quantity)),
            OrderPlan::CloseAndMaybeSplit {
                cancel_ids,
                sell_quantity,
                keep_quantity,
                ..
            } => self.close_position(symbol, cancel_ids, *sell_quantity, *keep_quantity),
        }
    }

    fn cancel(&mut self, order_id: &str) -> Result<OrderReceipt, BrokerError> {
        for order in &mut self.orders {
            if order.id == order_id {
                if !order.status.is_active() {
                    return Err(BrokerError::Rejected(format!(
                        "order {order_id} is not active"
                    )));
                }
                order.status = OrderStatus::Canceled;
                return Ok(OrderReceipt {
                    order_id: order.id.clone(),
                    status: order.status,
                });
            }
            if let Some(child) = order.child.as_deref_mut() {
                if child.id == order_id {
                    if !child.status.is_active() {
                        return Err(BrokerError::Rejected(format!(
                            "order {order_id} is not active"
                        )));
                    }
                    child.status = OrderStatus::Canceled;
                    return Ok(OrderReceipt {
                        order_id: child.id.clone(),
                        status: child.status,
                    });
                }
            }
        }
        Err(BrokerError::UnknownOrder(order_id.to_string()))
    }
}
