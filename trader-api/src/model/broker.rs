use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Working,
    Queued,
    Accepted,
    Filled,
    Canceled,
    Rejected,
}

impl OrderStatus {
    /// Working, queued and accepted orders can still execute and are the
    /// ones worth cancelling before placing a replacement.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Working | OrderStatus::Queued | OrderStatus::Accepted
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyType {
    Single,
    /// Parent order whose fill submits a linked child order.
    Triggered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegInstruction {
    BuyToOpen,
    SellToClose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLeg {
    pub instruction: LegInstruction,
    pub symbol: String,
}

/// Broker-side view of an order, one level of child nesting included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub status: OrderStatus,
    pub strategy: StrategyType,
    pub legs: Vec<OrderLeg>,
    #[serde(default)]
    pub child: Option<Box<OrderRecord>>,
}

impl OrderRecord {
    /// The single sell-to-close leg symbol check used when hunting for
    /// existing close orders. Multi-leg orders never match.
    pub fn is_single_leg_stc(&self, symbol: &str) -> bool {
        self.legs.len() == 1
            && self.legs[0].instruction == LegInstruction::SellToClose
            && self.legs[0].symbol == symbol
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub status: OrderStatus,
}
