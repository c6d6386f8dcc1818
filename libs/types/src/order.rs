//! Order and replace messages
//!
//! An `Order` is the immutable identity of a working order plus its mutable
//! residual quantity. An `OrderReplace` names an existing order and the
//! replacement that survives it. Both act as matching aggressors through the
//! [`Aggressor`] capability; the only difference between them is which order
//! id they stamp on the deals they cause.

use crate::errors::OrderError;
use crate::ids::{ClientId, OrderId, OrderKey};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderWay {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl OrderWay {
    /// Get the opposite way
    pub fn opposite(&self) -> Self {
        match self {
            OrderWay::Buy => OrderWay::Sell,
            OrderWay::Sell => OrderWay::Buy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderWay::Buy => "BUY",
            OrderWay::Sell => "SELL",
        }
    }
}

impl TryFrom<i32> for OrderWay {
    type Error = OrderError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OrderWay::Buy),
            1 => Ok(OrderWay::Sell),
            other => Err(OrderError::InvalidWay(other)),
        }
    }
}

impl fmt::Display for OrderWay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A working limit order
///
/// Identity fields never change once the order is accepted; `quantity` is
/// the residual and is decremented by the container during matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub way: OrderWay,
    pub quantity: Quantity,
    pub price: Price,
    pub client_id: ClientId,
    pub order_id: OrderId,
}

impl Order {
    pub fn new(
        way: OrderWay,
        quantity: Quantity,
        price: Price,
        client_id: ClientId,
        order_id: OrderId,
    ) -> Self {
        Self {
            way,
            quantity,
            price,
            client_id,
            order_id,
        }
    }

    /// Unique identity of this order within its book
    pub fn key(&self) -> OrderKey {
        OrderKey::new(self.client_id, self.order_id)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order: way[{}] qty[{}] price[{}] client[{}] id[{}]",
            self.way, self.quantity, self.price, self.client_id, self.order_id
        )
    }
}

/// A cancel-replace message
///
/// Erases the order working under `existing_order_id` and requeues the
/// residual quantity as a fresh arrival under `replaced_order_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReplace {
    pub way: OrderWay,
    pub quantity: Quantity,
    pub price: Price,
    pub client_id: ClientId,
    pub existing_order_id: OrderId,
    pub replaced_order_id: OrderId,
}

impl OrderReplace {
    pub fn new(
        way: OrderWay,
        quantity: Quantity,
        price: Price,
        client_id: ClientId,
        existing_order_id: OrderId,
        replaced_order_id: OrderId,
    ) -> Self {
        Self {
            way,
            quantity,
            price,
            client_id,
            existing_order_id,
            replaced_order_id,
        }
    }

    pub fn existing_key(&self) -> OrderKey {
        OrderKey::new(self.client_id, self.existing_order_id)
    }

    pub fn replaced_key(&self) -> OrderKey {
        OrderKey::new(self.client_id, self.replaced_order_id)
    }
}

/// Matching-aggressor capability
///
/// The matching loop consumes any incoming message through this trait. The
/// aggressor order id is the one stamped on generated deals: an order uses
/// its own id, a replace uses the replacement id.
pub trait Aggressor {
    fn way(&self) -> OrderWay;
    fn price(&self) -> Price;
    fn quantity(&self) -> Quantity;
    fn client_id(&self) -> ClientId;
    fn aggressor_order_id(&self) -> OrderId;
    fn remove_quantity(&mut self, quantity: Quantity);
}

impl Aggressor for Order {
    fn way(&self) -> OrderWay {
        self.way
    }

    fn price(&self) -> Price {
        self.price
    }

    fn quantity(&self) -> Quantity {
        self.quantity
    }

    fn client_id(&self) -> ClientId {
        self.client_id
    }

    fn aggressor_order_id(&self) -> OrderId {
        self.order_id
    }

    fn remove_quantity(&mut self, quantity: Quantity) {
        self.quantity -= quantity;
    }
}

impl Aggressor for OrderReplace {
    fn way(&self) -> OrderWay {
        self.way
    }

    fn price(&self) -> Price {
        self.price
    }

    fn quantity(&self) -> Quantity {
        self.quantity
    }

    fn client_id(&self) -> ClientId {
        self.client_id
    }

    fn aggressor_order_id(&self) -> OrderId {
        self.replaced_order_id
    }

    fn remove_quantity(&mut self, quantity: Quantity) {
        self.quantity -= quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy_order() -> Order {
        Order::new(
            OrderWay::Buy,
            Quantity::new(100),
            Price::new(150),
            ClientId::new(1),
            OrderId::new(5),
        )
    }

    #[test]
    fn test_way_opposite() {
        assert_eq!(OrderWay::Buy.opposite(), OrderWay::Sell);
        assert_eq!(OrderWay::Sell.opposite(), OrderWay::Buy);
    }

    #[test]
    fn test_way_try_from() {
        assert_eq!(OrderWay::try_from(0).unwrap(), OrderWay::Buy);
        assert_eq!(OrderWay::try_from(1).unwrap(), OrderWay::Sell);
        assert_eq!(OrderWay::try_from(27), Err(OrderError::InvalidWay(27)));
        assert_eq!(OrderWay::try_from(-1), Err(OrderError::InvalidWay(-1)));
    }

    #[test]
    fn test_order_key() {
        let order = buy_order();
        assert_eq!(order.key().client_id(), ClientId::new(1));
        assert_eq!(order.key().order_id(), OrderId::new(5));
    }

    #[test]
    fn test_order_aggresses_under_its_own_id() {
        let mut order = buy_order();
        assert_eq!(order.aggressor_order_id(), OrderId::new(5));

        order.remove_quantity(Quantity::new(40));
        assert_eq!(order.quantity, Quantity::new(60));
    }

    #[test]
    fn test_replace_aggresses_under_replacement_id() {
        let replace = OrderReplace::new(
            OrderWay::Sell,
            Quantity::new(50),
            Price::new(140),
            ClientId::new(2),
            OrderId::new(8),
            OrderId::new(9),
        );
        assert_eq!(replace.aggressor_order_id(), OrderId::new(9));
        assert_eq!(replace.existing_key().order_id(), OrderId::new(8));
        assert_eq!(replace.replaced_key().order_id(), OrderId::new(9));
    }

    #[test]
    fn test_order_serialization() {
        let order = buy_order();
        let json = serde_json::to_string(&order).unwrap();
        let decoded: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, decoded);
        assert!(json.contains("\"BUY\""));
    }
}
