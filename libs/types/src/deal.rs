//! Executed deal record
//!
//! One deal is one fill between a resting order and an aggressor. Deals are
//! immutable once constructed; the reference is stamped later by the
//! downstream collaborator that assigns public trade references.

use crate::ids::{ClientId, OrderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single matched fill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    price: Price,
    quantity: Quantity,
    buyer_client_id: ClientId,
    buyer_order_id: OrderId,
    seller_client_id: ClientId,
    seller_order_id: OrderId,
    /// Wall-clock time of execution, unix nanoseconds
    timestamp: i64,
    /// Downstream trade reference, empty until assigned
    reference: String,
}

impl Deal {
    pub fn new(
        price: Price,
        quantity: Quantity,
        buyer_client_id: ClientId,
        buyer_order_id: OrderId,
        seller_client_id: ClientId,
        seller_order_id: OrderId,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as i64)
            .unwrap_or(0);

        Self {
            price,
            quantity,
            buyer_client_id,
            buyer_order_id,
            seller_client_id,
            seller_order_id,
            timestamp,
            reference: String::new(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn buyer_client_id(&self) -> ClientId {
        self.buyer_client_id
    }

    pub fn buyer_order_id(&self) -> OrderId {
        self.buyer_order_id
    }

    pub fn seller_client_id(&self) -> ClientId {
        self.seller_client_id
    }

    pub fn seller_order_id(&self) -> OrderId {
        self.seller_order_id
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.reference = reference.into();
    }

    /// Traded value, price times quantity
    pub fn notional(&self) -> u64 {
        self.quantity * self.price
    }
}

/// Equality ignores the execution timestamp and the downstream reference
impl PartialEq for Deal {
    fn eq(&self, other: &Self) -> bool {
        self.price == other.price
            && self.quantity == other.quantity
            && self.buyer_client_id == other.buyer_client_id
            && self.buyer_order_id == other.buyer_order_id
            && self.seller_client_id == other.seller_client_id
            && self.seller_order_id == other.seller_order_id
    }
}

impl Eq for Deal {}

impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deal: price[{}] qty[{}] buyer[{}/{}] seller[{}/{}] reference[{}]",
            self.price,
            self.quantity,
            self.buyer_client_id,
            self.buyer_order_id,
            self.seller_client_id,
            self.seller_order_id,
            self.reference
        )
    }
}
