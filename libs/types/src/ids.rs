//! Protocol identifiers
//!
//! Clients name their own orders: a `(client_id, order_id)` pair is the only
//! identity an order ever has. `OrderKey` packs the pair into a single 64-bit
//! key used by the identity index and the duplicate-id guard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a trading participant
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ClientId(u32);

impl ClientId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-assigned order identifier, unique per client within a session
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct OrderId(u32);

impl OrderId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally unique order identity within one book
///
/// Client id in the high word, order id in the low word, so keys from the
/// same client sort together.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderKey(u64);

impl OrderKey {
    pub const fn new(client_id: ClientId, order_id: OrderId) -> Self {
        Self(((client_id.as_u32() as u64) << 32) | order_id.as_u32() as u64)
    }

    pub const fn client_id(&self) -> ClientId {
        ClientId::new((self.0 >> 32) as u32)
    }

    pub const fn order_id(&self) -> OrderId {
        OrderId::new(self.0 as u32)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.client_id(), self.order_id())
    }
}
