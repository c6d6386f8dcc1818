//! Bid (buy-side) order book
//!
//! Buy orders sorted by price descending (best bid first). Two indexes over
//! the same set, kept in lockstep: price levels for priority iteration and
//! an identity map for `(client_id, order_id)` lookup.

use std::collections::{BTreeMap, HashMap};
use types::ids::OrderKey;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Bid (buy) side order book
///
/// The highest price is the best bid; within a level orders queue FIFO.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels; iteration is ascending, so best bid is the last entry
    levels: BTreeMap<Price, PriceLevel>,
    /// Identity index into the levels
    index: HashMap<OrderKey, Price>,
}

impl BidBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    /// Insert an order as a fresh arrival at its price level
    ///
    /// Returns false when the identity is already present on this side.
    pub fn insert(&mut self, order: Order) -> bool {
        let key = order.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, order.price);
        self.levels.entry(order.price).or_default().push_back(order);
        true
    }

    /// Remove an order by identity
    pub fn remove(&mut self, key: OrderKey) -> Option<Order> {
        let price = self.index.remove(&key)?;
        let level = self.levels.get_mut(&price)?;
        let order = level.remove(key);
        if level.is_empty() {
            self.levels.remove(&price);
        }
        order
    }

    pub fn contains(&self, key: OrderKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Best bid price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Best-priced, earliest-arrived resting order
    pub fn front(&self) -> Option<Order> {
        let (_, level) = self.levels.iter().next_back()?;
        level.front().copied()
    }

    /// Consume quantity from the front order, unindexing it when filled
    pub fn reduce_front(&mut self, quantity: Quantity) {
        let Some(price) = self.best_price() else {
            return;
        };
        if let Some(level) = self.levels.get_mut(&price) {
            if let Some(filled) = level.reduce_front(quantity) {
                self.index.remove(&filled.key());
            }
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    /// Total resting quantity executable against a sell limit at `price`,
    /// i.e. over every bid priced at or above it
    pub fn executable_quantity(&self, price: Price) -> Quantity {
        self.levels
            .range(price..)
            .fold(Quantity::ZERO, |sum, (_, level)| {
                sum + level.total_quantity()
            })
    }

    /// Orders in price-time priority order (best bid first)
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.levels.iter().rev().flat_map(|(_, level)| level.iter())
    }

    /// Price levels in priority order (best bid first)
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    /// Remove every order, best price first
    pub fn drain(&mut self) -> Vec<Order> {
        let mut orders = Vec::with_capacity(self.index.len());
        for (_, level) in self.levels.iter().rev() {
            orders.extend(level.iter().copied());
        }
        self.levels.clear();
        self.index.clear();
        orders
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{ClientId, OrderId};
    use types::order::OrderWay;

    fn bid(order_id: u32, qty: u64, price: u64) -> Order {
        Order::new(
            OrderWay::Buy,
            Quantity::new(qty),
            Price::new(price),
            ClientId::new(1),
            OrderId::new(order_id),
        )
    }

    #[test]
    fn test_best_bid_is_highest_price() {
        let mut book = BidBook::new();
        book.insert(bid(1, 100, 150));
        book.insert(bid(2, 100, 152));
        book.insert(bid(3, 100, 148));

        assert_eq!(book.best_price(), Some(Price::new(152)));
        assert_eq!(book.front().unwrap().order_id, OrderId::new(2));
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let mut book = BidBook::new();
        assert!(book.insert(bid(1, 100, 150)));
        assert!(!book.insert(bid(1, 50, 151)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_priority_iteration_price_then_time() {
        let mut book = BidBook::new();
        book.insert(bid(1, 100, 150));
        book.insert(bid(2, 100, 152));
        book.insert(bid(3, 100, 150));

        let ids: Vec<u32> = book.orders().map(|o| o.order_id.as_u32()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_executable_quantity_sums_at_or_above_limit() {
        let mut book = BidBook::new();
        book.insert(bid(1, 100, 150));
        book.insert(bid(2, 50, 152));
        book.insert(bid(3, 25, 148));

        assert_eq!(book.executable_quantity(Price::new(150)), Quantity::new(150));
        assert_eq!(book.executable_quantity(Price::new(148)), Quantity::new(175));
        assert_eq!(book.executable_quantity(Price::new(153)), Quantity::ZERO);
    }

    #[test]
    fn test_reduce_front_consumes_best_level() {
        let mut book = BidBook::new();
        book.insert(bid(1, 100, 152));
        book.insert(bid(2, 100, 150));

        book.reduce_front(Quantity::new(100));
        assert_eq!(book.len(), 1);
        assert_eq!(book.best_price(), Some(Price::new(150)));
        assert!(!book.contains(bid(1, 0, 0).key()));
    }

    #[test]
    fn test_remove_clears_empty_level() {
        let mut book = BidBook::new();
        book.insert(bid(1, 100, 150));

        let removed = book.remove(bid(1, 0, 0).key()).unwrap();
        assert_eq!(removed.order_id, OrderId::new(1));
        assert!(book.is_empty());
        assert_eq!(book.best_price(), None);
    }

    #[test]
    fn test_drain_best_price_first() {
        let mut book = BidBook::new();
        book.insert(bid(1, 100, 150));
        book.insert(bid(2, 100, 152));
        book.insert(bid(3, 100, 150));

        let drained: Vec<u32> = book.drain().iter().map(|o| o.order_id.as_u32()).collect();
        assert_eq!(drained, vec![2, 1, 3]);
        assert!(book.is_empty());
    }
}
