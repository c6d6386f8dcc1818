//! Ask (sell-side) order book
//!
//! Sell orders sorted by price ascending (best ask first). Mirror of the
//! bid side with the priority direction and executable predicate flipped.

use std::collections::{BTreeMap, HashMap};
use types::ids::OrderKey;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Ask (sell) side order book
///
/// The lowest price is the best ask; within a level orders queue FIFO.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Price levels; iteration is ascending, so best ask is the first entry
    levels: BTreeMap<Price, PriceLevel>,
    /// Identity index into the levels
    index: HashMap<OrderKey, Price>,
}

impl AskBook {
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

    /// Best ask price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Best-priced, earliest-arrived resting order
    pub fn front(&self) -> Option<Order> {
        let (_, level) = self.levels.iter().next()?;
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

    /// Total resting quantity executable against a buy limit at `price`,
    /// i.e. over every ask priced at or below it
    pub fn executable_quantity(&self, price: Price) -> Quantity {
        self.levels
            .range(..=price)
            .fold(Quantity::ZERO, |sum, (_, level)| {
                sum + level.total_quantity()
            })
    }

    /// Orders in price-time priority order (best ask first)
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.levels.iter().flat_map(|(_, level)| level.iter())
    }

    /// Price levels in priority order (best ask first)
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    /// Remove every order, best price first
    pub fn drain(&mut self) -> Vec<Order> {
        let mut orders = Vec::with_capacity(self.index.len());
        for (_, level) in self.levels.iter() {
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

    fn ask(order_id: u32, qty: u64, price: u64) -> Order {
        Order::new(
            OrderWay::Sell,
            Quantity::new(qty),
            Price::new(price),
            ClientId::new(1),
            OrderId::new(order_id),
        )
    }

    #[test]
    fn test_best_ask_is_lowest_price() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 150));
        book.insert(ask(2, 100, 148));
        book.insert(ask(3, 100, 152));

        assert_eq!(book.best_price(), Some(Price::new(148)));
        assert_eq!(book.front().unwrap().order_id, OrderId::new(2));
    }

    #[test]
    fn test_priority_iteration_price_then_time() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 150));
        book.insert(ask(2, 100, 148));
        book.insert(ask(3, 100, 150));

        let ids: Vec<u32> = book.orders().map(|o| o.order_id.as_u32()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_executable_quantity_sums_at_or_below_limit() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 150));
        book.insert(ask(2, 50, 148));
        book.insert(ask(3, 25, 152));

        assert_eq!(book.executable_quantity(Price::new(150)), Quantity::new(150));
        assert_eq!(book.executable_quantity(Price::new(152)), Quantity::new(175));
        assert_eq!(book.executable_quantity(Price::new(147)), Quantity::ZERO);
    }

    #[test]
    fn test_reduce_front_consumes_best_level() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 148));
        book.insert(ask(2, 100, 150));

        book.reduce_front(Quantity::new(40));
        assert_eq!(book.front().unwrap().quantity, Quantity::new(60));

        book.reduce_front(Quantity::new(60));
        assert_eq!(book.best_price(), Some(Price::new(150)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_drain_best_price_first() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 150));
        book.insert(ask(2, 100, 148));
        book.insert(ask(3, 100, 150));

        let drained: Vec<u32> = book.drain().iter().map(|o| o.order_id.as_u32()).collect();
        assert_eq!(drained, vec![2, 1, 3]);
        assert!(book.is_empty());
    }
}
