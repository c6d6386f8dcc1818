//! Dual-sided indexed order store
//!
//! The container owns both side books and runs the two matching
//! disciplines over them: aggressive crossing against the opposite side
//! during continuous trading, and uniform-price uncrossing when an auction
//! ends. Deals are accumulated into a caller-supplied buffer in production
//! order, best-priority resting order first.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;
use types::deal::Deal;
use types::errors::OrderError;
use types::ids::{ClientId, OrderId, OrderKey};
use types::numeric::{Price, Quantity};
use types::order::{Aggressor, Order, OrderReplace, OrderWay};

use super::ask_book::AskBook;
use super::bid_book::BidBook;
use super::price_level::PriceLevel;

/// Rendering mode for the human-readable book dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One row per resting order
    #[default]
    ByOrder,
    /// One row per price level
    ByPrice,
}

/// One aggregated price level of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub order_count: u32,
    pub quantity: Quantity,
    pub price: Price,
}

/// Dual-indexed order store for one instrument
///
/// Each side supports price-priority iteration and identity lookup over
/// the same set of orders. `inserted_ids` remembers every identity ever
/// accepted this session and is never pruned: a key is usable exactly
/// once, even after a full fill, cancel or replace.
#[derive(Debug, Clone, Default)]
pub struct OrderContainer {
    bids: BidBook,
    asks: AskBook,
    inserted_ids: HashSet<OrderKey>,
    view_mode: ViewMode,
}

impl OrderContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order, matching it against the opposite side first when
    /// `matching` is set
    ///
    /// Deals generated by the matching pass are appended to `deals`; the
    /// residual, if any, rests on the order's own side.
    pub fn insert(
        &mut self,
        mut order: Order,
        matching: bool,
        deals: &mut Vec<Deal>,
    ) -> Result<(), OrderError> {
        let key = order.key();
        if self.inserted_ids.contains(&key) {
            return Err(OrderError::Duplicate {
                client_id: order.client_id,
                order_id: order.order_id,
            });
        }

        if matching {
            let match_qty = self
                .executable_quantity(order.price, order.way)
                .min(order.quantity);
            if !match_qty.is_zero() {
                self.process_deals(&mut order, match_qty, deals);
            }
        }

        if !order.quantity.is_zero() {
            let accepted = match order.way {
                OrderWay::Buy => self.bids.insert(order),
                OrderWay::Sell => self.asks.insert(order),
            };
            if !accepted {
                return Err(OrderError::Duplicate {
                    client_id: order.client_id,
                    order_id: order.order_id,
                });
            }
        }

        self.inserted_ids.insert(key);
        Ok(())
    }

    /// Total opposite-side quantity executable against a limit at `price`
    pub fn executable_quantity(&self, price: Price, way: OrderWay) -> Quantity {
        match way {
            OrderWay::Buy => self.asks.executable_quantity(price),
            OrderWay::Sell => self.bids.executable_quantity(price),
        }
    }

    /// Cross an aggressor against the opposite side for exactly `match_qty`
    ///
    /// Price-time priority: best-priced, earliest-arrived resting orders are
    /// consumed first. The execution price is the lower of the resting and
    /// aggressor limits. Must only be called with `match_qty` no larger than
    /// the aggressor quantity and the opposite-side executable quantity.
    fn process_deals<A: Aggressor>(
        &mut self,
        aggressor: &mut A,
        mut match_qty: Quantity,
        deals: &mut Vec<Deal>,
    ) {
        while !match_qty.is_zero() {
            let resting = match aggressor.way() {
                OrderWay::Buy => self.asks.front(),
                OrderWay::Sell => self.bids.front(),
            };
            let Some(resting) = resting else {
                break;
            };

            let exec_qty = resting.quantity.min(aggressor.quantity());
            let exec_price = resting.price.min(aggressor.price());

            aggressor.remove_quantity(exec_qty);
            match aggressor.way() {
                OrderWay::Buy => self.asks.reduce_front(exec_qty),
                OrderWay::Sell => self.bids.reduce_front(exec_qty),
            }
            match_qty -= exec_qty;

            let deal = if resting.way == OrderWay::Buy {
                Deal::new(
                    exec_price,
                    exec_qty,
                    resting.client_id,
                    resting.order_id,
                    aggressor.client_id(),
                    aggressor.aggressor_order_id(),
                )
            } else {
                Deal::new(
                    exec_price,
                    exec_qty,
                    aggressor.client_id(),
                    aggressor.aggressor_order_id(),
                    resting.client_id,
                    resting.order_id,
                )
            };
            debug!(%deal, "deal generated");
            deals.push(deal);
        }
    }

    /// Erase a resting order from the named side
    ///
    /// The identity stays in the duplicate guard: a cancelled id cannot be
    /// reused within the session.
    pub fn delete(&mut self, order_id: OrderId, client_id: ClientId, way: OrderWay) -> bool {
        let key = OrderKey::new(client_id, order_id);
        match way {
            OrderWay::Buy => self.bids.remove(key).is_some(),
            OrderWay::Sell => self.asks.remove(key).is_some(),
        }
    }

    /// Replace a working order
    ///
    /// The replacement may match first; any residual is requeued under the
    /// replacement id as a fresh arrival, losing the original time priority.
    /// Both the old and the new identity are retired from further use.
    pub fn modify(
        &mut self,
        mut replace: OrderReplace,
        matching: bool,
        deals: &mut Vec<Deal>,
    ) -> Result<(), OrderError> {
        let old_key = replace.existing_key();
        let new_key = replace.replaced_key();

        if self.inserted_ids.contains(&new_key) {
            return Err(OrderError::Duplicate {
                client_id: replace.client_id,
                order_id: replace.replaced_order_id,
            });
        }

        let present = match replace.way {
            OrderWay::Buy => self.bids.contains(old_key),
            OrderWay::Sell => self.asks.contains(old_key),
        };
        if !present {
            return Err(OrderError::NotFound {
                client_id: replace.client_id,
                order_id: replace.existing_order_id,
            });
        }

        if matching {
            let match_qty = self
                .executable_quantity(replace.price, replace.way)
                .min(replace.quantity);
            if !match_qty.is_zero() {
                self.process_deals(&mut replace, match_qty, deals);
            }
        }

        match replace.way {
            OrderWay::Buy => {
                self.bids.remove(old_key);
                if !replace.quantity.is_zero() {
                    self.bids.insert(Order::new(
                        replace.way,
                        replace.quantity,
                        replace.price,
                        replace.client_id,
                        replace.replaced_order_id,
                    ));
                }
            }
            OrderWay::Sell => {
                self.asks.remove(old_key);
                if !replace.quantity.is_zero() {
                    self.asks.insert(Order::new(
                        replace.way,
                        replace.quantity,
                        replace.price,
                        replace.client_id,
                        replace.replaced_order_id,
                    ));
                }
            }
        }

        self.inserted_ids.insert(old_key);
        self.inserted_ids.insert(new_key);
        Ok(())
    }

    /// Drain the whole book, ask side first, best price first on each side
    ///
    /// Returns the removed orders in emission order for unsolicited-cancel
    /// reporting.
    pub fn cancel_all_orders(&mut self) -> Vec<Order> {
        let mut cancelled = self.asks.drain();
        cancelled.extend(self.bids.drain());
        cancelled
    }

    /// Theoretical uncrossing price and executable quantity
    ///
    /// Candidate prices are the resting ask prices, scanned in priority
    /// order; on equal volume the first candidate wins. Returns `(0, 0)`
    /// when the ask side is empty. A crossing that peaks strictly between
    /// two ask prices is not considered; without market orders the
    /// best-bid/best-ask bracketing rule is not needed.
    pub fn theoretical_auction_info(&self) -> (Price, Quantity) {
        let mut max_qty = Quantity::ZERO;
        let mut open_price = Price::ZERO;

        for (price, _) in self.asks.levels() {
            let bid_qty = self.bids.executable_quantity(price);
            let ask_qty = self.asks.executable_quantity(price);
            let current_qty = bid_qty.min(ask_qty);

            if current_qty > max_qty {
                max_qty = current_qty;
                open_price = price;
            }
        }
        (open_price, max_qty)
    }

    /// Uncross the book at the theoretical auction price
    ///
    /// Pairs best bids with best asks, every deal printing at the single
    /// matching price, until the theoretical quantity is exhausted. Returns
    /// the matching price and quantity.
    pub fn match_orders(&mut self, deals: &mut Vec<Deal>) -> (Price, Quantity) {
        let (matching_price, matching_qty) = self.theoretical_auction_info();

        let mut remaining = matching_qty;
        while !remaining.is_zero() {
            let Some(bid) = self.bids.front() else {
                break;
            };
            let mut bid_qty = bid.quantity;

            while !bid_qty.is_zero() && !remaining.is_zero() {
                let Some(ask) = self.asks.front() else {
                    break;
                };

                let exec_qty = ask.quantity.min(bid_qty);
                self.asks.reduce_front(exec_qty);
                self.bids.reduce_front(exec_qty);

                deals.push(Deal::new(
                    matching_price,
                    exec_qty,
                    bid.client_id,
                    bid.order_id,
                    ask.client_id,
                    ask.order_id,
                ));

                remaining -= exec_qty;
                bid_qty -= exec_qty;
            }
        }
        (matching_price, matching_qty)
    }

    /// Flat per-side listing of resting orders in priority order
    pub fn by_order_view(&self) -> (Vec<Order>, Vec<Order>) {
        (
            self.bids.orders().copied().collect(),
            self.asks.orders().copied().collect(),
        )
    }

    /// Per-side aggregation by price level, in priority order
    pub fn aggregated_view(&self) -> (Vec<Limit>, Vec<Limit>) {
        fn aggregate<'a>(levels: impl Iterator<Item = (Price, &'a PriceLevel)>) -> Vec<Limit> {
            levels
                .map(|(price, level)| Limit {
                    order_count: level.order_count() as u32,
                    quantity: level.total_quantity(),
                    price,
                })
                .collect()
        }

        (
            aggregate(self.bids.levels()),
            aggregate(self.asks.levels()),
        )
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    fn stream_by_order(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bids, asks) = self.by_order_view();

        writeln!(f, "|        BID         |        ASK        |")?;
        writeln!(f, "|                    |                   |")?;

        let rows = bids.len().max(asks.len());
        for row in 0..rows {
            let bid_entry = bids
                .get(row)
                .map(|order| format!("{}@{}", order.quantity, order.price))
                .unwrap_or_else(|| "0".to_string());
            let ask_entry = asks
                .get(row)
                .map(|order| format!("{}@{}", order.quantity, order.price))
                .unwrap_or_else(|| "0".to_string());
            writeln!(f, "|{:>13}       |{:>13}      |", bid_entry, ask_entry)?;
        }
        Ok(())
    }

    fn stream_by_price(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bids, asks) = self.aggregated_view();

        writeln!(f, "|         BID          |         ASK         |")?;
        writeln!(f, "|                      |                     |")?;

        let rows = bids.len().max(asks.len());
        for row in 0..rows {
            let bid_entry = bids
                .get(row)
                .map(|limit| format!("  {}   {}@{}", limit.order_count, limit.quantity, limit.price))
                .unwrap_or_else(|| "0".to_string());
            let ask_entry = asks
                .get(row)
                .map(|limit| format!("  {}   {}@{}", limit.order_count, limit.quantity, limit.price))
                .unwrap_or_else(|| "0".to_string());
            writeln!(f, "|{:>15}       |{:>15}      |", bid_entry, ask_entry)?;
        }
        Ok(())
    }
}

impl fmt::Display for OrderContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.view_mode {
            ViewMode::ByOrder => self.stream_by_order(f),
            ViewMode::ByPrice => self.stream_by_price(f),
        }
    }
}
