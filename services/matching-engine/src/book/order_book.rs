//! Per-instrument order book façade
//!
//! Owns the order container, the market-data state and the trading-phase
//! machine. Commands are validated here, delegated to the container, and
//! the resulting deals are interpreted into market data before being
//! handed to the host.

use std::fmt;

use tracing::{debug, info, warn};
use types::deal::Deal;
use types::errors::OrderError;
use types::ids::{ClientId, OrderId};
use types::instrument::Instrument;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderReplace, OrderWay};
use types::phase::TradingPhase;

use super::container::{Limit, OrderContainer, ViewMode};
use crate::events::EngineEventHandler;

/// Order book for one instrument
///
/// Single-threaded: every operation completes synchronously and the caller
/// serializes access.
#[derive(Debug)]
pub struct OrderBook {
    instrument: Instrument,
    container: OrderContainer,
    phase: TradingPhase,
    last_price: Price,
    open_price: Price,
    close_price: Price,
    post_auction_price: Price,
    /// Sum of price times quantity over every deal this session
    turnover: u64,
    /// Sum of quantities over every deal this session
    daily_volume: Quantity,
    /// Allowed deviation from the post-auction price, in percent
    max_price_deviation: u64,
}

impl OrderBook {
    /// Create a book in the CLOSE phase, seeded from the previous close
    pub fn new(instrument: Instrument, max_price_deviation: u64) -> Self {
        let previous_close = instrument.previous_close();
        Self {
            instrument,
            container: OrderContainer::new(),
            phase: TradingPhase::Close,
            last_price: previous_close,
            open_price: Price::ZERO,
            close_price: previous_close,
            post_auction_price: previous_close,
            turnover: 0,
            daily_volume: Quantity::ZERO,
            max_price_deviation,
        }
    }

    /// Insert a limit order
    ///
    /// Matching runs only during continuous trading; auction phases
    /// accumulate the order silently.
    pub fn insert<H: EngineEventHandler>(&mut self, handler: &mut H, order: Order) -> bool {
        match self.try_insert(handler, order) {
            Ok(()) => true,
            Err(err) => {
                warn!(instrument = %self.instrument.name(), %err, "insert rejected");
                false
            }
        }
    }

    fn try_insert<H: EngineEventHandler>(
        &mut self,
        handler: &mut H,
        order: Order,
    ) -> Result<(), OrderError> {
        Self::validate(order.price, order.quantity)?;

        let mut deals = Vec::new();
        let matching = self.phase == TradingPhase::ContinuousTrading;
        self.container.insert(order, matching, &mut deals)?;
        self.apply_deals(handler, deals);
        Ok(())
    }

    /// Replace a working order
    pub fn modify<H: EngineEventHandler>(&mut self, handler: &mut H, replace: OrderReplace) -> bool {
        match self.try_modify(handler, replace) {
            Ok(()) => true,
            Err(err) => {
                warn!(instrument = %self.instrument.name(), %err, "modify rejected");
                false
            }
        }
    }

    fn try_modify<H: EngineEventHandler>(
        &mut self,
        handler: &mut H,
        replace: OrderReplace,
    ) -> Result<(), OrderError> {
        Self::validate(replace.price, replace.quantity)?;

        let mut deals = Vec::new();
        let matching = self.phase == TradingPhase::ContinuousTrading;
        self.container.modify(replace, matching, &mut deals)?;
        self.apply_deals(handler, deals);
        Ok(())
    }

    /// Cancel a working order
    pub fn cancel(&mut self, order_id: OrderId, client_id: ClientId, way: OrderWay) -> bool {
        let removed = self.container.delete(order_id, client_id, way);
        if !removed {
            warn!(
                instrument = %self.instrument.name(),
                %client_id,
                %order_id,
                "cancel rejected, order not found"
            );
        }
        removed
    }

    /// Drain the book, reporting each removed order as unsolicited
    pub fn cancel_all_orders<H: EngineEventHandler>(&mut self, handler: &mut H) {
        for order in self.container.cancel_all_orders() {
            handler.on_unsolicited_cancel(order);
        }
    }

    /// Switch the trading phase
    ///
    /// Leaving an auction phase toward its scheduled successor uncrosses
    /// the book first and publishes the matching price; entering or
    /// leaving the intraday auction keeps the host's monitored set in
    /// step. Same-phase commands are a no-op.
    pub fn set_trading_phase<H: EngineEventHandler>(
        &mut self,
        handler: &mut H,
        phase: TradingPhase,
    ) -> bool {
        if phase == self.phase {
            return true;
        }

        let from = self.phase;
        match (from, phase) {
            (TradingPhase::OpeningAuction, TradingPhase::ContinuousTrading) => {
                if let Some(price) = self.uncross(handler) {
                    self.open_price = price;
                    self.post_auction_price = price;
                }
            }
            (TradingPhase::IntradayAuction, TradingPhase::ContinuousTrading) => {
                if let Some(price) = self.uncross(handler) {
                    self.post_auction_price = price;
                }
            }
            (TradingPhase::ClosingAuction, TradingPhase::Close) => {
                if let Some(price) = self.uncross(handler) {
                    self.close_price = price;
                    self.post_auction_price = price;
                }
            }
            _ => {}
        }

        if from == TradingPhase::IntradayAuction {
            handler.unregister_monitored(self.instrument.name());
        }
        if phase == TradingPhase::IntradayAuction {
            handler.register_monitored(self.instrument.name());
        }

        info!(
            instrument = %self.instrument.name(),
            %from,
            to = %phase,
            "trading phase changed"
        );
        self.phase = phase;
        true
    }

    /// Uncross the book, returning the matching price if anything traded
    ///
    /// Runs while the auction phase is still in effect, so the auction
    /// deals are exempt from the deviation check.
    fn uncross<H: EngineEventHandler>(&mut self, handler: &mut H) -> Option<Price> {
        let mut deals = Vec::new();
        let (price, quantity) = self.container.match_orders(&mut deals);
        debug!(
            instrument = %self.instrument.name(),
            %price,
            %quantity,
            "auction uncrossed"
        );

        let matched = !deals.is_empty();
        self.apply_deals(handler, deals);
        matched.then_some(price)
    }

    /// Fold a batch of deals into the market data and forward them
    ///
    /// A continuous-trading deal outside the deviation band arms the
    /// circuit breaker; the switch happens only after the whole batch has
    /// been delivered, so the triggering deal is still emitted.
    fn apply_deals<H: EngineEventHandler>(&mut self, handler: &mut H, deals: Vec<Deal>) {
        let mut deviated = false;
        for deal in deals {
            self.last_price = deal.price();
            self.turnover += deal.notional();
            self.daily_volume += deal.quantity();

            if self.phase == TradingPhase::ContinuousTrading
                && self.outside_deviation_band(deal.price())
            {
                deviated = true;
            }
            handler.on_deal(deal);
        }

        if deviated {
            info!(
                instrument = %self.instrument.name(),
                reference = %self.post_auction_price,
                last = %self.last_price,
                "deal outside deviation band, switching to intraday auction"
            );
            self.set_trading_phase(handler, TradingPhase::IntradayAuction);
        }
    }

    /// Whether a deal price violates the allowed band around the
    /// post-auction reference price
    fn outside_deviation_band(&self, price: Price) -> bool {
        let reference = self.post_auction_price;
        price.distance(reference) * 100 > reference.as_u64() * self.max_price_deviation
    }

    fn validate(price: Price, quantity: Quantity) -> Result<(), OrderError> {
        if quantity.is_zero() {
            return Err(OrderError::InvalidQuantity);
        }
        if price.is_zero() {
            return Err(OrderError::InvalidPrice);
        }
        Ok(())
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn trading_phase(&self) -> TradingPhase {
        self.phase
    }

    pub fn last_price(&self) -> Price {
        self.last_price
    }

    pub fn open_price(&self) -> Price {
        self.open_price
    }

    pub fn close_price(&self) -> Price {
        self.close_price
    }

    pub fn post_auction_price(&self) -> Price {
        self.post_auction_price
    }

    pub fn turnover(&self) -> u64 {
        self.turnover
    }

    pub fn daily_volume(&self) -> Quantity {
        self.daily_volume
    }

    /// Flat per-side listing of resting orders in priority order
    pub fn by_order_view(&self) -> (Vec<Order>, Vec<Order>) {
        self.container.by_order_view()
    }

    /// Per-side aggregation by price level, in priority order
    pub fn aggregated_view(&self) -> (Vec<Limit>, Vec<Limit>) {
        self.container.aggregated_view()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.container.set_view_mode(mode);
    }
}

impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.container.fmt(f)
    }
}
