//! Matching engine host
//!
//! Owns one order book per instrument and the supervisor the books report
//! into: deals and unsolicited cancels are forwarded to the external sink,
//! and the set of books sitting in the intraday-auction circuit-breaker
//! state is tracked for the operators.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};
use types::deal::Deal;
use types::ids::{ClientId, OrderId};
use types::instrument::Instrument;
use types::order::{Order, OrderReplace, OrderWay};
use types::phase::TradingPhase;

use crate::book::OrderBook;
use crate::config::Config;
use crate::events::{DealSink, EngineEventHandler};

/// Host for every per-instrument order book
pub struct MatchingEngine<S: DealSink> {
    /// Order books keyed by instrument name
    books: HashMap<String, OrderBook>,
    /// Event forwarding and monitoring state, borrowed alongside a book
    supervisor: Supervisor<S>,
    max_price_deviation: u64,
}

/// Forwards book events to the sink and tracks monitored books
struct Supervisor<S: DealSink> {
    sink: S,
    monitored: HashSet<String>,
}

impl<S: DealSink> EngineEventHandler for Supervisor<S> {
    fn on_deal(&mut self, deal: Deal) {
        self.sink.on_deal(deal);
    }

    fn on_unsolicited_cancel(&mut self, order: Order) {
        self.sink.on_unsolicited_cancel(order);
    }

    fn register_monitored(&mut self, instrument: &str) {
        self.monitored.insert(instrument.to_string());
    }

    fn unregister_monitored(&mut self, instrument: &str) {
        self.monitored.remove(instrument);
    }
}

impl<S: DealSink> MatchingEngine<S> {
    pub fn new(config: &Config, sink: S) -> Self {
        Self {
            books: HashMap::new(),
            supervisor: Supervisor {
                sink,
                monitored: HashSet::new(),
            },
            max_price_deviation: config.engine.max_price_deviation,
        }
    }

    /// Create the order book for an instrument
    ///
    /// Returns false when the instrument is already listed.
    pub fn add_order_book(&mut self, instrument: Instrument) -> bool {
        let name = instrument.name().to_string();
        if self.books.contains_key(&name) {
            warn!(instrument = %name, "instrument already listed");
            return false;
        }
        info!(%instrument, "order book created");
        self.books
            .insert(name, OrderBook::new(instrument, self.max_price_deviation));
        true
    }

    /// Insert an order into the named book
    pub fn insert(&mut self, instrument: &str, order: Order) -> bool {
        // Split borrows: book and supervisor are disjoint fields.
        match self.books.get_mut(instrument) {
            Some(book) => book.insert(&mut self.supervisor, order),
            None => {
                warn!(%instrument, "insert for unknown instrument");
                false
            }
        }
    }

    /// Replace an order in the named book
    pub fn modify(&mut self, instrument: &str, replace: OrderReplace) -> bool {
        match self.books.get_mut(instrument) {
            Some(book) => book.modify(&mut self.supervisor, replace),
            None => {
                warn!(%instrument, "modify for unknown instrument");
                false
            }
        }
    }

    /// Cancel an order in the named book
    pub fn cancel(
        &mut self,
        instrument: &str,
        order_id: OrderId,
        client_id: ClientId,
        way: OrderWay,
    ) -> bool {
        match self.books.get_mut(instrument) {
            Some(book) => book.cancel(order_id, client_id, way),
            None => {
                warn!(%instrument, "cancel for unknown instrument");
                false
            }
        }
    }

    /// Drain the named book, reporting every order as unsolicited-cancelled
    pub fn cancel_all_orders(&mut self, instrument: &str) -> bool {
        match self.books.get_mut(instrument) {
            Some(book) => {
                book.cancel_all_orders(&mut self.supervisor);
                true
            }
            None => {
                warn!(%instrument, "cancel-all for unknown instrument");
                false
            }
        }
    }

    /// Switch the trading phase of the named book
    ///
    /// The phase arrives as a raw protocol code; anything outside the
    /// enumeration is rejected.
    pub fn set_trading_phase(&mut self, instrument: &str, phase_code: i32) -> bool {
        let phase = match TradingPhase::try_from(phase_code) {
            Ok(phase) => phase,
            Err(err) => {
                warn!(%instrument, %err, "trading phase rejected");
                return false;
            }
        };
        match self.books.get_mut(instrument) {
            Some(book) => book.set_trading_phase(&mut self.supervisor, phase),
            None => {
                warn!(%instrument, "phase change for unknown instrument");
                false
            }
        }
    }

    /// Number of books currently in the intraday auction
    pub fn monitored_order_book_count(&self) -> usize {
        self.supervisor.monitored.len()
    }

    pub fn order_book(&self, instrument: &str) -> Option<&OrderBook> {
        self.books.get(instrument)
    }

    pub fn sink(&self) -> &S {
        &self.supervisor.sink
    }
}
