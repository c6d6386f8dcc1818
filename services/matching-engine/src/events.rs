//! Event surfaces between book, host engine and the outside world
//!
//! A book never owns its consumers: it drives them through these traits
//! during mutating calls, and the host outlives every book. Deliveries
//! happen in production order, and a handler must not re-enter the book
//! it is being called for.

use types::deal::Deal;
use types::order::Order;

/// Host-engine capability consumed by an order book
///
/// Deals and unsolicited cancels flow out through the host; the monitoring
/// methods track which books sit in the intraday-auction circuit-breaker
/// state, identified by instrument name.
pub trait EngineEventHandler {
    fn on_deal(&mut self, deal: Deal);
    fn on_unsolicited_cancel(&mut self, order: Order);
    fn register_monitored(&mut self, instrument: &str);
    fn unregister_monitored(&mut self, instrument: &str);
}

/// External consumer of executed deals and unsolicited cancels
pub trait DealSink {
    fn on_deal(&mut self, deal: Deal);
    fn on_unsolicited_cancel(&mut self, order: Order);
}
