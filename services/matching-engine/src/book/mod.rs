//! Order book infrastructure module
//!
//! Contains price levels, the two side books, the dual-indexed order
//! container and the per-instrument book façade.

pub mod ask_book;
pub mod bid_book;
pub mod container;
pub mod order_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use container::{Limit, OrderContainer, ViewMode};
pub use order_book::OrderBook;
pub use price_level::PriceLevel;
