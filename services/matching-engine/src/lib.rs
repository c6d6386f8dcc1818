//! Matching Engine
//!
//! Per-instrument order books with price-time priority matching during
//! continuous trading and uniform-price uncrossing during auctions.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Deterministic matching (same inputs → same outputs)
//! - An accepted `(client_id, order_id)` is never accepted again in the
//!   same session, even after a fill, cancel or replace
//! - Turnover and daily volume equal the sums over every emitted deal

pub mod book;
pub mod config;
pub mod engine;
pub mod events;

pub use book::{OrderBook, OrderContainer, ViewMode};
pub use config::Config;
pub use engine::MatchingEngine;
