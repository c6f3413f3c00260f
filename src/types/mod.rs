//! Core data types for the tickbook engine.
//!
//! All prices are signed integer tick counts and all quantities are unsigned
//! integer lots; the engine never touches floating point.
//!
//! ## Types
//!
//! - [`Order`]: a limit order's identity plus its mutable remaining quantity
//! - [`OrderModify`]: a requested replacement of a resting order
//! - [`Side`] / [`OrderType`]: order classification
//! - [`Trade`] / [`TradeInfo`]: the two-sided record of one fill event
//! - [`LevelInfo`] / [`OrderbookLevelInfos`]: aggregated depth snapshot

mod order;
mod snapshot;
mod trade;
pub mod ticks;

// Re-export all types at module level
pub use order::{Order, OrderId, OrderModify, OrderType, Price, Quantity, Side};
pub use snapshot::{LevelInfo, OrderbookLevelInfos};
pub use trade::{Trade, TradeInfo, Trades};
