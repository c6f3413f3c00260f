//! # tickbook
//!
//! A price-time priority limit order book matching engine for a single
//! instrument.
//!
//! ## Architecture
//!
//! - **Types**: [`Order`], [`OrderModify`], [`Trade`], depth snapshots
//! - **Orderbook**: slab-backed book with per-side price indices, an order
//!   id index and the matching loop
//!
//! ## Design Principles
//!
//! 1. **Integer arithmetic**: prices are signed tick counts, quantities are
//!    unsigned lots; no floating point anywhere in the engine
//! 2. **Synchronous calls**: every operation runs to completion and returns
//!    its trades; there is no internal queue, timer or I/O
//! 3. **Single writer**: one book instance assumes externally serialized
//!    callers and takes no locks of its own
//! 4. **Pre-allocated storage**: a slab arena owns all resting orders, so
//!    cancellation is O(1) and no handle dangles
//!
//! ## Example
//!
//! ```
//! use tickbook::{Order, Orderbook, OrderType, Side};
//!
//! let mut book = Orderbook::new();
//! book.add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Sell, 101, 5))
//!     .unwrap();
//!
//! let trades = book
//!     .add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Buy, 101, 3))
//!     .unwrap();
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity(), 3);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy
pub mod error;

/// Order book: indices, lifecycle operations, matching
pub mod orderbook;

/// Core data types: orders, trades, snapshots, tick conversion
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::OrderbookError;
pub use orderbook::{OrderNode, Orderbook, PriceLevel};
pub use types::{
    LevelInfo, Order, OrderId, OrderModify, OrderType, OrderbookLevelInfos, Price, Quantity, Side,
    Trade, TradeInfo, Trades,
};
