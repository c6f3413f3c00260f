//! Trade types recording executed matches.
//!
//! ## Two-Sided Records
//!
//! Every fill event pairs one bid-side and one ask-side participation. Each
//! side is recorded at its own resting price, so when an aggressive bid
//! crosses a cheaper ask the two [`TradeInfo`] prices differ; the matched
//! quantity is always identical on both sides.
//!
//! Trades are created only inside the matching loop, never mutated after
//! creation, and handed to the caller as the complete record of a call. The
//! engine keeps no separate trade history.

use serde::{Deserialize, Serialize};

use crate::types::{OrderId, Price, Quantity};

/// One side's participation in a fill event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    /// The participating order.
    pub order_id: OrderId,
    /// That order's own resting price, in ticks.
    pub price: Price,
    /// Quantity matched in this fill event.
    pub quantity: Quantity,
}

/// An immutable record of one match: the bid-side and ask-side participations.
///
/// ## Example
///
/// ```
/// use tickbook::{Trade, TradeInfo};
///
/// let trade = Trade::new(
///     TradeInfo { order_id: 1, price: 100, quantity: 4 },
///     TradeInfo { order_id: 2, price: 100, quantity: 4 },
/// );
/// assert_eq!(trade.bid().order_id, 1);
/// assert_eq!(trade.ask().order_id, 2);
/// assert_eq!(trade.quantity(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    bid: TradeInfo,
    ask: TradeInfo,
}

/// The ordered record of every fill caused by a single book operation.
pub type Trades = Vec<Trade>;

impl Trade {
    /// Pair the two sides of a fill event.
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        Self { bid, ask }
    }

    /// The buy side's participation.
    #[inline]
    pub fn bid(&self) -> &TradeInfo {
        &self.bid
    }

    /// The sell side's participation.
    #[inline]
    pub fn ask(&self) -> &TradeInfo {
        &self.ask
    }

    /// Matched quantity, identical on both sides.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_new() {
        let trade = Trade::new(
            TradeInfo {
                order_id: 1,
                price: 102,
                quantity: 5,
            },
            TradeInfo {
                order_id: 2,
                price: 100,
                quantity: 5,
            },
        );

        assert_eq!(trade.bid().order_id, 1);
        assert_eq!(trade.bid().price, 102);
        assert_eq!(trade.ask().order_id, 2);
        assert_eq!(trade.ask().price, 100);
        assert_eq!(trade.quantity(), 5);
    }

    #[test]
    fn test_trade_json_roundtrip() {
        let trade = Trade::new(
            TradeInfo {
                order_id: 1,
                price: 100,
                quantity: 4,
            },
            TradeInfo {
                order_id: 2,
                price: 100,
                quantity: 4,
            },
        );

        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, back);
    }
}
