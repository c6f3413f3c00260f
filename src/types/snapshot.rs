//! Aggregated depth snapshot of the book.
//!
//! A snapshot is computed on demand from the live price levels and owns its
//! data, so callers may hand it across threads or serialize it without
//! holding any reference into the book.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Quantity};

/// Quantity available at one price: the sum of remaining quantity over all
/// live orders at that price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Level price in ticks.
    pub price: Price,
    /// Aggregate remaining quantity at this price.
    pub quantity: Quantity,
}

/// Read-only depth snapshot: one [`LevelInfo`] per occupied price on each
/// side, bids best-first (price descending), asks best-first (ascending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderbookLevelInfos {
    bids: Vec<LevelInfo>,
    asks: Vec<LevelInfo>,
}

impl OrderbookLevelInfos {
    /// Assemble a snapshot from per-side level lists, already ordered
    /// best-first.
    pub fn new(bids: Vec<LevelInfo>, asks: Vec<LevelInfo>) -> Self {
        Self { bids, asks }
    }

    /// Bid levels, best (highest price) first.
    #[inline]
    pub fn bids(&self) -> &[LevelInfo] {
        &self.bids
    }

    /// Ask levels, best (lowest price) first.
    #[inline]
    pub fn asks(&self) -> &[LevelInfo] {
        &self.asks
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
