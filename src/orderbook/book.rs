//! The order book: indices, lifecycle operations and queries.
//!
//! ## Architecture
//!
//! The book is a hybrid of three structures:
//!
//! - **Slab**: arena owning every resting [`OrderNode`]; O(1) insert,
//!   remove and lookup by key
//! - **BTreeMap**: one per side, mapping price to [`PriceLevel`]; bids are
//!   keyed by `Reverse(price)` so the first entry of either map is the best
//!   price
//! - **HashMap**: order id to slab key, giving O(1) cancellation
//!
//! The index and the level queues are kept mutually consistent: an id is in
//! the index exactly when its order rests in one level on one side, and an
//! empty level never keeps its price key.
//!
//! ## Concurrency
//!
//! One book instance assumes a single logical writer. There is no internal
//! locking; callers running from multiple threads must serialize access at
//! their own boundary. Returned trades and snapshots are owned values and
//! safe to hand elsewhere.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use slab::Slab;
use tracing::trace;

use crate::error::OrderbookError;
use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{
    LevelInfo, Order, OrderId, OrderModify, OrderbookLevelInfos, OrderType, Price, Side, Trades,
};

/// A price-time priority limit order book for a single instrument.
///
/// ## Example
///
/// ```
/// use tickbook::{Order, Orderbook, OrderType, Side};
///
/// let mut book = Orderbook::new();
///
/// let trades = book
///     .add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10))
///     .unwrap();
/// assert!(trades.is_empty());
///
/// let trades = book
///     .add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Sell, 100, 4))
///     .unwrap();
/// assert_eq!(trades.len(), 1);
/// assert_eq!(trades[0].quantity(), 4);
///
/// // The bid rests with 6 remaining; the sell was consumed entirely.
/// assert_eq!(book.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Orderbook {
    /// Arena owning every resting order
    pub(super) orders: Slab<OrderNode>,

    /// Bid levels, best (highest) price first
    pub(super) bids: BTreeMap<Reverse<Price>, PriceLevel>,

    /// Ask levels, best (lowest) price first
    pub(super) asks: BTreeMap<Price, PriceLevel>,

    /// Order id -> slab key, for O(1) cancel
    pub(super) index: HashMap<OrderId, usize>,

    /// Number of resting bid orders
    pub(super) bid_count: usize,

    /// Number of resting ask orders
    pub(super) ask_count: usize,
}

impl Orderbook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with `order_capacity` slots pre-allocated.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::with_capacity(order_capacity),
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of resting orders.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when no orders rest on either side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Pre-allocated order capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// True while `id` is resting in the book.
    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of resting bid orders.
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    /// Number of resting ask orders.
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    /// Number of occupied bid price levels.
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of occupied ask price levels.
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Best (highest) bid price, if any bid rests.
    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Best (lowest) ask price, if any ask rests.
    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// `best_ask - best_bid` when both sides are occupied.
    ///
    /// Never negative after an operation completes: the matching loop always
    /// runs to a non-crossing fixed point. Returns `None` when either side is
    /// empty, or when the difference does not fit in [`Price`] because the
    /// best prices sit near opposite ends of the tick range.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask.checked_sub(bid),
            _ => None,
        }
    }

    /// Aggregated depth snapshot: one entry per occupied price on each side,
    /// bids best-first (descending), asks best-first (ascending).
    ///
    /// Pure read; level totals are cached so this never walks order queues.
    pub fn level_infos(&self) -> OrderbookLevelInfos {
        let bids = self
            .bids
            .values()
            .map(|level| LevelInfo {
                price: level.price,
                quantity: level.total_quantity,
            })
            .collect();
        let asks = self
            .asks
            .values()
            .map(|level| LevelInfo {
                price: level.price,
                quantity: level.total_quantity,
            })
            .collect();
        OrderbookLevelInfos::new(bids, asks)
    }

    // ========================================================================
    // Lifecycle operations
    // ========================================================================

    /// Submit an order and return every trade it caused, in generation order.
    ///
    /// Rejections leave the book untouched:
    /// - zero quantity -> [`OrderbookError::InvalidQuantity`]
    /// - id already resting -> [`OrderbookError::DuplicateOrder`]
    ///
    /// A `GoodTillCancel` order rests with whatever quantity the matching
    /// loop leaves. A `FillAndKill` order matches against currently crossing
    /// liquidity only; its unmatched remainder is discarded and the id is
    /// never resting on return.
    pub fn add_order(&mut self, order: Order) -> Result<Trades, OrderbookError> {
        if order.initial_quantity() == 0 {
            return Err(OrderbookError::InvalidQuantity);
        }
        let id = order.id();
        if self.index.contains_key(&id) {
            return Err(OrderbookError::DuplicateOrder(id));
        }

        let order_type = order.order_type();
        let side = order.side();
        let price = order.price();

        // A kill order with nothing to cross would be discarded whole, so
        // skip the insert entirely.
        if order_type == OrderType::FillAndKill && !self.can_match(side, price) {
            trace!("Discarding fill-and-kill order {} with no crossing liquidity", id);
            return Ok(Trades::new());
        }

        trace!(
            "Adding order {} {:?} {:?} {} x {}",
            id,
            order_type,
            side,
            price,
            order.initial_quantity()
        );
        self.insert_resting(order);
        let trades = self.match_orders()?;

        if order_type == OrderType::FillAndKill && self.index.contains_key(&id) {
            let residual = self
                .remove_resting(id)
                .expect("indexed fill-and-kill residual failed to cancel");
            trace!(
                "Discarded fill-and-kill residual {} x {}",
                id,
                residual.remaining_quantity()
            );
        }

        Ok(trades)
    }

    /// Cancel the resting order `id` and return it.
    ///
    /// Fails with [`OrderbookError::NotFound`] if `id` is not resting; the
    /// book is unchanged either way for every other order.
    pub fn cancel_order(&mut self, id: OrderId) -> Result<Order, OrderbookError> {
        let order = self
            .remove_resting(id)
            .ok_or(OrderbookError::NotFound(id))?;
        trace!(
            "Cancelled order {} with {} remaining",
            id,
            order.remaining_quantity()
        );
        Ok(order)
    }

    /// Replace the resting order `modify.order_id()` with the described
    /// side, price and quantity, keeping the original's order type.
    ///
    /// The replacement loses its time priority and joins the back of its new
    /// level, then matches like any fresh order; the trades it causes are
    /// returned. Fails with [`OrderbookError::NotFound`] if the original is
    /// not resting and [`OrderbookError::InvalidQuantity`] for a zero
    /// quantity; both are checked before anything is removed, so a failed
    /// modify changes nothing.
    pub fn modify_order(&mut self, modify: OrderModify) -> Result<Trades, OrderbookError> {
        if modify.quantity() == 0 {
            return Err(OrderbookError::InvalidQuantity);
        }
        let id = modify.order_id();
        let key = *self.index.get(&id).ok_or(OrderbookError::NotFound(id))?;

        // OrderModify carries no type; the replacement reuses the original's.
        let order_type = self
            .orders
            .get(key)
            .expect("order index points at a vacant slot")
            .order
            .order_type();

        self.remove_resting(id)
            .expect("indexed order failed to cancel");
        trace!(
            "Modifying order {} to {:?} {} x {}",
            id,
            modify.side(),
            modify.price(),
            modify.quantity()
        );
        self.add_order(modify.to_order(order_type))
    }

    // ========================================================================
    // Internal index maintenance
    // ========================================================================

    /// True when an order of `side` at `price` would cross the opposite best.
    pub(super) fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.best_ask().is_some_and(|ask| price >= ask),
            Side::Sell => self.best_bid().is_some_and(|bid| price <= bid),
        }
    }

    /// Insert `order` at the back of its `(side, price)` level and index it.
    pub(super) fn insert_resting(&mut self, order: Order) -> usize {
        let id = order.id();
        let side = order.side();
        let price = order.price();

        let key = self.orders.insert(OrderNode::new(order));
        self.index.insert(id, key);

        match side {
            Side::Buy => {
                let level = self
                    .bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price));
                level.push_back(key, &mut self.orders);
                self.bid_count += 1;
            }
            Side::Sell => {
                let level = self
                    .asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price));
                level.push_back(key, &mut self.orders);
                self.ask_count += 1;
            }
        }

        key
    }

    /// Remove `id` from its level, the index and the arena; drops the level's
    /// price key if the queue empties. Returns the removed order.
    pub(super) fn remove_resting(&mut self, id: OrderId) -> Option<Order> {
        let key = self.index.remove(&id)?;
        let (side, price) = {
            let node = self
                .orders
                .get(key)
                .expect("order index points at a vacant slot");
            (node.side(), node.price())
        };

        match side {
            Side::Buy => {
                let level = self
                    .bids
                    .get_mut(&Reverse(price))
                    .expect("resting bid has no price level");
                level.remove(key, &mut self.orders);
                if level.is_empty() {
                    self.bids.remove(&Reverse(price));
                }
                self.bid_count -= 1;
            }
            Side::Sell => {
                let level = self
                    .asks
                    .get_mut(&price)
                    .expect("resting ask has no price level");
                level.remove(key, &mut self.orders);
                if level.is_empty() {
                    self.asks.remove(&price);
                }
                self.ask_count -= 1;
            }
        }

        Some(self.orders.remove(key).order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
