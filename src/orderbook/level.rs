//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` is the FIFO queue of all resting orders at one price.
//! Insertion order is time priority: the head is matched first, new orders
//! join at the tail, and any order can be unlinked in O(1) through its slab
//! key.
//!
//! ```text
//! head (oldest, matched first) <-> ... <-> tail (newest)
//! ```
//!
//! The order data itself lives in the book's slab; the level only holds the
//! queue endpoints and a cached quantity total so depth snapshots do not
//! walk the queue.

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{Price, Quantity};

/// FIFO queue metadata for one `(side, price)` level.
///
/// An empty level must not stay indexed; the book removes its price key as
/// soon as the last order leaves.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price of this level, in ticks
    pub price: Price,

    /// Sum of remaining quantity over all orders in the queue
    pub total_quantity: Quantity,

    /// Slab key of the oldest order; matched first
    pub head: Option<usize>,

    /// Slab key of the newest order; insertion point
    pub tail: Option<usize>,

    /// Number of orders in the queue
    pub order_count: usize,
}

impl PriceLevel {
    /// Create an empty level at `price`.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// True when no orders remain at this price.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append the order at `key` to the tail of the queue.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not a live slot in `slab`; the book only passes
    /// keys it just inserted.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("stale slab key pushed to level");
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("level tail key is stale");
            tail_node.next = Some(key);
        } else {
            // First order at this price
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink the order at `key` from anywhere in the queue.
    ///
    /// Returns the unlinked order's remaining quantity, which is also
    /// subtracted from the level total.
    ///
    /// # Panics
    ///
    /// Panics if `key` or a neighbour link is stale; both would mean the
    /// level queue and the slab disagree.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> Quantity {
        let node = slab.get(key).expect("stale slab key removed from level");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            let prev_node = slab.get_mut(prev).expect("level prev link is stale");
            prev_node.next = next_key;
        } else {
            // Removing the head
            self.head = next_key;
        }

        if let Some(next) = next_key {
            let next_node = slab.get_mut(next).expect("level next link is stale");
            next_node.prev = prev_key;
        } else {
            // Removing the tail
            self.tail = prev_key;
        }

        let node = slab.get_mut(key).expect("stale slab key removed from level");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= quantity;

        quantity
    }

    /// Slab key of the oldest order; the next to be matched at this price.
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Subtract a partial fill from the cached level total.
    pub fn reduce_quantity(&mut self, filled_quantity: Quantity) {
        self.total_quantity -= filled_quantity;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
