//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an [`Order`] with doubly-linked list pointers so the
//! order can be unlinked from its price level in O(1) given its slab key.
//! The pointers are slab keys (`usize`), not references, so removing one
//! node never invalidates any other node's handle.
//!
//! ## Linked List
//!
//! Orders at one price form a FIFO queue:
//! - `prev`: the older neighbour (toward the head, matched first)
//! - `next`: the newer neighbour (toward the tail)

use crate::error::OrderbookError;
use crate::types::{Order, OrderId, Price, Quantity, Side};

/// An [`Order`] plus its position in the level queue.
///
/// Queue metadata lives in [`PriceLevel`](crate::orderbook::PriceLevel); the
/// node only knows its two neighbours.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The actual order data
    pub order: Order,

    /// Slab key of the newer neighbour; `None` at the tail
    pub next: Option<usize>,

    /// Slab key of the older neighbour; `None` at the head
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Wrap an order, not yet linked into any level.
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// True while the node is not part of any level queue.
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    /// The wrapped order's id.
    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order.id()
    }

    /// The wrapped order's side.
    #[inline]
    pub fn side(&self) -> Side {
        self.order.side()
    }

    /// The wrapped order's price in ticks.
    #[inline]
    pub fn price(&self) -> Price {
        self.order.price()
    }

    /// The wrapped order's remaining quantity.
    #[inline]
    pub fn remaining(&self) -> Quantity {
        self.order.remaining_quantity()
    }

    /// Fill the wrapped order; fails on overfill like [`Order::fill`].
    #[inline]
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderbookError> {
        self.order.fill(quantity)
    }

    /// True once the wrapped order is fully filled.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
