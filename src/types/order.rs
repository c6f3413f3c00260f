//! Order types for the tickbook matching engine.
//!
//! ## Integer Representation
//!
//! Prices are signed integer tick counts and quantities are unsigned integer
//! lots. No floating-point value appears anywhere in the engine, so fills
//! never have rounding ambiguity.
//!
//! ## Quantity Invariant
//!
//! `remaining_quantity` starts equal to `initial_quantity` and only ever
//! decreases, through [`Order::fill`]. Driving it past zero is an engine
//! defect and is reported as [`OrderbookError::Overfill`].
//!
//! [`OrderbookError::Overfill`]: crate::OrderbookError::Overfill

use serde::{Deserialize, Serialize};

use crate::error::OrderbookError;

/// Unique order identifier, chosen by the caller.
///
/// Must be unique among currently-resting orders at the time of `add_order`.
pub type OrderId = u64;

/// Price in integer ticks. Signed, so instruments that can quote below zero
/// (calendar spreads, some futures) are representable.
pub type Price = i64;

/// Quantity in integer lots.
pub type Quantity = u64;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the instrument
    Buy,
    /// Sell order (ask) - wants to sell the instrument
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// How an order behaves once its immediate matching opportunity is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Rests on the book until fully filled or explicitly cancelled.
    GoodTillCancel,
    /// Matches against available liquidity immediately; any unmatched
    /// remainder is discarded instead of resting.
    FillAndKill,
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order: immutable identity, side, price and type, plus the mutable
/// remaining quantity.
///
/// Fields are private so that `remaining_quantity` can only shrink through
/// [`Order::fill`], which enforces the quantity invariant.
///
/// ## Example
///
/// ```
/// use tickbook::{Order, OrderType, Side};
///
/// let order = Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10);
/// assert_eq!(order.remaining_quantity(), 10);
/// assert_eq!(order.filled_quantity(), 0);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_type: OrderType,
    id: OrderId,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a new order with its full quantity remaining.
    ///
    /// Zero-quantity orders are rejected by `Orderbook::add_order`, not here;
    /// the constructor itself is total.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_type,
            id,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// The caller-supplied order identifier.
    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Buy or Sell.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Limit price in ticks.
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// GoodTillCancel or FillAndKill.
    #[inline]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Quantity the order was submitted with.
    #[inline]
    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    /// Quantity still unfilled.
    #[inline]
    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity filled so far.
    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// True once the remaining quantity reaches zero.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Reduce the remaining quantity by `quantity`.
    ///
    /// Fails with [`OrderbookError::Overfill`] if `quantity` exceeds the
    /// remaining quantity. The engine never clamps: an overfill request means
    /// the matching loop's accounting is broken.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderbookError> {
        if quantity > self.remaining_quantity {
            return Err(OrderbookError::Overfill {
                id: self.id,
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }
}

// ============================================================================
// OrderModify struct
// ============================================================================

/// A requested replacement of a resting order's side, price and quantity.
///
/// Carries no reference to the order being replaced and no order type; the
/// book looks the original up, reuses its type and requeues the replacement
/// at the back of its new level.
///
/// ## Example
///
/// ```
/// use tickbook::{OrderModify, OrderType, Side};
///
/// let modify = OrderModify::new(1, Side::Sell, 105, 20);
/// let order = modify.to_order(OrderType::GoodTillCancel);
/// assert_eq!(order.id(), 1);
/// assert_eq!(order.remaining_quantity(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModify {
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    /// Describe a replacement for the order with id `order_id`.
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    /// Id of the order to replace.
    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Side of the replacement.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Price of the replacement, in ticks.
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Quantity of the replacement.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Build the replacement order with a fresh, full remaining quantity.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(
            order_type,
            self.order_id,
            self.side,
            self.price,
            self.quantity,
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
