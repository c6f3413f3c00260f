//! Error taxonomy for the order book engine.
//!
//! Three of the variants are ordinary caller errors: the offending call is
//! rejected before any index mutation, so the book is left exactly as it was.
//! [`OrderbookError::Overfill`] is different in kind - it means the engine's
//! own fill accounting went wrong, which cannot happen under correct
//! operation. Callers should treat it as fatal rather than retry.

use thiserror::Error;

use crate::types::{OrderId, Quantity};

/// Errors reported by [`Orderbook`](crate::Orderbook) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderbookError {
    /// `add_order` was called with an id that is already resting.
    #[error("order {0} is already resting in the book")]
    DuplicateOrder(OrderId),

    /// `cancel_order` or `modify_order` referenced an id that is not resting.
    #[error("order {0} is not resting in the book")]
    NotFound(OrderId),

    /// Zero-quantity order rejected before touching any index.
    #[error("order quantity must be greater than zero")]
    InvalidQuantity,

    /// A fill was requested for more than the order's remaining quantity.
    ///
    /// This is an engine defect, not a caller error: the matching loop always
    /// fills by the minimum of the two remainders, so this variant signals
    /// mismatched bookkeeping between the side indices and the order arena.
    #[error("order {id} cannot be filled for {requested} with only {remaining} remaining")]
    Overfill {
        /// The order whose accounting was violated.
        id: OrderId,
        /// Quantity the fill asked for.
        requested: Quantity,
        /// Quantity actually remaining on the order.
        remaining: Quantity,
    },
}
