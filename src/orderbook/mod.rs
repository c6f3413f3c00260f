//! Order book module: the engine's only stateful component.
//!
//! ## Components
//!
//! - [`OrderNode`]: an order plus its linked-list position in a level queue
//! - [`PriceLevel`]: FIFO queue of orders at one price
//! - [`Orderbook`]: both side indices, the order index and the matching loop
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order | O(log levels) |
//! | Cancel order by id | O(1) |
//! | Best bid/ask | O(1) amortized |
//! | Depth snapshot | O(levels) |
//! | Match | O(orders touched) |

pub mod book;
pub mod level;
mod matching;
pub mod node;

pub use book::Orderbook;
pub use level::PriceLevel;
pub use node::OrderNode;
