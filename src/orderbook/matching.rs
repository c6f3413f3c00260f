//! The matching loop.
//!
//! ## Algorithm
//!
//! Invoked after every insertion, the loop repeats until no crossing is
//! possible:
//!
//! 1. Stop if either side is empty or best bid < best ask.
//! 2. Take the head order of the best bid level and the head order of the
//!    best ask level; fill both by the minimum of their remainders and emit
//!    one [`Trade`].
//! 3. Pop any order that reached zero remaining and erase it from the index
//!    and the arena; drop a level's price key when its queue empties.
//!
//! Within a level the tie-break is strictly FIFO; across levels price
//! priority dominates, since the loop only ever touches the best level of
//! each side. Each [`TradeInfo`] records its order's own resting price, so
//! the two sides of a trade can carry different prices when an aggressive
//! order crosses the spread.
//!
//! Nothing here prevents an owner's resting order from matching that owner's
//! incoming order; the engine has no participant identity.

use std::cmp::Reverse;

use tracing::debug;

use crate::error::OrderbookError;
use crate::orderbook::{Orderbook, PriceLevel};
use crate::types::{Price, Side, Trade, TradeInfo, Trades};

impl Orderbook {
    /// Run the matching loop to its non-crossing fixed point and return the
    /// trades generated, in generation order.
    pub(super) fn match_orders(&mut self) -> Result<Trades, OrderbookError> {
        let mut trades = Trades::new();

        loop {
            let (Some(bid_price), Some(ask_price)) = (self.best_bid(), self.best_ask()) else {
                break;
            };
            if bid_price < ask_price {
                break;
            }

            // Indexed levels are never empty, so both heads exist.
            let bid_key = self
                .bids
                .get(&Reverse(bid_price))
                .and_then(PriceLevel::peek_head)
                .expect("indexed bid level has no head");
            let ask_key = self
                .asks
                .get(&ask_price)
                .and_then(PriceLevel::peek_head)
                .expect("indexed ask level has no head");

            let bid_id = self.orders[bid_key].order_id();
            let ask_id = self.orders[ask_key].order_id();
            let quantity = self.orders[bid_key]
                .remaining()
                .min(self.orders[ask_key].remaining());

            self.orders[bid_key].fill(quantity)?;
            self.orders[ask_key].fill(quantity)?;

            self.bids
                .get_mut(&Reverse(bid_price))
                .expect("best bid level vanished mid-match")
                .reduce_quantity(quantity);
            self.asks
                .get_mut(&ask_price)
                .expect("best ask level vanished mid-match")
                .reduce_quantity(quantity);

            debug!(
                "Matched {} lots (bid {} at {}, ask {} at {})",
                quantity, bid_id, bid_price, ask_id, ask_price
            );
            trades.push(Trade::new(
                TradeInfo {
                    order_id: bid_id,
                    price: bid_price,
                    quantity,
                },
                TradeInfo {
                    order_id: ask_id,
                    price: ask_price,
                    quantity,
                },
            ));

            if self.orders[bid_key].is_filled() {
                self.retire_filled(bid_key, Side::Buy, bid_price);
            }
            if self.orders[ask_key].is_filled() {
                self.retire_filled(ask_key, Side::Sell, ask_price);
            }
        }

        Ok(trades)
    }

    /// Pop a fully filled head order out of its level, the index and the
    /// arena; drops the level's price key when the queue empties.
    fn retire_filled(&mut self, key: usize, side: Side, price: Price) {
        match side {
            Side::Buy => {
                let level = self
                    .bids
                    .get_mut(&Reverse(price))
                    .expect("filled bid has no price level");
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
                    .expect("filled ask has no price level");
                level.remove(key, &mut self.orders);
                if level.is_empty() {
                    self.asks.remove(&price);
                }
                self.ask_count -= 1;
            }
        }

        let node = self.orders.remove(key);
        self.index.remove(&node.order_id());
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::error::OrderbookError;
    use crate::types::{Order, OrderId, OrderType, Price, Quantity, Side};
    use crate::Orderbook;

    fn gtc(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Order {
        Order::new(OrderType::GoodTillCancel, id, side, price, quantity)
    }

    fn fak(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Order {
        Order::new(OrderType::FillAndKill, id, side, price, quantity)
    }

    /// best bid < best ask whenever both sides rest
    fn assert_uncrossed(book: &Orderbook) {
        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            assert!(bid < ask, "book is crossed: bid {} >= ask {}", bid, ask);
        }
    }

    #[test]
    fn test_no_match_when_spread_open() {
        let mut book = Orderbook::new();
        let trades = book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();
        assert!(trades.is_empty());
        let trades = book.add_order(gtc(2, Side::Sell, 101, 10)).unwrap();
        assert!(trades.is_empty());

        assert_eq!(book.len(), 2);
        assert_uncrossed(&book);
    }

    #[test]
    fn test_simple_cross_partial_fill() {
        // Spec scenario: bid 100x10 rests, sell 100x4 arrives
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();

        let trades = book.add_order(gtc(2, Side::Sell, 100, 4)).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid().order_id, 1);
        assert_eq!(trades[0].bid().price, 100);
        assert_eq!(trades[0].ask().order_id, 2);
        assert_eq!(trades[0].ask().price, 100);
        assert_eq!(trades[0].quantity(), 4);

        // Bid level keeps the 6 remaining; the ask side is empty
        let infos = book.level_infos();
        assert_eq!(infos.bids().len(), 1);
        assert_eq!(infos.bids()[0].price, 100);
        assert_eq!(infos.bids()[0].quantity, 6);
        assert!(infos.asks().is_empty());
        assert!(book.contains(1));
        assert!(!book.contains(2));
    }

    #[test]
    fn test_fifo_within_level() {
        // Spec scenario: sells 50x5 (id 4) then 50x5 (id 5); buy 50x7 takes
        // all of id 4 before touching id 5
        let mut book = Orderbook::new();
        book.add_order(gtc(4, Side::Sell, 50, 5)).unwrap();
        book.add_order(gtc(5, Side::Sell, 50, 5)).unwrap();

        let trades = book.add_order(gtc(6, Side::Buy, 50, 7)).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ask().order_id, 4);
        assert_eq!(trades[0].quantity(), 5);
        assert_eq!(trades[1].ask().order_id, 5);
        assert_eq!(trades[1].quantity(), 2);

        assert!(!book.contains(4));
        assert!(book.contains(5));
        assert!(!book.contains(6));
        let infos = book.level_infos();
        assert_eq!(infos.asks()[0].quantity, 3);
        assert!(infos.bids().is_empty());
    }

    #[test]
    fn test_price_priority_across_levels() {
        // A buy crossing two ask levels consumes the cheaper level first
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Sell, 102, 5)).unwrap();
        book.add_order(gtc(2, Side::Sell, 101, 5)).unwrap();

        let trades = book.add_order(gtc(3, Side::Buy, 102, 8)).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ask().order_id, 2);
        assert_eq!(trades[0].ask().price, 101);
        assert_eq!(trades[0].quantity(), 5);
        assert_eq!(trades[1].ask().order_id, 1);
        assert_eq!(trades[1].ask().price, 102);
        assert_eq!(trades[1].quantity(), 3);

        assert_eq!(book.level_infos().asks()[0].quantity, 2);
        assert_uncrossed(&book);
    }

    #[test]
    fn test_trade_records_each_orders_own_price() {
        // Aggressive bid at 105 against a resting ask at 100: each side's
        // TradeInfo carries that order's own price
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Sell, 100, 5)).unwrap();

        let trades = book.add_order(gtc(2, Side::Buy, 105, 5)).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid().price, 105);
        assert_eq!(trades[0].ask().price, 100);
    }

    #[test]
    fn test_incoming_order_queues_behind_same_price() {
        // An incoming buy at an occupied bid price has no priority over the
        // orders already queued there
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Buy, 100, 5)).unwrap();
        book.add_order(gtc(2, Side::Buy, 100, 5)).unwrap();

        let trades = book.add_order(gtc(3, Side::Sell, 100, 8)).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].bid().order_id, 1);
        assert_eq!(trades[1].bid().order_id, 2);
        assert_eq!(trades[1].quantity(), 3);
    }

    #[test]
    fn test_sweep_exhausts_side() {
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Sell, 101, 5)).unwrap();
        book.add_order(gtc(2, Side::Sell, 102, 5)).unwrap();

        let trades = book.add_order(gtc(3, Side::Buy, 103, 20)).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(book.ask_count(), 0);
        assert_eq!(book.best_bid(), Some(103));
        assert_eq!(book.level_infos().bids()[0].quantity, 10);
    }

    #[test]
    fn test_fill_and_kill_never_rests_on_empty_book() {
        // Spec scenario: FAK buy with no asks resting
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Buy, 99, 10)).unwrap();
        let size_before = book.len();

        let trades = book.add_order(fak(3, Side::Buy, 100, 20)).unwrap();

        assert!(trades.is_empty());
        assert_eq!(book.len(), size_before);
        assert!(!book.contains(3));
    }

    #[test]
    fn test_fill_and_kill_partial_match_discards_residual() {
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Sell, 100, 4)).unwrap();

        let trades = book.add_order(fak(2, Side::Buy, 100, 10)).unwrap();

        // The 4 available trade; the 6 residual never rests
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity(), 4);
        assert!(!book.contains(2));
        assert!(book.is_empty());
    }

    #[test]
    fn test_fill_and_kill_full_match() {
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Sell, 100, 10)).unwrap();

        let trades = book.add_order(fak(2, Side::Buy, 100, 10)).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity(), 10);
        assert!(book.is_empty());
    }

    #[test]
    fn test_fill_and_kill_does_not_reach_worse_levels() {
        // FAK buy at 101 matches the 101 level but must not rest to wait for
        // the 102 level
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Sell, 101, 5)).unwrap();
        book.add_order(gtc(2, Side::Sell, 102, 5)).unwrap();

        let trades = book.add_order(fak(3, Side::Buy, 101, 8)).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity(), 5);
        assert!(!book.contains(3));
        assert_eq!(book.best_ask(), Some(102));
    }

    #[test]
    fn test_fill_and_kill_rejects_duplicate_and_zero() {
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();

        let err = book.add_order(fak(1, Side::Sell, 100, 5)).unwrap_err();
        assert_eq!(err, OrderbookError::DuplicateOrder(1));

        let err = book.add_order(fak(2, Side::Sell, 100, 0)).unwrap_err();
        assert_eq!(err, OrderbookError::InvalidQuantity);
    }

    #[test]
    fn test_never_crossed_after_any_operation() {
        let mut book = Orderbook::new();
        let ops: &[(OrderId, Side, Price, Quantity)] = &[
            (1, Side::Buy, 100, 10),
            (2, Side::Sell, 99, 5),
            (3, Side::Sell, 98, 20),
            (4, Side::Buy, 101, 8),
            (5, Side::Sell, 101, 3),
            (6, Side::Buy, 97, 4),
        ];

        for &(id, side, price, quantity) in ops {
            book.add_order(gtc(id, side, price, quantity)).unwrap();
            assert_uncrossed(&book);
        }
    }

    #[test]
    fn test_quantity_conservation() {
        // Every submitted lot is either resting, filled (once per side) or
        // was discarded with a fill-and-kill residual
        let mut book = Orderbook::new();
        let mut submitted: Quantity = 0;
        let mut traded_both_sides: Quantity = 0;
        let mut discarded: Quantity = 0;

        let orders = [
            gtc(1, Side::Buy, 100, 10),
            gtc(2, Side::Sell, 100, 4),
            gtc(3, Side::Sell, 101, 7),
            fak(4, Side::Buy, 101, 20),
            gtc(5, Side::Buy, 99, 3),
            gtc(6, Side::Sell, 99, 5),
        ];

        for order in orders {
            let id = order.id();
            let order_type = order.order_type();
            let initial = order.initial_quantity();
            submitted += initial;

            let trades = book.add_order(order).unwrap();
            traded_both_sides += 2 * trades.iter().map(|t| t.quantity()).sum::<Quantity>();

            if order_type == OrderType::FillAndKill {
                let own_fills: Quantity = trades
                    .iter()
                    .map(|t| {
                        if t.bid().order_id == id {
                            t.quantity()
                        } else if t.ask().order_id == id {
                            t.quantity()
                        } else {
                            0
                        }
                    })
                    .sum();
                discarded += initial - own_fills;
            }
        }

        let resting: Quantity = {
            let infos = book.level_infos();
            infos.bids().iter().map(|l| l.quantity).sum::<Quantity>()
                + infos.asks().iter().map(|l| l.quantity).sum::<Quantity>()
        };

        assert_eq!(submitted, resting + traded_both_sides + discarded);
    }

    #[test]
    fn test_trades_returned_in_generation_order() {
        let mut book = Orderbook::new();
        book.add_order(gtc(1, Side::Sell, 100, 1)).unwrap();
        book.add_order(gtc(2, Side::Sell, 101, 1)).unwrap();
        book.add_order(gtc(3, Side::Sell, 102, 1)).unwrap();

        let trades = book.add_order(gtc(4, Side::Buy, 102, 3)).unwrap();

        let ask_prices: Vec<Price> = trades.iter().map(|t| t.ask().price).collect();
        assert_eq!(ask_prices, vec![100, 101, 102]);
    }
}
