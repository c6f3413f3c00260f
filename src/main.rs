//! tickbook - demo binary
//!
//! Drives the engine through a short session and prints the trades and the
//! resulting depth. The library itself never prints; callers wanting
//! structured output can install a `tracing` subscriber instead.

use rust_decimal::Decimal;

use tickbook::types::ticks;
use tickbook::{Order, Orderbook, OrderType, Side};

fn main() {
    let tick_size = Decimal::new(25, 2); // 0.25 per tick

    println!("tickbook demo (tick size {})", tick_size);
    println!();

    let mut book = Orderbook::with_capacity(64);

    let orders = [
        Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 400, 10),
        Order::new(OrderType::GoodTillCancel, 2, Side::Buy, 399, 5),
        Order::new(OrderType::GoodTillCancel, 3, Side::Sell, 402, 8),
        Order::new(OrderType::GoodTillCancel, 4, Side::Sell, 400, 4),
        Order::new(OrderType::FillAndKill, 5, Side::Buy, 402, 20),
    ];

    for order in orders {
        let id = order.id();
        match book.add_order(order) {
            Ok(trades) if trades.is_empty() => println!("order {id}: rested, no trades"),
            Ok(trades) => {
                for trade in &trades {
                    println!(
                        "order {id}: traded {} @ bid {} / ask {}",
                        trade.quantity(),
                        ticks::from_ticks(trade.bid().price, tick_size),
                        ticks::from_ticks(trade.ask().price, tick_size),
                    );
                }
            }
            Err(e) => println!("order {id}: rejected: {e}"),
        }
    }

    println!();
    println!("book depth ({} resting orders):", book.len());
    let infos = book.level_infos();
    for level in infos.asks().iter().rev() {
        println!(
            "  ask {:>10} x {}",
            ticks::from_ticks(level.price, tick_size),
            level.quantity
        );
    }
    for level in infos.bids() {
        println!(
            "  bid {:>10} x {}",
            ticks::from_ticks(level.price, tick_size),
            level.quantity
        );
    }
}
