//! Demo driver: replays a small order flow through the engine task
//! and prints the resulting book.
//!
//! This binary is deliberately thin; it only calls the engine's
//! public operations and renders their results.

use anyhow::Result;
use lob_core::{DepthSnapshot, NewOrder, Side};
use lob_service::Config;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let (engine, join) = lob_service::spawn(config.queue_depth);

    let orders = vec![
        NewOrder::limit(1, Side::Buy, Decimal::new(1005, 1), 10), // 100.5
        NewOrder::limit(2, Side::Sell, Decimal::new(1010, 1), 5), // 101.0
        NewOrder::limit(3, Side::Buy, Decimal::new(1000, 1), 15), // 100.0
        NewOrder::limit(4, Side::Sell, Decimal::new(990, 1), 20), // 99.0
        NewOrder::market(5, Side::Buy, 12),
    ];

    for order in orders {
        let id = order.id;
        let result = engine.submit(order).await?;
        for trade in &result.trades {
            println!(
                ">> Trade executed: BUY {} | SELL {} | price {} | qty {}",
                trade.buy_order_id, trade.sell_order_id, trade.price, trade.quantity
            );
        }
        println!("Order {id}: {:?}", result.disposition);
    }

    print_book(&engine.snapshot().await?);

    drop(engine);
    join.await?;
    Ok(())
}

/// Render the aggregated book: asks ascending, then bids descending.
fn print_book(snapshot: &DepthSnapshot) {
    println!("\n===== ORDER BOOK =====");

    println!("\n      --- Asks (Sell) ---");
    println!("{:<10}{:<10}", "Price", "Quantity");
    println!("--------------------------");
    for level in &snapshot.asks {
        println!("{:<10}{:<10}", level.price, level.quantity);
    }
    if snapshot.asks.is_empty() {
        println!("(Empty)");
    }

    println!("\n      --- Bids (Buy) ---");
    println!("{:<10}{:<10}", "Price", "Quantity");
    println!("--------------------------");
    for level in &snapshot.bids {
        println!("{:<10}{:<10}", level.price, level.quantity);
    }
    if snapshot.bids.is_empty() {
        println!("(Empty)");
    }

    println!("=========================");
}
