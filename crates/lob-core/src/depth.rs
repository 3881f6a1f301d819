//! Aggregated book depth for display and analytics.

use rust_decimal::Decimal;

/// `(price, total resting quantity)` for one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLevel {
    pub price: Decimal,
    pub quantity: u64,
}

/// Point-in-time aggregated view of both sides of the book.
///
/// Asks are ascending (best first), bids descending (best first).
/// Snapshots are read-only: they are produced for callers and never
/// fed back into the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthSnapshot {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

impl DepthSnapshot {
    pub fn best_bid(&self) -> Option<DepthLevel> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<DepthLevel> {
        self.asks.first().copied()
    }

    /// `true` when neither side has any resting liquidity.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
