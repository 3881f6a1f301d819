//! Single-instrument matching engine.
//!
//! Owns both sides of the book plus the order index and exposes the
//! four public operations: [`submit`](MatchingEngine::submit),
//! [`cancel`](MatchingEngine::cancel),
//! [`modify`](MatchingEngine::modify) and
//! [`snapshot`](MatchingEngine::snapshot). Each takes `&mut self`
//! (or `&self` for the snapshot) and runs to completion, so two
//! operations can never interleave their book mutations; callers that
//! need cross-thread access serialize through one owner (see the
//! `lob-service` crate).

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::book_side::SideBook;
use crate::depth::{DepthLevel, DepthSnapshot};
use crate::error::RejectReason;
use crate::messages::{Disposition, NewOrder, SubmitResult, Trade};
use crate::order::Order;
use crate::order_index::OrderIndex;
use crate::order_type::OrderType;
use crate::side::Side;

/// Price-time priority matching engine for one instrument.
///
/// The bid and ask books are two distinct fields; the opposing book
/// for an incoming order is always selected by an explicit `match` on
/// its side. After every completed operation the book is uncrossed:
/// best bid < best ask whenever both sides are non-empty.
#[derive(Debug)]
pub struct MatchingEngine {
    bids: SideBook,
    asks: SideBook,
    index: OrderIndex,

    /// Arrival sequence stamped onto each accepted order; drives time
    /// priority and is never reused.
    next_sequence: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        MatchingEngine::new()
    }
}

impl MatchingEngine {
    /// Create a new, empty engine.
    pub fn new() -> Self {
        MatchingEngine {
            bids: SideBook::new(Side::Buy),
            asks: SideBook::new(Side::Sell),
            index: OrderIndex::new(),
            next_sequence: 1,
        }
    }

    /// Submit a new order: validate, sweep the opposing book, then
    /// rest or discard any remainder.
    ///
    /// Trades are returned in the exact order they executed. A
    /// rejected order never touches either book.
    pub fn submit(&mut self, msg: NewOrder) -> SubmitResult {
        if let Some(reason) = self.validate(&msg) {
            debug!(id = msg.id, %reason, "order rejected");
            return SubmitResult::rejected(reason);
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let mut order = Order::new(
            msg.id,
            msg.side,
            msg.order_type,
            msg.price,
            msg.quantity,
            sequence,
        );
        debug!(
            id = order.id,
            side = %order.side,
            kind = %order.order_type,
            price = %order.price,
            quantity = order.quantity,
            "order accepted"
        );

        let trades = self.sweep(&mut order);

        let disposition = if order.is_filled() {
            Disposition::FullyFilled
        } else {
            match order.order_type {
                OrderType::Limit => {
                    // Remainder rests at the back of its level's queue.
                    let partially = !trades.is_empty();
                    let remaining = order.quantity;
                    self.rest(order);
                    if partially {
                        Disposition::PartiallyResting { remaining }
                    } else {
                        Disposition::FullyResting
                    }
                }
                OrderType::Market => {
                    // Market orders never rest; leftover quantity is
                    // dropped once the opposing side is exhausted.
                    let remaining = order.quantity;
                    debug!(id = order.id, remaining, "market remainder discarded");
                    Disposition::PartiallyDiscarded { remaining }
                }
            }
        };

        SubmitResult {
            trades,
            disposition,
        }
    }

    /// Cancel a resting order by id.
    ///
    /// Returns `false` with no side effect when the id is unknown
    /// (never rested, already filled, or already cancelled).
    pub fn cancel(&mut self, id: u64) -> bool {
        let Some(location) = self.index.unregister(id) else {
            debug!(id, "cancel: order not found");
            return false;
        };

        let book = match location.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let removed = book.remove_order(location.price, id);
        debug_assert!(removed.is_some(), "index and book out of sync for {id}");
        debug!(id, side = %location.side, price = %location.price, "order cancelled");
        removed.is_some()
    }

    /// Replace a resting order with a fresh limit order carrying the
    /// same id, the new price and the new quantity.
    ///
    /// Defined as cancel-then-resubmit: the replacement gets a new
    /// arrival sequence (time priority is lost, even at the same
    /// price) and may immediately match against the opposing book.
    /// Returns `None` with no state change when the id is not
    /// resting. An invalid replacement is rejected *before* the
    /// cancel, leaving the original order untouched.
    pub fn modify(&mut self, id: u64, new_price: Decimal, new_quantity: u64) -> Option<SubmitResult> {
        let location = self.index.lookup(id)?;

        let replacement = NewOrder::limit(id, location.side, new_price, new_quantity);
        if let Some(reason) = validate_shape(&replacement) {
            debug!(id, %reason, "modify rejected; original left resting");
            return Some(SubmitResult::rejected(reason));
        }

        let cancelled = self.cancel(id);
        debug_assert!(cancelled);
        debug!(id, price = %new_price, quantity = new_quantity, "order replaced");
        Some(self.submit(replacement))
    }

    /// Aggregated depth on both sides at a single point in time.
    ///
    /// Asks ascending, bids descending, best first on each side.
    /// Display/analytics only; never fed back into the engine.
    pub fn snapshot(&self) -> DepthSnapshot {
        let collect = |book: &SideBook| -> Vec<DepthLevel> {
            book.levels()
                .map(|level| DepthLevel {
                    price: level.price(),
                    quantity: level.total_quantity(),
                })
                .collect()
        };
        DepthSnapshot {
            bids: collect(&self.bids),
            asks: collect(&self.asks),
        }
    }

    /// Best bid price, if any.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    /// Best ask price, if any.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    /// Number of currently-resting orders across both sides.
    pub fn resting_orders(&self) -> usize {
        self.index.len()
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    fn validate(&self, msg: &NewOrder) -> Option<RejectReason> {
        if let Some(reason) = validate_shape(msg) {
            return Some(reason);
        }
        // Two resting orders under one id would leave the index
        // unable to address one of them.
        if self.index.contains(msg.id) {
            return Some(RejectReason::DuplicateId(msg.id));
        }
        None
    }

    /// Sweep the opposing book while the incoming order is marketable,
    /// filling FIFO at each best level. Trades execute at the resting
    /// order's price.
    fn sweep(&mut self, order: &mut Order) -> Vec<Trade> {
        let mut trades = Vec::new();

        let opposing = match order.side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };

        loop {
            if order.is_filled() {
                break;
            }
            let Some(best) = opposing.best_price() else {
                break;
            };
            let marketable = match order.order_type {
                OrderType::Market => true,
                OrderType::Limit => match order.side {
                    Side::Buy => best <= order.price,
                    Side::Sell => best >= order.price,
                },
            };
            if !marketable {
                break;
            }

            if let Some(level) = opposing.level_mut(best) {
                while !order.is_filled() {
                    let Some(maker) = level.front_mut() else {
                        break;
                    };
                    let maker_id = maker.id;
                    let quantity = order.quantity.min(maker.quantity);

                    let (buy_order_id, sell_order_id) = match order.side {
                        Side::Buy => (order.id, maker_id),
                        Side::Sell => (maker_id, order.id),
                    };
                    debug!(
                        buy = buy_order_id,
                        sell = sell_order_id,
                        price = %best,
                        quantity,
                        "trade executed"
                    );
                    trades.push(Trade {
                        buy_order_id,
                        sell_order_id,
                        price: best,
                        quantity,
                    });

                    order.fill(quantity);
                    maker.fill(quantity);

                    if maker.is_filled() {
                        // Fully filled: destroy the resting order and
                        // its index entry in the same step.
                        level.pop_front();
                        self.index.unregister(maker_id);
                    }
                }
            }

            // Delete the level the moment the sweep empties it; a
            // mapped key never points at an empty queue.
            opposing.remove_level_if_empty(best);
        }

        trades
    }

    /// Rest an unmatched limit remainder on its own side and register
    /// it, as one step.
    fn rest(&mut self, order: Order) {
        trace!(id = order.id, side = %order.side, price = %order.price,
               quantity = order.quantity, "order resting");
        let (side, price, id) = (order.side, order.price, order.id);
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book.insert(order);
        self.index.register(id, side, price);
    }
}

/// Shape-only validation shared by submit and modify: quantity and
/// limit price, independent of current book state.
fn validate_shape(msg: &NewOrder) -> Option<RejectReason> {
    if msg.quantity == 0 {
        return Some(RejectReason::ZeroQuantity);
    }
    if msg.order_type == OrderType::Limit && msg.price < Decimal::ZERO {
        return Some(RejectReason::NegativeLimitPrice(msg.price));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_zero_quantity() {
        let mut engine = MatchingEngine::new();
        let result = engine.submit(NewOrder::limit(1, Side::Buy, dec!(100.0), 0));
        assert_eq!(
            result.disposition,
            Disposition::Rejected(RejectReason::ZeroQuantity)
        );
        assert!(result.trades.is_empty());
        assert_eq!(engine.resting_orders(), 0);
    }

    #[test]
    fn rejects_negative_limit_price() {
        let mut engine = MatchingEngine::new();
        let result = engine.submit(NewOrder::limit(1, Side::Sell, dec!(-1.0), 5));
        assert_eq!(
            result.disposition,
            Disposition::Rejected(RejectReason::NegativeLimitPrice(dec!(-1.0)))
        );
        assert_eq!(engine.resting_orders(), 0);
    }

    #[test]
    fn market_price_field_is_ignored() {
        let mut engine = MatchingEngine::new();
        // A market order carries no meaningful price; it must not be
        // rejected for one, and with an empty opposing book the whole
        // quantity is discarded.
        let result = engine.submit(NewOrder::market(1, Side::Buy, 10));
        assert_eq!(
            result.disposition,
            Disposition::PartiallyDiscarded { remaining: 10 }
        );
        assert!(result.trades.is_empty());
        assert_eq!(engine.resting_orders(), 0);
    }

    #[test]
    fn rejects_duplicate_resting_id() {
        let mut engine = MatchingEngine::new();
        engine.submit(NewOrder::limit(1, Side::Buy, dec!(100.0), 10));
        let result = engine.submit(NewOrder::limit(1, Side::Buy, dec!(99.0), 10));
        assert_eq!(
            result.disposition,
            Disposition::Rejected(RejectReason::DuplicateId(1))
        );
        // The original is untouched.
        assert_eq!(engine.best_bid(), Some(dec!(100.0)));
        assert_eq!(engine.resting_orders(), 1);
    }

    #[test]
    fn id_can_be_reused_after_it_leaves_the_book() {
        let mut engine = MatchingEngine::new();
        engine.submit(NewOrder::limit(1, Side::Buy, dec!(100.0), 10));
        assert!(engine.cancel(1));
        let result = engine.submit(NewOrder::limit(1, Side::Buy, dec!(101.0), 5));
        assert_eq!(result.disposition, Disposition::FullyResting);
    }

    #[test]
    fn sweep_never_leaves_a_crossed_book() {
        let mut engine = MatchingEngine::new();
        engine.submit(NewOrder::limit(1, Side::Buy, dec!(100.0), 10));
        engine.submit(NewOrder::limit(2, Side::Sell, dec!(101.0), 10));
        // Crossing limit takes out the ask and rests the remainder.
        engine.submit(NewOrder::limit(3, Side::Buy, dec!(102.0), 15));

        let (bid, ask) = (engine.best_bid(), engine.best_ask());
        assert_eq!(bid, Some(dec!(102.0)));
        assert_eq!(ask, None);
        if let (Some(bid), Some(ask)) = (bid, ask) {
            assert!(bid < ask);
        }
    }

    #[test]
    fn zero_price_limit_is_accepted() {
        let mut engine = MatchingEngine::new();
        let result = engine.submit(NewOrder::limit(1, Side::Buy, dec!(0.0), 3));
        assert_eq!(result.disposition, Disposition::FullyResting);
    }
}
