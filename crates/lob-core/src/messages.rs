//! Logical request and event types for the matching engine.
//!
//! These are transport-agnostic: [`NewOrder`] is what callers submit,
//! [`Trade`] and [`SubmitResult`] are what the engine produces. No
//! encoding or wire format lives here.

use rust_decimal::Decimal;

use crate::error::RejectReason;
use crate::order_type::OrderType;
use crate::side::Side;

/// A new order request.
///
/// `price` is the limit price and is ignored for market orders.
/// `id` is caller-supplied and assumed unique for the lifetime of one
/// engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub id: u64,
    pub side: Side,
    pub order_type: OrderType,
    pub price: Decimal,
    pub quantity: u64,
}

impl NewOrder {
    pub fn limit(id: u64, side: Side, price: Decimal, quantity: u64) -> Self {
        NewOrder {
            id,
            side,
            order_type: OrderType::Limit,
            price,
            quantity,
        }
    }

    /// Market order; the price field is irrelevant and set to zero.
    pub fn market(id: u64, side: Side, quantity: u64) -> Self {
        NewOrder {
            id,
            side,
            order_type: OrderType::Market,
            price: Decimal::ZERO,
            quantity,
        }
    }
}

/// One execution between an aggressor and a resting order.
///
/// `price` is always the resting order's price: the resting side
/// never trades worse than its quote, and any price improvement
/// accrues to the aggressor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub buy_order_id: u64,
    pub sell_order_id: u64,
    pub price: Decimal,
    pub quantity: u64,
}

/// Final state of a submitted order once the matching sweep is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Validation failed; neither book was touched.
    Rejected(RejectReason),

    /// The full quantity traded.
    FullyFilled,

    /// Nothing traded; the whole limit order now rests.
    FullyResting,

    /// Some quantity traded; the rest now rests in the book.
    PartiallyResting { remaining: u64 },

    /// Some quantity traded; the rest of a market order was dropped
    /// because the opposing side ran out of liquidity. Market orders
    /// never rest. This is a policy outcome, not an error, and is
    /// kept distinguishable from [`Disposition::FullyFilled`].
    PartiallyDiscarded { remaining: u64 },
}

/// Everything one `submit` call produced: the trades, in the exact
/// order they executed, and the order's final disposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub trades: Vec<Trade>,
    pub disposition: Disposition,
}

impl SubmitResult {
    pub(crate) fn rejected(reason: RejectReason) -> Self {
        SubmitResult {
            trades: Vec::new(),
            disposition: Disposition::Rejected(reason),
        }
    }

    /// Total quantity traded across all fills of this call.
    pub fn filled_quantity(&self) -> u64 {
        self.trades.iter().map(|t| t.quantity).sum()
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.disposition, Disposition::Rejected(_))
    }
}
