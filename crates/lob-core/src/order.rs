//! Internal order representation used inside the book.
//!
//! This type is purely internal to the `lob-core` crate; callers
//! submit [`NewOrder`](crate::messages::NewOrder) requests and the
//! engine builds `Order`s from them, stamping the arrival sequence
//! that drives time priority.

use rust_decimal::Decimal;

use crate::order_type::OrderType;
use crate::side::Side;

/// A single resting (or in-flight) order.
///
/// `quantity` is the *remaining* unfilled quantity; it is reduced in
/// place as fills occur and the order is removed from the book the
/// moment it reaches zero. An `Order` with `quantity == 0` is never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Caller-supplied identifier, unique for the engine's lifetime.
    pub id: u64,

    pub side: Side,
    pub order_type: OrderType,

    /// Limit price. Meaningless for market orders (never read).
    pub price: Decimal,

    /// Remaining unfilled quantity.
    pub quantity: u64,

    /// Arrival sequence for time priority. Strictly increasing per
    /// engine; a modify stamps a fresh one (priority is lost).
    pub sequence: u64,
}

impl Order {
    pub fn new(
        id: u64,
        side: Side,
        order_type: OrderType,
        price: Decimal,
        quantity: u64,
        sequence: u64,
    ) -> Self {
        Order {
            id,
            side,
            order_type,
            price,
            quantity,
            sequence,
        }
    }

    /// Returns `true` once the order has no quantity left.
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Fill up to `qty` units, returning the quantity actually filled
    /// (`<= qty` and `<= self.quantity`).
    pub fn fill(&mut self, qty: u64) -> u64 {
        let filled = qty.min(self.quantity);
        self.quantity -= filled;
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fill_is_capped_at_remaining() {
        let mut order = Order::new(1, Side::Buy, OrderType::Limit, dec!(100.5), 10, 1);

        assert_eq!(order.fill(4), 4);
        assert_eq!(order.quantity, 6);
        assert!(!order.is_filled());

        assert_eq!(order.fill(100), 6);
        assert_eq!(order.quantity, 0);
        assert!(order.is_filled());
    }
}
