//! A FIFO queue of resting orders sharing one price.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::order::Order;

/// One price level: all resting orders at exactly this price, in
/// arrival-sequence order (oldest at the front).
///
/// A `PriceLevel` is only ever reachable through a
/// [`SideBook`](crate::book_side::SideBook), which deletes it in the
/// same operation that empties it; an empty level is never observable
/// from outside.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Decimal,
    queue: VecDeque<Order>,
}

impl PriceLevel {
    pub fn new(price: Decimal) -> Self {
        PriceLevel {
            price,
            queue: VecDeque::new(),
        }
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Append an order at the back of the queue (loses to everything
    /// already resting here).
    pub fn push_back(&mut self, order: Order) {
        debug_assert!(order.quantity > 0);
        self.queue.push_back(order);
    }

    /// The oldest order at this price, mutable for in-place fills.
    pub fn front_mut(&mut self) -> Option<&mut Order> {
        self.queue.front_mut()
    }

    /// Remove and return the oldest order (used once it is fully
    /// filled).
    pub fn pop_front(&mut self) -> Option<Order> {
        self.queue.pop_front()
    }

    /// Remove the order with the given id, preserving the relative
    /// order of everything else. Returns the removed order, or `None`
    /// if no such id rests here.
    pub fn remove_by_id(&mut self, id: u64) -> Option<Order> {
        let pos = self.queue.iter().position(|o| o.id == id)?;
        self.queue.remove(pos)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Sum of remaining quantity across all orders at this price.
    pub fn total_quantity(&self) -> u64 {
        self.queue.iter().map(|o| o.quantity).sum()
    }

    /// Resting orders in time priority, oldest first.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_type::OrderType;
    use crate::side::Side;
    use rust_decimal_macros::dec;

    fn order(id: u64, qty: u64, seq: u64) -> Order {
        Order::new(id, Side::Buy, OrderType::Limit, dec!(100), qty, seq)
    }

    #[test]
    fn fifo_order_is_preserved() {
        let mut level = PriceLevel::new(dec!(100));
        level.push_back(order(1, 10, 1));
        level.push_back(order(2, 20, 2));
        level.push_back(order(3, 5, 3));

        assert_eq!(level.total_quantity(), 35);
        assert_eq!(level.pop_front().unwrap().id, 1);
        assert_eq!(level.pop_front().unwrap().id, 2);
        assert_eq!(level.pop_front().unwrap().id, 3);
        assert!(level.is_empty());
    }

    #[test]
    fn remove_by_id_keeps_relative_order() {
        let mut level = PriceLevel::new(dec!(100));
        level.push_back(order(1, 10, 1));
        level.push_back(order(2, 20, 2));
        level.push_back(order(3, 5, 3));

        let removed = level.remove_by_id(2).unwrap();
        assert_eq!(removed.quantity, 20);
        assert!(level.remove_by_id(2).is_none());

        let ids: Vec<u64> = level.orders().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
