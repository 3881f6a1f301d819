//! Order id → resting location map for O(1) cancel and modify.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::side::Side;

/// Where an order currently rests.
///
/// The location is a `(side, price)` descriptor, not a queue cursor:
/// it is resolved against the live [`SideBook`](crate::book_side::SideBook)
/// at use time, so fills that pop earlier orders out of the same level
/// never invalidate it. Relative FIFO position inside the level is
/// preserved by the queue itself and needs no tracking here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrderLocation {
    pub side: Side,
    pub price: Decimal,
}

/// Mapping from order id to its resting location.
///
/// Invariant: exactly one entry per currently-resting order, updated
/// in the same operation as the book mutation it mirrors. Every order
/// reachable from a book is registered here and vice versa.
#[derive(Debug, Default, Clone)]
pub struct OrderIndex {
    locations: HashMap<u64, OrderLocation>,
}

impl OrderIndex {
    pub fn new() -> Self {
        OrderIndex::default()
    }

    /// Record where a newly rested order lives.
    pub fn register(&mut self, id: u64, side: Side, price: Decimal) {
        let previous = self.locations.insert(id, OrderLocation { side, price });
        debug_assert!(previous.is_none(), "order id {id} registered twice");
    }

    /// Location of a resting order, or `None` if the id is unknown
    /// (never resting, already filled, or cancelled).
    pub fn lookup(&self, id: u64) -> Option<OrderLocation> {
        self.locations.get(&id).copied()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.locations.contains_key(&id)
    }

    /// Drop an order's entry as it leaves the book. Returns its last
    /// known location.
    pub fn unregister(&mut self, id: u64) -> Option<OrderLocation> {
        self.locations.remove(&id)
    }

    /// Number of currently-resting orders.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
