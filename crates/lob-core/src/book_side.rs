//! One side of the book: price levels in priority order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::order::Order;
use crate::price_level::PriceLevel;
use crate::side::Side;

/// All resting liquidity on one side of the book.
///
/// Levels are keyed by price in a `BTreeMap`; priority order is
/// descending price for bids (best = highest) and ascending price for
/// asks (best = lowest). The two sides of an engine are two distinct
/// `SideBook` values selected by an explicit `match` on [`Side`],
/// never by reinterpreting one as the other.
///
/// Invariant: no price key ever maps to an empty level. Every removal
/// path deletes the level in the same call that empties it.
#[derive(Debug, Clone)]
pub struct SideBook {
    side: Side,
    levels: BTreeMap<Decimal, PriceLevel>,
}

impl SideBook {
    pub fn new(side: Side) -> Self {
        SideBook {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Best price on this side, if any liquidity rests here.
    ///
    /// Highest price for bids, lowest for asks.
    pub fn best_price(&self) -> Option<Decimal> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of non-empty price levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Price levels in priority order (best first), lazily.
    ///
    /// The iterator borrows the book, so the sequence reflects a
    /// single consistent state; restart by calling again.
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        let iter: Box<dyn Iterator<Item = &PriceLevel> + '_> = match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        };
        iter
    }

    /// Aggregated `(price, total quantity)` pairs in priority order.
    pub fn depth(&self) -> impl Iterator<Item = (Decimal, u64)> + '_ {
        self.levels()
            .map(|level| (level.price(), level.total_quantity()))
    }

    /// Append a resting order at the back of its price level,
    /// creating the level if this is the first order at that price.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.side, self.side);
        debug_assert!(order.quantity > 0);
        self.levels
            .entry(order.price)
            .or_insert_with(|| PriceLevel::new(order.price))
            .push_back(order);
    }

    /// Mutable access to one level during a matching sweep.
    pub(crate) fn level_mut(&mut self, price: Decimal) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Drop a level once the sweep has emptied it.
    pub(crate) fn remove_level_if_empty(&mut self, price: Decimal) {
        if self
            .levels
            .get(&price)
            .map(|level| level.is_empty())
            .unwrap_or(false)
        {
            self.levels.remove(&price);
        }
    }

    /// Remove one order by id from the level at `price`, deleting the
    /// level if that empties it. Returns the removed order, or `None`
    /// if no such order rests at that price.
    pub fn remove_order(&mut self, price: Decimal, id: u64) -> Option<Order> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove_by_id(id);
        if level.is_empty() {
            self.levels.remove(&price);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_type::OrderType;
    use rust_decimal_macros::dec;

    fn order(side: Side, id: u64, price: Decimal, qty: u64, seq: u64) -> Order {
        Order::new(id, side, OrderType::Limit, price, qty, seq)
    }

    #[test]
    fn bids_iterate_descending_asks_ascending() {
        let mut bids = SideBook::new(Side::Buy);
        bids.insert(order(Side::Buy, 1, dec!(100.0), 10, 1));
        bids.insert(order(Side::Buy, 2, dec!(101.0), 10, 2));
        bids.insert(order(Side::Buy, 3, dec!(99.5), 10, 3));

        let prices: Vec<Decimal> = bids.levels().map(|l| l.price()).collect();
        assert_eq!(prices, vec![dec!(101.0), dec!(100.0), dec!(99.5)]);
        assert_eq!(bids.best_price(), Some(dec!(101.0)));

        let mut asks = SideBook::new(Side::Sell);
        asks.insert(order(Side::Sell, 4, dec!(102.0), 10, 4));
        asks.insert(order(Side::Sell, 5, dec!(101.5), 10, 5));

        let prices: Vec<Decimal> = asks.levels().map(|l| l.price()).collect();
        assert_eq!(prices, vec![dec!(101.5), dec!(102.0)]);
        assert_eq!(asks.best_price(), Some(dec!(101.5)));
    }

    #[test]
    fn remove_order_deletes_emptied_level() {
        let mut bids = SideBook::new(Side::Buy);
        bids.insert(order(Side::Buy, 1, dec!(100.0), 10, 1));
        bids.insert(order(Side::Buy, 2, dec!(100.0), 5, 2));

        assert!(bids.remove_order(dec!(100.0), 1).is_some());
        assert_eq!(bids.level_count(), 1);

        assert!(bids.remove_order(dec!(100.0), 2).is_some());
        assert!(bids.is_empty());
        assert_eq!(bids.best_price(), None);

        // Already gone.
        assert!(bids.remove_order(dec!(100.0), 2).is_none());
    }

    #[test]
    fn same_price_orders_share_a_level() {
        let mut asks = SideBook::new(Side::Sell);
        asks.insert(order(Side::Sell, 1, dec!(101.0), 10, 1));
        asks.insert(order(Side::Sell, 2, dec!(101.0), 7, 2));

        assert_eq!(asks.level_count(), 1);
        let depth: Vec<(Decimal, u64)> = asks.depth().collect();
        assert_eq!(depth, vec![(dec!(101.0), 17)]);
    }
}
