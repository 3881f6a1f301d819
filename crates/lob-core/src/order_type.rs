//! Order type (Market vs Limit).

use std::fmt;

/// Market orders match at any price and never rest; limit orders
/// match only while marketable against their limit price and rest
/// afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
            OrderType::Limit => write!(f, "limit"),
        }
    }
}
