//! lob-core
//!
//! Pure limit order book logic for a single instrument:
//! - request/event types (new order, trade, disposition)
//! - order and price level representation
//! - per-side book with price priority
//! - id → location index for O(1) cancel and modify
//! - the matching engine itself
//!
//! No I/O, no async runtime: every operation runs to completion on
//! the caller's thread. The `lob-service` crate wraps an engine in a
//! single-writer task for concurrent callers.

pub mod book_side;
pub mod depth;
pub mod error;
pub mod matching_engine;
pub mod messages;
pub mod order;
pub mod order_index;
pub mod order_type;
pub mod price_level;
pub mod side;

pub use side::Side;
pub use order_type::OrderType;

pub use messages::{Disposition, NewOrder, SubmitResult, Trade};

pub use book_side::SideBook;
pub use depth::{DepthLevel, DepthSnapshot};
pub use error::RejectReason;
pub use matching_engine::MatchingEngine;
pub use order::Order;
pub use order_index::{OrderIndex, OrderLocation};
pub use price_level::PriceLevel;
