//! Reject reasons for invalid order submissions.
//!
//! The engine is purely computational: every failure is a
//! caller-input problem reported synchronously with no state change.
//! There are no retryable or fatal classes. Unknown-id cancels and
//! modifies are reported through their return values, not here.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a submitted order was rejected before touching either book.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// Quantity must be strictly positive.
    #[error("quantity must be positive")]
    ZeroQuantity,

    /// A limit order's price must be non-negative.
    #[error("negative limit price: {0}")]
    NegativeLimitPrice(Decimal),

    /// The id is already resting in the book; resting two orders
    /// under one id would corrupt the order index.
    #[error("order id {0} already rests in the book")]
    DuplicateId(u64),
}
