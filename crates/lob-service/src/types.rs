//! Shared types for the engine service.
//!
//! This module defines:
//! - `EngineCommand`: operations flowing into the engine task, each
//!   carrying a oneshot reply channel
//! - channel aliases between handles and the engine loop

use lob_core::{DepthSnapshot, NewOrder, SubmitResult};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};

/// One operation for the engine task, with the channel its result
/// goes back on.
///
/// Commands are drained one at a time from a single queue, so each
/// operation runs as one atomic step against the book; replies carry
/// trades in the exact order they executed.
#[derive(Debug)]
pub enum EngineCommand {
    Submit {
        order: NewOrder,
        reply: oneshot::Sender<SubmitResult>,
    },
    Cancel {
        id: u64,
        reply: oneshot::Sender<bool>,
    },
    Modify {
        id: u64,
        new_price: Decimal,
        new_quantity: u64,
        reply: oneshot::Sender<Option<SubmitResult>>,
    },
    Snapshot {
        reply: oneshot::Sender<DepthSnapshot>,
    },
}

/// Channel from handles → engine task.
pub type CommandTx = mpsc::Sender<EngineCommand>;
pub type CommandRx = mpsc::Receiver<EngineCommand>;
