//! Cloneable async handle to the engine task.

use anyhow::{anyhow, Result};
use lob_core::{DepthSnapshot, NewOrder, SubmitResult};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::engine_task;
use crate::types::{CommandTx, EngineCommand};

/// Spawn the engine task and return a handle to it.
///
/// `queue_depth` bounds the command queue; senders back-pressure once
/// it fills. The engine stops when every handle is dropped.
pub fn spawn(queue_depth: usize) -> (EngineHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(queue_depth);
    let join = tokio::spawn(engine_task::run_engine_loop(rx));
    (EngineHandle { tx }, join)
}

/// A handle to a running engine task.
///
/// Clones share the same command queue and thus the same book; the
/// queue order is the arrival order the engine sees.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: CommandTx,
}

impl EngineHandle {
    /// Submit a new order and wait for its trades and disposition.
    pub async fn submit(&self, order: NewOrder) -> Result<SubmitResult> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::Submit { order, reply }).await?;
        rx.await.map_err(|_| anyhow!("engine task dropped the reply"))
    }

    /// Cancel a resting order. `false` means the id was not found.
    pub async fn cancel(&self, id: u64) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::Cancel { id, reply }).await?;
        rx.await.map_err(|_| anyhow!("engine task dropped the reply"))
    }

    /// Cancel-and-resubmit a resting order at a new price/quantity.
    /// `None` means the id was not found (no state change).
    pub async fn modify(
        &self,
        id: u64,
        new_price: Decimal,
        new_quantity: u64,
    ) -> Result<Option<SubmitResult>> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::Modify {
            id,
            new_price,
            new_quantity,
            reply,
        })
        .await?;
        rx.await.map_err(|_| anyhow!("engine task dropped the reply"))
    }

    /// Aggregated depth on both sides at one point in time.
    pub async fn snapshot(&self) -> Result<DepthSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| anyhow!("engine task dropped the reply"))
    }

    async fn send(&self, command: EngineCommand) -> Result<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| anyhow!("engine task stopped"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lob_core::{Disposition, Side};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn operations_run_in_submission_order() {
        let (handle, join) = spawn(64);

        let r1 = handle
            .submit(NewOrder::limit(1, Side::Buy, dec!(100.0), 10))
            .await
            .unwrap();
        assert_eq!(r1.disposition, Disposition::FullyResting);

        let r2 = handle
            .submit(NewOrder::limit(2, Side::Sell, dec!(100.0), 4))
            .await
            .unwrap();
        assert_eq!(r2.trades.len(), 1);
        assert_eq!(r2.trades[0].price, dec!(100.0));
        assert_eq!(r2.disposition, Disposition::FullyFilled);

        assert!(handle.cancel(1).await.unwrap());
        assert!(!handle.cancel(1).await.unwrap());

        let snapshot = handle.snapshot().await.unwrap();
        assert!(snapshot.is_empty());

        drop(handle);
        join.await.unwrap();
    }

    #[tokio::test]
    async fn clones_share_one_book() {
        let (handle, join) = spawn(64);
        let other = handle.clone();

        handle
            .submit(NewOrder::limit(1, Side::Sell, dec!(101.0), 5))
            .await
            .unwrap();
        let result = other
            .submit(NewOrder::market(2, Side::Buy, 5))
            .await
            .unwrap();
        assert_eq!(result.disposition, Disposition::FullyFilled);

        drop(handle);
        drop(other);
        join.await.unwrap();
    }

    #[tokio::test]
    async fn modify_through_the_handle() {
        let (handle, join) = spawn(64);

        handle
            .submit(NewOrder::limit(1, Side::Buy, dec!(99.0), 10))
            .await
            .unwrap();
        let modified = handle.modify(1, dec!(99.5), 8).await.unwrap().unwrap();
        assert_eq!(modified.disposition, Disposition::FullyResting);

        assert!(handle.modify(42, dec!(99.5), 8).await.unwrap().is_none());

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.best_bid().unwrap().price, dec!(99.5));
        assert_eq!(snapshot.best_bid().unwrap().quantity, 8);

        drop(handle);
        join.await.unwrap();
    }
}
