//! Central engine loop.
//!
//! This task owns the `MatchingEngine` instance and processes all
//! `EngineCommand`s from handles, one at a time. Because the engine
//! is only ever touched from this loop, every operation is atomic
//! with respect to every other: no cancel can observe a half-finished
//! sweep and no two submits can interleave their book mutations.

use lob_core::MatchingEngine;
use tracing::{debug, info};

use crate::types::{CommandRx, EngineCommand};

/// Run the engine processing loop until the command channel closes.
///
/// A dropped reply receiver just means the caller went away; the
/// operation has already been applied and the loop carries on.
pub async fn run_engine_loop(mut commands: CommandRx) {
    let mut engine = MatchingEngine::new();
    info!("engine task started");

    while let Some(command) = commands.recv().await {
        match command {
            EngineCommand::Submit { order, reply } => {
                let result = engine.submit(order);
                let _ = reply.send(result);
            }
            EngineCommand::Cancel { id, reply } => {
                let cancelled = engine.cancel(id);
                let _ = reply.send(cancelled);
            }
            EngineCommand::Modify {
                id,
                new_price,
                new_quantity,
                reply,
            } => {
                let result = engine.modify(id, new_price, new_quantity);
                let _ = reply.send(result);
            }
            EngineCommand::Snapshot { reply } => {
                let _ = reply.send(engine.snapshot());
            }
        }
    }

    debug!(
        resting = engine.resting_orders(),
        "engine loop shutting down (command channel closed)"
    );
}
