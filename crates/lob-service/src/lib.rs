//! lob-service
//!
//! Single-writer wrapper around [`lob_core::MatchingEngine`]: one
//! dedicated tokio task owns the engine and drains an ordered command
//! queue, so concurrent callers get strictly serialized operations
//! without sharing mutable book state. See [`handle::spawn`].

pub mod config;
pub mod engine_task;
pub mod handle;
pub mod types;

pub use config::Config;
pub use handle::{spawn, EngineHandle};
pub use types::EngineCommand;
