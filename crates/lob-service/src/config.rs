//! Configuration for the engine service.
//!
//! Intentionally simple: defaults, overridable via environment
//! variables:
//!
//! - `LOB_QUEUE_DEPTH` (default: "1024")
//! - `RUST_LOG` is read separately by the tracing subscriber.

use std::env;
use std::str::FromStr;

use anyhow::Result;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of the command queue into the engine task; senders
    /// back-pressure once it fills.
    pub queue_depth: usize,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to reasonable defaults.
    pub fn from_env() -> Result<Self> {
        let queue_depth = read_env_or_default("LOB_QUEUE_DEPTH", 1024usize)?;
        Ok(Config { queue_depth })
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => Ok(val.parse::<T>()?),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.queue_depth, 1024);
    }
}
